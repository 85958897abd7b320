//! Schema table of the `ibm_logs_dashboard` resource.
//!
//! Attribute names follow the wire model in `cloudlogs_client::models`; the
//! only rename is `dashboard_id`, which travels as `id`.

use super::{Attribute, BlockSchema, ResourceSchema, Validator};

pub const RESOURCE_TYPE: &str = "ibm_logs_dashboard";
pub const SCHEMA_VERSION: u32 = 0;

const INSTANCE_ID_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";
const HREF_PATTERN: &str = r"^[a-zA-Z0-9]{21}$";
const TEXT_PATTERN: &str = r"^[\p{L}\p{N}\p{P}\p{Z}\p{S}]+$";
const RELATIVE_TIME_PATTERN: &str = r"^[0-9]+[smhdw]?$";

const DATA_MODE_TYPES: &[&str] = &["high_unspecified", "archive"];
const ORDER_DIRECTIONS: &[&str] = &["unspecified", "asc", "desc"];
const SCALE_TYPES: &[&str] = &["unspecified", "linear", "logarithmic"];
const SORT_BY: &[&str] = &["unspecified", "value", "name"];
const ROW_STYLES: &[&str] = &["unspecified", "one_line", "two_line", "condensed", "json", "list"];
const TOOLTIP_TYPES: &[&str] = &["unspecified", "all", "single"];
const THRESHOLD_BY: &[&str] = &["unspecified", "value", "background"];
const GAUGE_AGGREGATIONS: &[&str] = &["unspecified", "last", "min", "max", "avg", "sum"];
const LABEL_SOURCES: &[&str] = &["unspecified", "inner", "stack"];
const FIELD_SCOPES: &[&str] = &["unspecified", "user_data", "label", "metadata"];
const ENDPOINT_TYPES: &[&str] = &["public", "private"];

/// Build the dashboard resource schema.
///
/// Fails only when one of the built-in patterns does not compile.
pub fn dashboard_schema() -> Result<ResourceSchema, regex::Error> {
    let root = BlockSchema::new(vec![
        Attribute::string("instance_id")
            .required()
            .local()
            .force_new()
            .validate(Validator::pattern(INSTANCE_ID_PATTERN)?)
            .describe_as("Cloud Logs instance GUID."),
        Attribute::string("region")
            .optional_computed()
            .local()
            .force_new()
            .describe_as("Region of the instance; defaults to the provider region."),
        Attribute::string("endpoint_type")
            .local()
            .validate(Validator::OneOf(ENDPOINT_TYPES))
            .describe_as("Reach the instance over the public or private network."),
        Attribute::string("dashboard_id")
            .computed()
            .wire_name("id")
            .describe_as("Dashboard id assigned by the service."),
        Attribute::string("href")
            .optional_computed()
            .validate(Validator::pattern(HREF_PATTERN)?),
        Attribute::string("name")
            .required()
            .validate(Validator::Length { min: 1, max: 100 })
            .validate(Validator::pattern(TEXT_PATTERN)?),
        Attribute::string("description")
            .validate(Validator::Length { min: 1, max: 200 })
            .validate(Validator::pattern(TEXT_PATTERN)?),
        Attribute::block("layout", layout()).required(),
        Attribute::block_list("variables", variable()),
        Attribute::block_list("filters", filter()),
        Attribute::block_list("annotations", annotation()),
        Attribute::block(
            "absolute_time_frame",
            BlockSchema::new(vec![
                Attribute::string("from").required(),
                Attribute::string("to").required(),
            ]),
        ),
        Attribute::string("relative_time_frame")
            .validate(Validator::Length { min: 2, max: 10 })
            .validate(Validator::pattern(RELATIVE_TIME_PATTERN)?),
        Attribute::block("folder_id", uuid_value()),
        Attribute::block(
            "folder_path",
            BlockSchema::new(vec![Attribute::strings("segments")]),
        ),
        Attribute::block("false", empty()),
        Attribute::block("two_minutes", empty()),
        Attribute::block("five_minutes", empty()),
    ])
    .with_oneof("time_frame", vec!["absolute_time_frame", "relative_time_frame"])
    .with_oneof("folder", vec!["folder_id", "folder_path"])
    .with_oneof("auto_refresh", vec!["false", "two_minutes", "five_minutes"]);

    Ok(ResourceSchema {
        type_name: RESOURCE_TYPE,
        version: SCHEMA_VERSION,
        root,
    })
}

fn empty() -> BlockSchema {
    BlockSchema::default()
}

fn uuid_value() -> BlockSchema {
    BlockSchema::new(vec![Attribute::string("value").required()])
}

fn data_mode_type() -> Attribute {
    Attribute::string("data_mode_type").validate(Validator::OneOf(DATA_MODE_TYPES))
}

fn lucene_query() -> BlockSchema {
    BlockSchema::new(vec![Attribute::string("value")])
}

fn promql_query() -> BlockSchema {
    BlockSchema::new(vec![Attribute::string("value")])
}

fn dataprime_query() -> BlockSchema {
    BlockSchema::new(vec![Attribute::string("text")])
}

fn observation_field() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::strings("keypath"),
        Attribute::string("scope").validate(Validator::OneOf(FIELD_SCOPES)),
    ])
}

fn field_aggregation() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::block("observation_field", observation_field()).required(),
    ])
}

fn logs_aggregation() -> BlockSchema {
    BlockSchema::union(
        "logs_aggregation",
        vec![
            Attribute::block("count", empty()),
            Attribute::block("count_distinct", field_aggregation()),
            Attribute::block("sum", field_aggregation()),
            Attribute::block("average", field_aggregation()),
            Attribute::block("min", field_aggregation()),
            Attribute::block("max", field_aggregation()),
            Attribute::block(
                "percentile",
                BlockSchema::new(vec![
                    Attribute::float("percent").required(),
                    Attribute::block("observation_field", observation_field()).required(),
                ]),
            ),
        ],
    )
}

fn list_selection() -> BlockSchema {
    BlockSchema::new(vec![Attribute::strings("values")])
}

fn filter_operator() -> BlockSchema {
    let equals_selection = BlockSchema::union(
        "selection",
        vec![
            Attribute::block("all", empty()),
            Attribute::block("list", list_selection()),
        ],
    );
    let not_equals_selection = BlockSchema::new(vec![Attribute::block("list", list_selection())]);

    BlockSchema::union(
        "operator",
        vec![
            Attribute::block(
                "equals",
                BlockSchema::new(vec![
                    Attribute::block("selection", equals_selection).required(),
                ]),
            ),
            Attribute::block(
                "not_equals",
                BlockSchema::new(vec![
                    Attribute::block("selection", not_equals_selection).required(),
                ]),
            ),
        ],
    )
}

fn logs_filter() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::string("field"),
        Attribute::block("operator", filter_operator()),
        Attribute::block("observation_field", observation_field()),
    ])
}

fn metrics_filter() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::string("label"),
        Attribute::block("operator", filter_operator()),
    ])
}

fn filter_source() -> BlockSchema {
    BlockSchema::union(
        "filter_source",
        vec![
            Attribute::block("logs", logs_filter()),
            Attribute::block("metrics", metrics_filter()),
        ],
    )
}

fn metrics_query() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::block("promql_query", promql_query()),
        Attribute::block_list("filters", metrics_filter()),
    ])
}

fn dataprime_source_query() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::block("dataprime_query", dataprime_query()),
        Attribute::block_list("filters", filter_source()),
    ])
}

fn line_chart() -> BlockSchema {
    let query = BlockSchema::union(
        "query",
        vec![
            Attribute::block(
                "logs",
                BlockSchema::new(vec![
                    Attribute::block("lucene_query", lucene_query()),
                    Attribute::strings("group_by"),
                    Attribute::block_list("aggregations", logs_aggregation()),
                    Attribute::block_list("filters", logs_filter()),
                    Attribute::block_list("group_bys", observation_field()),
                ]),
            ),
            Attribute::block("metrics", metrics_query()),
            Attribute::block("dataprime", dataprime_source_query()),
        ],
    );

    let query_definition = BlockSchema::new(vec![
        Attribute::string("id").required(),
        Attribute::block("query", query).required(),
        Attribute::string("series_name_template"),
        Attribute::string("series_count_limit"),
        Attribute::string("unit"),
        Attribute::string("scale_type").validate(Validator::OneOf(SCALE_TYPES)),
        Attribute::string("name"),
        Attribute::bool("is_visible").required(),
        Attribute::string("color_scheme"),
        Attribute::block(
            "resolution",
            BlockSchema::new(vec![
                Attribute::string("interval"),
                Attribute::int("buckets_presented"),
            ]),
        )
        .required(),
        data_mode_type(),
    ]);

    BlockSchema::new(vec![
        Attribute::block(
            "legend",
            BlockSchema::new(vec![
                Attribute::bool("is_visible").required(),
                Attribute::strings("columns"),
                Attribute::bool("group_by_query").required(),
            ]),
        )
        .required(),
        Attribute::block(
            "tooltip",
            BlockSchema::new(vec![
                Attribute::bool("show_labels"),
                Attribute::string("type").validate(Validator::OneOf(TOOLTIP_TYPES)),
            ]),
        )
        .required(),
        Attribute::block_list("query_definitions", query_definition).required(),
        Attribute::string("stacked_line"),
    ])
}

fn data_table() -> BlockSchema {
    let grouping = BlockSchema::new(vec![
        Attribute::block_list(
            "aggregations",
            BlockSchema::new(vec![
                Attribute::string("id").required(),
                Attribute::string("name").required(),
                Attribute::bool("is_visible").required(),
                Attribute::block("aggregation", logs_aggregation()).required(),
            ]),
        ),
        Attribute::block_list("group_bys", observation_field()),
    ]);

    let query = BlockSchema::union(
        "query",
        vec![
            Attribute::block(
                "logs",
                BlockSchema::new(vec![
                    Attribute::block("lucene_query", lucene_query()),
                    Attribute::block_list("filters", logs_filter()),
                    Attribute::block("grouping", grouping),
                ]),
            ),
            Attribute::block("metrics", metrics_query()),
            Attribute::block("dataprime", dataprime_source_query()),
        ],
    );

    BlockSchema::new(vec![
        Attribute::block("query", query).required(),
        Attribute::int("results_per_page").required(),
        Attribute::string("row_style")
            .required()
            .validate(Validator::OneOf(ROW_STYLES)),
        Attribute::block_list(
            "columns",
            BlockSchema::new(vec![
                Attribute::string("field").required(),
                Attribute::int("width"),
            ]),
        ),
        Attribute::block(
            "order_by",
            BlockSchema::new(vec![
                Attribute::string("field"),
                Attribute::string("order_direction").validate(Validator::OneOf(ORDER_DIRECTIONS)),
            ]),
        ),
        data_mode_type(),
    ])
}

fn gauge() -> BlockSchema {
    let query = BlockSchema::union(
        "query",
        vec![
            Attribute::block(
                "metrics",
                BlockSchema::new(vec![
                    Attribute::block("promql_query", promql_query()).required(),
                    Attribute::string("aggregation")
                        .required()
                        .validate(Validator::OneOf(GAUGE_AGGREGATIONS)),
                    Attribute::block_list("filters", metrics_filter()),
                ]),
            ),
            Attribute::block(
                "logs",
                BlockSchema::new(vec![
                    Attribute::block("lucene_query", lucene_query()),
                    Attribute::block("logs_aggregation", logs_aggregation()),
                    Attribute::block_list("filters", logs_filter()),
                ]),
            ),
            Attribute::block("dataprime", dataprime_source_query()),
        ],
    );

    BlockSchema::new(vec![
        Attribute::block("query", query).required(),
        Attribute::float("min").required(),
        Attribute::float("max").required(),
        Attribute::bool("show_inner_arc").required(),
        Attribute::bool("show_outer_arc").required(),
        Attribute::string("unit").required(),
        Attribute::block_list(
            "thresholds",
            BlockSchema::new(vec![
                Attribute::float("from").required(),
                Attribute::string("color").required(),
            ]),
        ),
        data_mode_type(),
        Attribute::string("threshold_by").validate(Validator::OneOf(THRESHOLD_BY)),
    ])
}

fn grouped_query() -> BlockSchema {
    BlockSchema::union(
        "query",
        vec![
            Attribute::block(
                "logs",
                BlockSchema::new(vec![
                    Attribute::block("lucene_query", lucene_query()),
                    Attribute::block("aggregation", logs_aggregation()).required(),
                    Attribute::block_list("filters", logs_filter()),
                    Attribute::block_list("group_names_fields", observation_field()),
                    Attribute::block("stacked_group_name_field", observation_field()),
                ]),
            ),
            Attribute::block(
                "metrics",
                BlockSchema::new(vec![
                    Attribute::block("promql_query", promql_query()).required(),
                    Attribute::block_list("filters", metrics_filter()),
                    Attribute::strings("group_names"),
                    Attribute::string("stacked_group_name"),
                ]),
            ),
            Attribute::block(
                "dataprime",
                BlockSchema::new(vec![
                    Attribute::block("dataprime_query", dataprime_query()).required(),
                    Attribute::block_list("filters", filter_source()),
                    Attribute::strings("group_names"),
                    Attribute::string("stacked_group_name"),
                ]),
            ),
        ],
    )
}

fn pie_chart() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::block("query", grouped_query()).required(),
        Attribute::int("max_slices_per_chart").required(),
        Attribute::int("min_slice_percentage"),
        Attribute::block(
            "stack_definition",
            BlockSchema::new(vec![
                Attribute::int("max_slices_per_stack"),
                Attribute::string("stack_name_template"),
            ]),
        )
        .required(),
        Attribute::block(
            "label_definition",
            BlockSchema::new(vec![
                Attribute::string("label_source").validate(Validator::OneOf(LABEL_SOURCES)),
                Attribute::bool("is_visible"),
                Attribute::bool("show_name"),
                Attribute::bool("show_value"),
                Attribute::bool("show_percentage"),
            ]),
        )
        .required(),
        Attribute::bool("show_legend").required(),
        Attribute::string("group_name_template"),
        Attribute::string("unit"),
        Attribute::string("color_scheme").required(),
        data_mode_type(),
    ])
}

fn bar_stack_definition() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::int("max_slices_per_bar"),
        Attribute::string("stack_name_template"),
    ])
}

fn colors_by() -> BlockSchema {
    BlockSchema::union(
        "colors_by",
        vec![
            Attribute::block("stack", empty()),
            Attribute::block("group_by", empty()),
            Attribute::block("aggregation", empty()),
        ],
    )
}

fn bar_chart() -> BlockSchema {
    let x_axis = BlockSchema::union(
        "x_axis",
        vec![
            Attribute::block("value", empty()),
            Attribute::block(
                "time",
                BlockSchema::new(vec![
                    Attribute::string("interval").required(),
                    Attribute::int("buckets_presented"),
                ]),
            ),
        ],
    );

    BlockSchema::new(vec![
        Attribute::block("query", grouped_query()).required(),
        Attribute::int("max_bars_per_chart").required(),
        Attribute::string("group_name_template").required(),
        Attribute::block("stack_definition", bar_stack_definition()).required(),
        Attribute::string("scale_type")
            .required()
            .validate(Validator::OneOf(SCALE_TYPES)),
        Attribute::block("colors_by", colors_by()).required(),
        Attribute::block("x_axis", x_axis).required(),
        Attribute::string("unit").required(),
        Attribute::string("sort_by")
            .required()
            .validate(Validator::OneOf(SORT_BY)),
        Attribute::string("color_scheme").required(),
        data_mode_type(),
    ])
}

fn horizontal_bar_chart() -> BlockSchema {
    let y_axis_view_by = BlockSchema::union(
        "y_axis_view_by",
        vec![
            Attribute::block("category", empty()),
            Attribute::block("value", empty()),
        ],
    );

    BlockSchema::new(vec![
        Attribute::block("query", grouped_query()).required(),
        Attribute::int("max_bars_per_chart"),
        Attribute::string("group_name_template"),
        Attribute::block("stack_definition", bar_stack_definition()),
        Attribute::string("scale_type").validate(Validator::OneOf(SCALE_TYPES)),
        Attribute::block("colors_by", colors_by()),
        Attribute::string("unit"),
        Attribute::bool("display_on_bar"),
        Attribute::block("y_axis_view_by", y_axis_view_by),
        Attribute::string("sort_by").validate(Validator::OneOf(SORT_BY)),
        Attribute::string("color_scheme").required(),
        data_mode_type(),
    ])
}

fn widget_definition() -> BlockSchema {
    BlockSchema::union(
        "definition",
        vec![
            Attribute::block("line_chart", line_chart()),
            Attribute::block("data_table", data_table()),
            Attribute::block("gauge", gauge()),
            Attribute::block("pie_chart", pie_chart()),
            Attribute::block("bar_chart", bar_chart()),
            Attribute::block("horizontal_bar_chart", horizontal_bar_chart()),
            Attribute::block(
                "markdown",
                BlockSchema::new(vec![
                    Attribute::string("markdown_text").required(),
                    Attribute::string("tooltip_text"),
                ]),
            ),
        ],
    )
}

fn widget() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::string("href").optional_computed(),
        Attribute::block("id", uuid_value()).required(),
        Attribute::string("title").required(),
        Attribute::string("description"),
        Attribute::block("definition", widget_definition()).required(),
        Attribute::string("created_at").computed(),
        Attribute::string("updated_at").computed(),
    ])
}

fn row() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::string("href").optional_computed(),
        Attribute::block("id", uuid_value()).required(),
        Attribute::block(
            "appearance",
            BlockSchema::new(vec![Attribute::int("height").required()]),
        )
        .required(),
        Attribute::block_list("widgets", widget()),
    ])
}

fn section() -> BlockSchema {
    let options = BlockSchema::union(
        "options",
        vec![
            Attribute::block("internal", empty()),
            Attribute::block(
                "custom",
                BlockSchema::new(vec![
                    Attribute::string("name").required(),
                    Attribute::string("description"),
                    Attribute::bool("collapsed"),
                ]),
            ),
        ],
    );

    BlockSchema::new(vec![
        Attribute::string("href").optional_computed(),
        Attribute::block("id", uuid_value()).required(),
        Attribute::block_list("rows", row()),
        Attribute::block("options", options),
    ])
}

fn layout() -> BlockSchema {
    BlockSchema::new(vec![Attribute::block_list("sections", section())])
}

fn variable() -> BlockSchema {
    let source = BlockSchema::union(
        "source",
        vec![
            Attribute::block(
                "logs_path",
                BlockSchema::new(vec![
                    Attribute::block("observation_field", observation_field()).required(),
                ]),
            ),
            Attribute::block(
                "metric_label",
                BlockSchema::new(vec![
                    Attribute::string("metric_name").required(),
                    Attribute::string("label").required(),
                ]),
            ),
            Attribute::block(
                "constant_list",
                BlockSchema::new(vec![Attribute::strings("values")]),
            ),
        ],
    );
    let selection = BlockSchema::union(
        "selection",
        vec![
            Attribute::block("all", empty()),
            Attribute::block("list", BlockSchema::new(vec![Attribute::strings("labels")])),
        ],
    );
    let definition = BlockSchema::union(
        "definition",
        vec![Attribute::block(
            "multi_select",
            BlockSchema::new(vec![
                Attribute::block("source", source).required(),
                Attribute::block("selection", selection).required(),
                Attribute::string("values_order_direction")
                    .required()
                    .validate(Validator::OneOf(ORDER_DIRECTIONS)),
            ]),
        )],
    );

    BlockSchema::new(vec![
        Attribute::string("name").required(),
        Attribute::block("definition", definition).required(),
        Attribute::string("display_name").required(),
    ])
}

fn filter() -> BlockSchema {
    BlockSchema::new(vec![
        Attribute::block("source", filter_source()).required(),
        Attribute::bool("enabled"),
        Attribute::bool("collapsed"),
    ])
}

fn annotation() -> BlockSchema {
    let metrics_strategy = BlockSchema::union(
        "strategy",
        vec![Attribute::block("start_time_metric", empty())],
    );
    let logs_strategy = BlockSchema::union(
        "strategy",
        vec![
            Attribute::block(
                "instant",
                BlockSchema::new(vec![
                    Attribute::block("timestamp_field", observation_field()).required(),
                ]),
            ),
            Attribute::block(
                "range",
                BlockSchema::new(vec![
                    Attribute::block("start_timestamp_field", observation_field()).required(),
                    Attribute::block("end_timestamp_field", observation_field()).required(),
                ]),
            ),
            Attribute::block(
                "duration",
                BlockSchema::new(vec![
                    Attribute::block("start_timestamp_field", observation_field()).required(),
                    Attribute::block("duration_field", observation_field()).required(),
                ]),
            ),
        ],
    );
    let source = BlockSchema::union(
        "source",
        vec![
            Attribute::block(
                "metrics",
                BlockSchema::new(vec![
                    Attribute::block("promql_query", promql_query()).required(),
                    Attribute::block("strategy", metrics_strategy).required(),
                    Attribute::string("message_template"),
                    Attribute::strings("labels"),
                ]),
            ),
            Attribute::block(
                "logs",
                BlockSchema::new(vec![
                    Attribute::block("lucene_query", lucene_query()).required(),
                    Attribute::block("strategy", logs_strategy).required(),
                    Attribute::string("message_template"),
                    Attribute::block_list("label_fields", observation_field()),
                ]),
            ),
        ],
    );

    BlockSchema::new(vec![
        Attribute::string("href").optional_computed(),
        Attribute::string("id").required(),
        Attribute::string("name").required(),
        Attribute::bool("enabled").required(),
        Attribute::block("source", source).required(),
    ])
}
