//! Proptest strategies for dashboard models.
//!
//! Generated values only use finite floats and non-empty short strings so
//! they survive a trip through JSON unchanged.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

use crate::models::*;

fn text() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 _.-]{0,11}"
}

fn uuid_value() -> impl Strategy<Value = UuidValue> {
    "[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}"
        .prop_map(|value| UuidValue { value })
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6f64
}

pub fn observation_field_strategy() -> impl Strategy<Value = ObservationField> {
    (
        vec(text(), 0..3),
        option::of(prop_oneof![
            Just("user_data".to_string()),
            Just("label".to_string()),
            Just("metadata".to_string()),
        ]),
    )
        .prop_map(|(keypath, scope)| ObservationField { keypath, scope })
}

pub fn logs_aggregation_strategy() -> impl Strategy<Value = LogsAggregation> {
    let field = || observation_field_strategy().prop_map(|observation_field| FieldAggregation { observation_field });
    prop_oneof![
        Just(LogsAggregation::Count(Empty {})),
        field().prop_map(LogsAggregation::CountDistinct),
        field().prop_map(LogsAggregation::Sum),
        field().prop_map(LogsAggregation::Average),
        field().prop_map(LogsAggregation::Min),
        field().prop_map(LogsAggregation::Max),
        (0.0f64..100.0, observation_field_strategy()).prop_map(|(percent, observation_field)| {
            LogsAggregation::Percentile(PercentileAggregation {
                percent,
                observation_field,
            })
        }),
    ]
}

pub fn filter_operator_strategy() -> impl Strategy<Value = FilterOperator> {
    prop_oneof![
        Just(FilterOperator::Equals(EqualsOperator {
            selection: EqualsSelection::All(Empty {}),
        })),
        vec(text(), 0..3).prop_map(|values| FilterOperator::Equals(EqualsOperator {
            selection: EqualsSelection::List(ListSelection { values }),
        })),
        vec(text(), 0..3).prop_map(|values| FilterOperator::NotEquals(NotEqualsOperator {
            selection: NotEqualsSelection {
                list: Some(ListSelection { values }),
            },
        })),
    ]
}

pub fn logs_filter_strategy() -> impl Strategy<Value = LogsFilter> {
    (
        option::of(text()),
        option::of(filter_operator_strategy()),
        option::of(observation_field_strategy()),
    )
        .prop_map(|(field, operator, observation_field)| LogsFilter {
            field,
            operator,
            observation_field,
        })
}

pub fn metrics_filter_strategy() -> impl Strategy<Value = MetricsFilter> {
    (option::of(text()), option::of(filter_operator_strategy()))
        .prop_map(|(label, operator)| MetricsFilter { label, operator })
}

pub fn filter_source_strategy() -> impl Strategy<Value = FilterSource> {
    prop_oneof![
        logs_filter_strategy().prop_map(FilterSource::Logs),
        metrics_filter_strategy().prop_map(FilterSource::Metrics),
    ]
}

fn lucene() -> impl Strategy<Value = LuceneQuery> {
    option::of(text()).prop_map(|value| LuceneQuery { value })
}

fn promql() -> impl Strategy<Value = PromqlQuery> {
    option::of(text()).prop_map(|value| PromqlQuery { value })
}

fn dataprime() -> impl Strategy<Value = DataprimeQuery> {
    option::of(text()).prop_map(|text| DataprimeQuery { text })
}

fn metrics_query() -> impl Strategy<Value = MetricsQuery> {
    (option::of(promql()), vec(metrics_filter_strategy(), 0..2))
        .prop_map(|(promql_query, filters)| MetricsQuery {
            promql_query,
            filters,
        })
}

fn dataprime_source_query() -> impl Strategy<Value = DataprimeSourceQuery> {
    (option::of(dataprime()), vec(filter_source_strategy(), 0..2)).prop_map(
        |(dataprime_query, filters)| DataprimeSourceQuery {
            dataprime_query,
            filters,
        },
    )
}

fn line_chart_strategy() -> impl Strategy<Value = LineChart> {
    let logs = (
        option::of(lucene()),
        vec(text(), 0..2),
        vec(logs_aggregation_strategy(), 0..2),
        vec(logs_filter_strategy(), 0..2),
    )
        .prop_map(|(lucene_query, group_by, aggregations, filters)| {
            LineChartQuery::Logs(LineChartLogsQuery {
                lucene_query,
                group_by,
                aggregations,
                filters,
                group_bys: vec![],
            })
        });
    let query = prop_oneof![
        logs,
        metrics_query().prop_map(LineChartQuery::Metrics),
        dataprime_source_query().prop_map(LineChartQuery::Dataprime),
    ];
    let definition = (text(), query, any::<bool>(), option::of(1i64..500)).prop_map(
        |(id, query, is_visible, buckets_presented)| QueryDefinition {
            id,
            query,
            series_name_template: None,
            series_count_limit: Some("20".to_string()),
            unit: Some("unspecified".to_string()),
            scale_type: Some("linear".to_string()),
            name: None,
            is_visible,
            color_scheme: None,
            resolution: Resolution {
                interval: None,
                buckets_presented,
            },
            data_mode_type: None,
        },
    );
    (any::<bool>(), any::<bool>(), vec(definition, 1..3)).prop_map(
        |(is_visible, show_labels, query_definitions)| LineChart {
            legend: Legend {
                is_visible,
                columns: vec![],
                group_by_query: true,
            },
            tooltip: Tooltip {
                show_labels: Some(show_labels),
                kind: Some("all".to_string()),
            },
            query_definitions,
            stacked_line: None,
        },
    )
}

fn gauge_strategy() -> impl Strategy<Value = Gauge> {
    let query = prop_oneof![
        (promql(), vec(metrics_filter_strategy(), 0..2)).prop_map(|(promql_query, filters)| {
            GaugeQuery::Metrics(GaugeMetricsQuery {
                promql_query,
                aggregation: "last".to_string(),
                filters,
            })
        }),
        (
            option::of(lucene()),
            option::of(logs_aggregation_strategy()),
            vec(logs_filter_strategy(), 0..2)
        )
            .prop_map(|(lucene_query, logs_aggregation, filters)| {
                GaugeQuery::Logs(GaugeLogsQuery {
                    lucene_query,
                    logs_aggregation,
                    filters,
                })
            }),
        dataprime_source_query().prop_map(GaugeQuery::Dataprime),
    ];
    let threshold = (finite(), text()).prop_map(|(from, color)| Threshold { from, color });
    (
        query,
        finite(),
        finite(),
        any::<bool>(),
        any::<bool>(),
        vec(threshold, 0..3),
    )
        .prop_map(
            |(query, min, max, show_inner_arc, show_outer_arc, thresholds)| Gauge {
                query,
                min,
                max,
                show_inner_arc,
                show_outer_arc,
                unit: "number".to_string(),
                thresholds,
                data_mode_type: None,
                threshold_by: Some("value".to_string()),
            },
        )
}

fn grouped_query_strategy() -> impl Strategy<Value = GroupedQuery> {
    prop_oneof![
        (
            option::of(lucene()),
            logs_aggregation_strategy(),
            vec(observation_field_strategy(), 0..2)
        )
            .prop_map(|(lucene_query, aggregation, group_names_fields)| {
                GroupedQuery::Logs(GroupedLogsQuery {
                    lucene_query,
                    aggregation,
                    filters: vec![],
                    group_names_fields,
                    stacked_group_name_field: None,
                })
            }),
        (promql(), vec(text(), 0..2)).prop_map(|(promql_query, group_names)| {
            GroupedQuery::Metrics(GroupedMetricsQuery {
                promql_query,
                filters: vec![],
                group_names,
                stacked_group_name: None,
            })
        }),
        (dataprime(), option::of(text())).prop_map(|(dataprime_query, stacked_group_name)| {
            GroupedQuery::Dataprime(GroupedDataprimeQuery {
                dataprime_query,
                filters: vec![],
                group_names: vec![],
                stacked_group_name,
            })
        }),
    ]
}

fn bar_chart_strategy() -> impl Strategy<Value = BarChart> {
    let x_axis = prop_oneof![
        Just(XAxis::Value(Empty {})),
        (text(), option::of(1i64..100)).prop_map(|(interval, buckets_presented)| {
            XAxis::Time(TimeAxis {
                interval,
                buckets_presented,
            })
        }),
    ];
    (grouped_query_strategy(), 1i64..50, colors_by_strategy(), x_axis).prop_map(
        |(query, max_bars_per_chart, colors_by, x_axis)| BarChart {
            query,
            max_bars_per_chart,
            group_name_template: "{{name}}".to_string(),
            stack_definition: BarStackDefinition::default(),
            scale_type: "linear".to_string(),
            colors_by,
            x_axis,
            unit: "unspecified".to_string(),
            sort_by: "value".to_string(),
            color_scheme: "classic".to_string(),
            data_mode_type: None,
        },
    )
}

fn colors_by_strategy() -> impl Strategy<Value = ColorsBy> {
    prop_oneof![
        Just(ColorsBy::Stack(Empty {})),
        Just(ColorsBy::GroupBy(Empty {})),
        Just(ColorsBy::Aggregation(Empty {})),
    ]
}

fn data_table_strategy() -> impl Strategy<Value = DataTable> {
    let aggregation = (text(), text(), any::<bool>(), logs_aggregation_strategy()).prop_map(
        |(id, name, is_visible, aggregation)| DataTableAggregation {
            id,
            name,
            is_visible,
            aggregation,
        },
    );
    let grouping = (vec(aggregation, 0..2), vec(observation_field_strategy(), 0..2))
        .prop_map(|(aggregations, group_bys)| DataTableGrouping {
            aggregations,
            group_bys,
        });
    let logs = (
        option::of(lucene()),
        vec(logs_filter_strategy(), 0..2),
        option::of(grouping),
    )
        .prop_map(|(lucene_query, filters, grouping)| {
            DataTableQuery::Logs(DataTableLogsQuery {
                lucene_query,
                filters,
                grouping,
            })
        });
    let query = prop_oneof![
        logs,
        metrics_query().prop_map(DataTableQuery::Metrics),
        dataprime_source_query().prop_map(DataTableQuery::Dataprime),
    ];
    let column = (text(), option::of(1i64..400)).prop_map(|(field, width)| DataTableColumn { field, width });
    let order_by = (
        option::of(text()),
        option::of(prop_oneof![Just("asc".to_string()), Just("desc".to_string())]),
    )
        .prop_map(|(field, order_direction)| OrderBy {
            field,
            order_direction,
        });
    (query, 1i64..100, vec(column, 0..3), option::of(order_by)).prop_map(
        |(query, results_per_page, columns, order_by)| DataTable {
            query,
            results_per_page,
            row_style: "one_line".to_string(),
            columns,
            order_by,
            data_mode_type: None,
        },
    )
}

fn pie_chart_strategy() -> impl Strategy<Value = PieChart> {
    let label_definition = (
        option::of(prop_oneof![Just("inner".to_string()), Just("stack".to_string())]),
        option::of(any::<bool>()),
        option::of(any::<bool>()),
    )
        .prop_map(|(label_source, is_visible, show_percentage)| LabelDefinition {
            label_source,
            is_visible,
            show_name: Some(true),
            show_value: None,
            show_percentage,
        });
    (
        grouped_query_strategy(),
        1i64..20,
        option::of(0i64..100),
        option::of(1i64..10),
        label_definition,
        any::<bool>(),
    )
        .prop_map(
            |(query, max_slices_per_chart, min_slice_percentage, max_slices_per_stack, label_definition, show_legend)| {
                PieChart {
                    query,
                    max_slices_per_chart,
                    min_slice_percentage,
                    stack_definition: PieStackDefinition {
                        max_slices_per_stack,
                        stack_name_template: None,
                    },
                    label_definition,
                    show_legend,
                    group_name_template: None,
                    unit: Some("unspecified".to_string()),
                    color_scheme: "classic".to_string(),
                    data_mode_type: None,
                }
            },
        )
}

fn horizontal_bar_chart_strategy() -> impl Strategy<Value = HorizontalBarChart> {
    let y_axis_view_by = prop_oneof![
        Just(YAxisViewBy::Category(Empty {})),
        Just(YAxisViewBy::Value(Empty {})),
    ];
    (
        grouped_query_strategy(),
        option::of(1i64..50),
        option::of(colors_by_strategy()),
        option::of(y_axis_view_by),
        option::of(any::<bool>()),
    )
        .prop_map(
            |(query, max_bars_per_chart, colors_by, y_axis_view_by, display_on_bar)| HorizontalBarChart {
                query,
                max_bars_per_chart,
                group_name_template: None,
                stack_definition: Some(BarStackDefinition::default()),
                scale_type: Some("logarithmic".to_string()),
                colors_by,
                unit: None,
                display_on_bar,
                y_axis_view_by,
                sort_by: Some("name".to_string()),
                color_scheme: "classic".to_string(),
                data_mode_type: None,
            },
        )
}

fn markdown_strategy() -> impl Strategy<Value = Markdown> {
    (text(), option::of(text())).prop_map(|(markdown_text, tooltip_text)| Markdown {
        markdown_text,
        tooltip_text,
    })
}

pub fn widget_definition_strategy() -> impl Strategy<Value = WidgetDefinition> {
    prop_oneof![
        line_chart_strategy().prop_map(WidgetDefinition::LineChart),
        data_table_strategy().prop_map(WidgetDefinition::DataTable),
        gauge_strategy().prop_map(WidgetDefinition::Gauge),
        pie_chart_strategy().prop_map(WidgetDefinition::PieChart),
        bar_chart_strategy().prop_map(WidgetDefinition::BarChart),
        horizontal_bar_chart_strategy().prop_map(WidgetDefinition::HorizontalBarChart),
        markdown_strategy().prop_map(WidgetDefinition::Markdown),
    ]
}

fn widget_strategy() -> impl Strategy<Value = Widget> {
    (
        uuid_value(),
        text(),
        option::of(text()),
        widget_definition_strategy(),
    )
        .prop_map(|(id, title, description, definition)| Widget {
            href: None,
            id,
            title,
            description,
            definition,
            created_at: None,
            updated_at: None,
        })
}

pub fn layout_strategy() -> impl Strategy<Value = Layout> {
    let row = (uuid_value(), 1i64..40, vec(widget_strategy(), 0..3)).prop_map(
        |(id, height, widgets)| Row {
            href: None,
            id,
            appearance: RowAppearance { height },
            widgets,
        },
    );
    let options = prop_oneof![
        Just(SectionOptions::Internal(Empty {})),
        (text(), option::of(any::<bool>())).prop_map(|(name, collapsed)| {
            SectionOptions::Custom(CustomSectionOptions {
                name,
                description: None,
                collapsed,
            })
        }),
    ];
    let section = (uuid_value(), vec(row, 0..2), option::of(options)).prop_map(
        |(id, rows, options)| Section {
            href: None,
            id,
            rows,
            options,
        },
    );
    vec(section, 0..2).prop_map(|sections| Layout { sections })
}

pub fn variable_strategy() -> impl Strategy<Value = Variable> {
    let source = prop_oneof![
        observation_field_strategy()
            .prop_map(|observation_field| VariableSource::LogsPath(LogsPathSource { observation_field })),
        (text(), text()).prop_map(|(metric_name, label)| {
            VariableSource::MetricLabel(MetricLabelSource { metric_name, label })
        }),
        vec(text(), 0..3)
            .prop_map(|values| VariableSource::ConstantList(ConstantListSource { values })),
    ];
    let selection = prop_oneof![
        Just(VariableSelection::All(Empty {})),
        vec(text(), 0..3).prop_map(|labels| VariableSelection::List(LabelList { labels })),
    ];
    (text(), text(), source, selection).prop_map(|(name, display_name, source, selection)| {
        Variable {
            name,
            definition: VariableDefinition::MultiSelect(MultiSelect {
                source,
                selection,
                values_order_direction: "asc".to_string(),
            }),
            display_name,
        }
    })
}

pub fn annotation_strategy() -> impl Strategy<Value = Annotation> {
    let strategy = prop_oneof![
        observation_field_strategy()
            .prop_map(|timestamp_field| LogsStrategy::Instant(InstantStrategy { timestamp_field })),
        (observation_field_strategy(), observation_field_strategy()).prop_map(
            |(start_timestamp_field, end_timestamp_field)| {
                LogsStrategy::Range(RangeStrategy {
                    start_timestamp_field,
                    end_timestamp_field,
                })
            }
        ),
        (observation_field_strategy(), observation_field_strategy()).prop_map(
            |(start_timestamp_field, duration_field)| {
                LogsStrategy::Duration(DurationStrategy {
                    start_timestamp_field,
                    duration_field,
                })
            }
        ),
    ];
    let source = prop_oneof![
        (promql(), vec(text(), 0..2)).prop_map(|(promql_query, labels)| {
            AnnotationSource::Metrics(MetricsAnnotation {
                promql_query,
                strategy: MetricsStrategy::StartTimeMetric(Empty {}),
                message_template: None,
                labels,
            })
        }),
        (lucene(), strategy, option::of(text())).prop_map(
            |(lucene_query, strategy, message_template)| {
                AnnotationSource::Logs(LogsAnnotation {
                    lucene_query,
                    strategy,
                    message_template,
                    label_fields: vec![],
                })
            }
        ),
    ];
    (text(), text(), any::<bool>(), source).prop_map(|(id, name, enabled, source)| Annotation {
        href: None,
        id,
        name,
        enabled,
        source,
    })
}

pub fn time_frame_strategy() -> impl Strategy<Value = TimeFrame> {
    prop_oneof![
        "[1-9][0-9]{0,4}[smhdw]".prop_map(TimeFrame::RelativeTimeFrame),
        Just(TimeFrame::AbsoluteTimeFrame(AbsoluteTimeFrame {
            from: "2024-01-01T00:00:00Z".to_string(),
            to: "2024-01-02T00:00:00Z".to_string(),
        })),
    ]
}

pub fn folder_strategy() -> impl Strategy<Value = FolderLocation> {
    prop_oneof![
        uuid_value().prop_map(FolderLocation::FolderId),
        vec(text(), 0..3).prop_map(|segments| FolderLocation::FolderPath(FolderPath { segments })),
    ]
}

pub fn auto_refresh_strategy() -> impl Strategy<Value = AutoRefresh> {
    prop_oneof![
        Just(AutoRefresh::Off(Empty {})),
        Just(AutoRefresh::TwoMinutes(Empty {})),
        Just(AutoRefresh::FiveMinutes(Empty {})),
    ]
}

/// A complete dashboard as a user would submit it (no server-assigned fields).
pub fn dashboard_strategy() -> impl Strategy<Value = Dashboard> {
    (
        text(),
        option::of(text()),
        layout_strategy(),
        vec(variable_strategy(), 0..2),
        vec(
            (filter_source_strategy(), option::of(any::<bool>()), option::of(any::<bool>())),
            0..2,
        ),
        vec(annotation_strategy(), 0..2),
        option::of(time_frame_strategy()),
        option::of(folder_strategy()),
        option::of(auto_refresh_strategy()),
    )
        .prop_map(
            |(
                name,
                description,
                layout,
                variables,
                filters,
                annotations,
                time_frame,
                folder,
                auto_refresh,
            )| Dashboard {
                id: None,
                href: None,
                name,
                description,
                layout,
                variables,
                filters: filters
                    .into_iter()
                    .map(|(source, enabled, collapsed)| Filter {
                        source,
                        enabled,
                        collapsed,
                    })
                    .collect(),
                annotations,
                time_frame,
                folder,
                auto_refresh,
            },
        )
}
