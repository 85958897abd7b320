//! Widget definitions.

use serde::{Deserialize, Serialize};

use super::{
    DataprimeQuery, Empty, FilterSource, LogsAggregation, LogsFilter, LuceneQuery, MetricsFilter,
    ObservationField, PromqlQuery,
};

/// The chart kind rendered by a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetDefinition {
    LineChart(LineChart),
    DataTable(DataTable),
    Gauge(Gauge),
    PieChart(PieChart),
    BarChart(BarChart),
    HorizontalBarChart(HorizontalBarChart),
    Markdown(Markdown),
}

impl WidgetDefinition {
    /// Variant key as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LineChart(_) => "line_chart",
            Self::DataTable(_) => "data_table",
            Self::Gauge(_) => "gauge",
            Self::PieChart(_) => "pie_chart",
            Self::BarChart(_) => "bar_chart",
            Self::HorizontalBarChart(_) => "horizontal_bar_chart",
            Self::Markdown(_) => "markdown",
        }
    }
}

// Line chart

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub legend: Legend,
    pub tooltip: Tooltip,
    pub query_definitions: Vec<QueryDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    pub group_by_query: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDefinition {
    pub id: String,
    pub query: LineChartQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_name_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_count_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
    pub resolution: Resolution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mode_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets_presented: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineChartQuery {
    Logs(LineChartLogsQuery),
    Metrics(MetricsQuery),
    Dataprime(DataprimeSourceQuery),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineChartLogsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucene_query: Option<LuceneQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregations: Vec<LogsAggregation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<LogsFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_bys: Vec<ObservationField>,
}

/// PromQL query with optional label filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promql_query: Option<PromqlQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<MetricsFilter>,
}

/// DataPrime query with optional source filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataprimeSourceQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataprime_query: Option<DataprimeQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterSource>,
}

// Data table

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    pub query: DataTableQuery,
    pub results_per_page: i64,
    pub row_style: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<DataTableColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mode_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataTableQuery {
    Logs(DataTableLogsQuery),
    Metrics(MetricsQuery),
    Dataprime(DataprimeSourceQuery),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTableLogsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucene_query: Option<LuceneQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<LogsFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<DataTableGrouping>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTableGrouping {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregations: Vec<DataTableAggregation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_bys: Vec<ObservationField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTableAggregation {
    pub id: String,
    pub name: String,
    pub is_visible: bool,
    pub aggregation: LogsAggregation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableColumn {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<String>,
}

// Gauge

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub query: GaugeQuery,
    pub min: f64,
    pub max: f64,
    pub show_inner_arc: bool,
    pub show_outer_arc: bool,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thresholds: Vec<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mode_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub from: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeQuery {
    Metrics(GaugeMetricsQuery),
    Logs(GaugeLogsQuery),
    Dataprime(DataprimeSourceQuery),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeMetricsQuery {
    pub promql_query: PromqlQuery,
    pub aggregation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<MetricsFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GaugeLogsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucene_query: Option<LuceneQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_aggregation: Option<LogsAggregation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<LogsFilter>,
}

// Pie, bar and horizontal bar charts share one grouped query shape.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupedQuery {
    Logs(GroupedLogsQuery),
    Metrics(GroupedMetricsQuery),
    Dataprime(GroupedDataprimeQuery),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedLogsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucene_query: Option<LuceneQuery>,
    pub aggregation: LogsAggregation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<LogsFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_names_fields: Vec<ObservationField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked_group_name_field: Option<ObservationField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedMetricsQuery {
    pub promql_query: PromqlQuery,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<MetricsFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked_group_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedDataprimeQuery {
    pub dataprime_query: DataprimeQuery,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked_group_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub query: GroupedQuery,
    pub max_slices_per_chart: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_slice_percentage: Option<i64>,
    pub stack_definition: PieStackDefinition,
    pub label_definition: LabelDefinition,
    pub show_legend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub color_scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mode_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieStackDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slices_per_stack: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name_template: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_percentage: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub query: GroupedQuery,
    pub max_bars_per_chart: i64,
    pub group_name_template: String,
    pub stack_definition: BarStackDefinition,
    pub scale_type: String,
    pub colors_by: ColorsBy,
    pub x_axis: XAxis,
    pub unit: String,
    pub sort_by: String,
    pub color_scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mode_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarStackDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slices_per_bar: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorsBy {
    Stack(Empty),
    GroupBy(Empty),
    Aggregation(Empty),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxis {
    Value(Empty),
    Time(TimeAxis),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub interval: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets_presented: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalBarChart {
    pub query: GroupedQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bars_per_chart: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_definition: Option<BarStackDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors_by: Option<ColorsBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_on_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_view_by: Option<YAxisViewBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    pub color_scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mode_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YAxisViewBy {
    Category(Empty),
    Value(Empty),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markdown {
    pub markdown_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<String>,
}
