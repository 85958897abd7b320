use serde::{Deserialize, Serialize};

use super::{Empty, LuceneQuery, ObservationField, PromqlQuery};

/// Event markers overlaid on time-based widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub source: AnnotationSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSource {
    Metrics(MetricsAnnotation),
    Logs(LogsAnnotation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsAnnotation {
    pub promql_query: PromqlQuery,
    pub strategy: MetricsStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsStrategy {
    StartTimeMetric(Empty),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsAnnotation {
    pub lucene_query: LuceneQuery,
    pub strategy: LogsStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_fields: Vec<ObservationField>,
}

/// How log records are turned into annotation spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogsStrategy {
    Instant(InstantStrategy),
    Range(RangeStrategy),
    Duration(DurationStrategy),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantStrategy {
    pub timestamp_field: ObservationField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeStrategy {
    pub start_timestamp_field: ObservationField,
    pub end_timestamp_field: ObservationField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationStrategy {
    pub start_timestamp_field: ObservationField,
    pub duration_field: ObservationField,
}
