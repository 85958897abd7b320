//! Dashboard models for the Cloud Logs dashboards API.
//!
//! Every oneof in the API is an externally tagged Rust enum: the selected
//! variant is a single key whose value is the variant payload. The three
//! dashboard-level unions (time frame, folder, auto refresh) are flattened
//! into the dashboard object itself.
//!
//! Serde drops unknown or repeated variants of those flattened unions, so
//! readers that must notice them work on [`DashboardJson`] instead.

mod annotations;
mod filters;
mod layout;
mod variables;
mod widgets;

pub use annotations::*;
pub use filters::*;
pub use layout::*;
pub use variables::*;
pub use widgets::*;

use serde::{Deserialize, Serialize};

/// A dashboard body exactly as the API returned it.
pub type DashboardJson = serde_json::Map<String, serde_json::Value>;

/// Payload of variants that carry no data; serialized as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// UUID wrapper used for section, row and widget ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UuidValue {
    pub value: String,
}

/// A Cloud Logs dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Server-assigned id; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(flatten)]
    pub time_frame: Option<TimeFrame>,
    #[serde(flatten)]
    pub folder: Option<FolderLocation>,
    #[serde(flatten)]
    pub auto_refresh: Option<AutoRefresh>,
}

/// Default time window of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    AbsoluteTimeFrame(AbsoluteTimeFrame),
    /// Duration string such as `900s` or `2h`.
    RelativeTimeFrame(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteTimeFrame {
    pub from: String,
    pub to: String,
}

/// Where the dashboard lives in the folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderLocation {
    FolderId(UuidValue),
    FolderPath(FolderPath),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPath {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,
}

/// Auto refresh interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoRefresh {
    /// Auto refresh disabled.
    #[serde(rename = "false")]
    Off(Empty),
    TwoMinutes(Empty),
    FiveMinutes(Empty),
}
