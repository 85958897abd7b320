//! The `ibm_logs_dashboard` resource.
//!
//! A dashboard is declared as a flat attribute tree (the shape configuration
//! and state use) and sent to Cloud Logs as a deeply nested JSON document full
//! of tagged unions. This crate bridges the two with one generic engine:
//!
//! - [`schema`]: declarative schema tables, including the dashboard table
//! - [`codec`]: flat ⇄ wire conversion driven by a schema table
//! - [`validate`]: plan-time diagnostics with attribute paths
//! - [`resource`]: create / read / update / delete / import lifecycle
//! - [`id`]: the `region/instance_id/dashboard_id` identifier
//! - [`state`]: stored resource data and change detection

pub mod codec;
pub mod error;
pub mod id;
pub mod resource;
pub mod schema;
pub mod state;
pub mod validate;

pub use codec::{FlatMap, expand, expand_typed, flatten, flatten_typed};
pub use error::{ConversionError, Operation, ResourceError, ResourceErrorKind, Result};
pub use id::{IdError, ResourceId};
pub use resource::{DashboardResource, Plan};
pub use schema::dashboard::{RESOURCE_TYPE, dashboard_schema};
pub use schema::{Attribute, AttributeType, BlockSchema, ResourceSchema, ValueType};
pub use state::ResourceData;
pub use validate::{Diagnostic, Diagnostics, Severity};
