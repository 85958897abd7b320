//! Composite resource identifier `region/instanceId/dashboardId`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const EXPECTED_FORMAT: &str = "<region>/<instance_id>/<dashboard_id>";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid id '{id}': expected {}", EXPECTED_FORMAT)]
pub struct IdError {
    pub id: String,
}

/// Identifier stored in state for one dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub region: String,
    pub instance_id: String,
    pub dashboard_id: String,
}

impl ResourceId {
    pub fn new(
        region: impl Into<String>,
        instance_id: impl Into<String>,
        dashboard_id: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            instance_id: instance_id.into(),
            dashboard_id: dashboard_id.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region, self.instance_id, self.dashboard_id)
    }
}

impl FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [region, instance_id, dashboard_id]
                if !region.is_empty() && !instance_id.is_empty() && !dashboard_id.is_empty() =>
            {
                Ok(Self::new(*region, *instance_id, *dashboard_id))
            }
            _ => Err(IdError { id: s.to_string() }),
        }
    }
}
