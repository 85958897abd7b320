//! Plan command: show what `apply` would do.

use anyhow::{Context, Result};
use cloudlogs_provider::Plan;
use serde_json::{Value, json};
use std::path::Path;

use crate::formatters::{OutputFormat, output_result};

pub(crate) fn plan_json(plan: &Plan) -> Value {
    match plan {
        Plan::Create => json!({ "action": "create" }),
        Plan::Update { changed } => json!({ "action": "update", "changed": changed }),
        Plan::Replace { changed } => json!({ "action": "replace", "changed": changed }),
        Plan::NoOp => json!({ "action": "none" }),
    }
}

pub fn run(file: &Path, state: &Path, output_format: OutputFormat) -> Result<()> {
    let resource = super::dashboard_resource()?;
    let config = super::load_configuration(file)?;
    let prior = super::load_state(state)?;

    let plan = resource
        .plan(prior.as_ref(), &config)
        .with_context(|| format!("Failed to plan {}", file.display()))?;

    let mut report = plan_json(&plan);
    if let Some(id) = prior.as_ref().and_then(|prior| prior.id()) {
        report["id"] = json!(id);
    }
    output_result(&report, output_format)
}
