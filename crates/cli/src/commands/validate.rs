//! Validate command implementation.
//!
//! Responsibilities:
//! - Check a configuration file against the schema without network access.
//! - Report every finding with its attribute path.
//!
//! Invariants:
//! - Errors fail the command with the validation exit code; warnings do not.

use anyhow::{Context, Result};
use cloudlogs_provider::{Diagnostic, Operation, ResourceError, ResourceErrorKind, Severity};
use serde_json::{Value, json};
use std::path::Path;
use tracing::info;

use crate::formatters::{OutputFormat, output_result};

fn diagnostic_json(diagnostic: &Diagnostic) -> Value {
    let severity = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    json!({
        "severity": severity,
        "path": diagnostic.path,
        "summary": diagnostic.summary,
    })
}

pub fn run(file: &Path, output_format: OutputFormat) -> Result<()> {
    info!(file = %file.display(), "Validating configuration");

    let resource = super::dashboard_resource()?;
    let config = super::load_configuration(file)?;
    let diagnostics = resource.validate(&config);

    if diagnostics.has_errors() {
        let error = ResourceError::new(
            resource.schema().type_name,
            Operation::Plan,
            ResourceErrorKind::Validation(diagnostics),
        );
        return Err(error).with_context(|| format!("{} is not valid", file.display()));
    }

    for warning in diagnostics.warnings() {
        eprintln!("{warning}");
    }

    let report = json!({
        "valid": true,
        "diagnostics": diagnostics.iter().map(diagnostic_json).collect::<Vec<_>>(),
    });
    output_result(&report, output_format)
}
