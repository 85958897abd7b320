//! Schema command: print the resource schema table.

use anyhow::Result;

use crate::formatters::{OutputFormat, output_result};

pub fn run(output_format: OutputFormat) -> Result<()> {
    let resource = super::dashboard_resource()?;
    output_result(&resource.schema().describe(), output_format)
}
