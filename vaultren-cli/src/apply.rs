use anyhow::{anyhow, Context, Result};
use std::io::{self, Write};
use std::path::Path;
use vaultren_core::{
    apply_operation, load_preview, write_preview, ApplyResult, OutputFormatter, Preview,
    RenameReport,
};

use crate::OutputFormat;

pub fn handle_apply(
    vault: &Path,
    format: Preview,
    yes: bool,
    output: OutputFormat,
    use_color: Option<bool>,
) -> Result<()> {
    let preview = load_preview(vault)?;
    if let Some(error) = &preview.error {
        return Err(anyhow!("Cannot apply while the pattern has an error: {}", error));
    }
    if preview.plan.is_empty() {
        if output == OutputFormat::Json {
            let result = ApplyResult {
                report: RenameReport::default(),
            };
            println!("{}", result.format_json());
        } else {
            println!("No files selected.");
        }
        return Ok(());
    }

    // Show the plan and get confirmation unless --yes flag is provided
    if !yes {
        write_preview(&preview, format, use_color)?;
        print!("Apply these renames? [y/N]: ");
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let result = runtime.block_on(apply_operation(vault, Some(&preview.plan)))?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    if result.has_failures() {
        return Err(anyhow!(
            "{} of {} renames failed",
            result.report.failed(),
            result.report.outcomes.len()
        ));
    }
    Ok(())
}
