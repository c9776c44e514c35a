use anyhow::Result;
use std::path::Path;
use vaultren_core::{preview_operation, OutputFormatter, Preview};

use crate::OutputFormat;

pub fn handle_preview(
    vault: &Path,
    format: Preview,
    output: OutputFormat,
    use_color: Option<bool>,
) -> Result<()> {
    match output {
        OutputFormat::Json => {
            let (result, _) = preview_operation(vault, Preview::None, use_color, true)?;
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            let (result, rendered) = preview_operation(vault, format, use_color, false)?;
            if let Some(rendered) = rendered {
                print!("{}", rendered);
                if !rendered.ends_with('\n') {
                    println!();
                }
            }
            if format != Preview::Json {
                print!("{}", result.format_summary());
            }
        },
    }
    Ok(())
}
