use anyhow::Result;
use std::path::Path;
use vaultren_core::{flags_operation, settings_operation, OutputFormatter, SettingsChange};

use crate::OutputFormat;

pub fn handle_settings(vault: &Path, change: SettingsChange, output: OutputFormat) -> Result<()> {
    let result = settings_operation(vault, change)?;
    print!("{}", result.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Without an argument, list the supported flags; with one, store it
pub fn handle_flags(vault: &Path, flags: Option<String>, output: OutputFormat) -> Result<()> {
    match flags {
        Some(flags) => handle_settings(vault, SettingsChange::Flags(flags), output),
        None => {
            print!("{}", flags_operation().format(output.into()));
            if output == OutputFormat::Json {
                println!();
            }
            Ok(())
        },
    }
}
