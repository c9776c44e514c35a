use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use vaultren_core::operations::vaultren_dir;
use vaultren_core::{Config, OutputFormatter, Preview, SettingsChange, VersionResult};

mod apply;
mod cli;
mod preview;
mod settings;

use cli::{Cli, Commands, OutputFormat, PreviewArg};

fn main() {
    init_tracing();

    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    let vault = cli.vault.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = Config::load(&vaultren_dir(&vault)).unwrap_or_else(|e| {
        tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable config");
        Config::default()
    });
    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };

    let result = match cli.command {
        Commands::Show { output } => settings::handle_settings(&vault, SettingsChange::Show, output),
        Commands::Mode { mode, output } => {
            settings::handle_settings(&vault, SettingsChange::Mode(mode.into()), output)
        },
        Commands::Folder { folder, output } => {
            settings::handle_settings(&vault, SettingsChange::Folder(folder), output)
        },
        Commands::Tags { tags, output } => {
            settings::handle_settings(&vault, SettingsChange::Tags(tags), output)
        },
        Commands::Regexp {
            pattern,
            flags,
            output,
        } => settings::handle_settings(
            &vault,
            SettingsChange::RegExp {
                source: pattern,
                flags,
            },
            output,
        ),
        Commands::Flags { flags, output } => settings::handle_flags(&vault, flags, output),
        Commands::Existing { symbol, output } => {
            settings::handle_settings(&vault, SettingsChange::Existing(symbol), output)
        },
        Commands::Replace {
            replacement,
            output,
        } => settings::handle_settings(&vault, SettingsChange::Replace(replacement), output),
        Commands::Preview { preview, output } => preview::handle_preview(
            &vault,
            preview_format(preview, &config),
            output,
            use_color,
        ),
        Commands::Apply {
            preview,
            yes,
            output,
        } => apply::handle_apply(
            &vault,
            preview_format(preview, &config),
            yes,
            output,
            use_color,
        ),
        Commands::Version { output } => {
            handle_version(output);
            Ok(())
        },
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        },
    }
}

/// Diagnostics go to stderr so stdout stays parseable
fn init_tracing() {
    let filter = EnvFilter::try_from_env("VAULTREN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The preview format from the command line, else the configured default
fn preview_format(arg: Option<PreviewArg>, config: &Config) -> Preview {
    arg.map_or_else(
        || config.defaults.preview_format.parse().unwrap_or(Preview::Table),
        Into::into,
    )
}

fn handle_version(output: OutputFormat) {
    let version_result = VersionResult {
        name: "vaultren".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
}
