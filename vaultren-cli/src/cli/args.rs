use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::{ModeArg, OutputFormat, PreviewArg};

/// Select vault files by folder, tag or pattern and batch rename them
#[derive(Parser, Debug)]
#[command(name = "vaultren")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Vault root holding the notes and the .vaultren directory
    #[arg(long, global = true, value_name = "PATH", env = "VAULTREN_VAULT")]
    pub vault: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the stored selection and rename settings
    Show {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Switch the active selection mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Set the folder whose files are selected in folder mode
    Folder {
        folder: String,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Set the tags selected in tags mode, as a comma-separated list
    Tags {
        #[arg(allow_hyphen_values = true)]
        tags: String,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Set the file name pattern used in regexp mode
    Regexp {
        #[arg(allow_hyphen_values = true)]
        pattern: String,

        /// Pattern flags, e.g. "im"
        #[arg(long)]
        flags: Option<String>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// List supported pattern flags, or set them when given
    Flags {
        /// New flags, e.g. "im"; pass "" to clear
        #[arg(allow_hyphen_values = true)]
        flags: Option<String>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Set the text (or pattern, in regexp mode) to replace in file names
    Existing {
        #[arg(allow_hyphen_values = true)]
        symbol: String,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Set the replacement text
    Replace {
        #[arg(allow_hyphen_values = true)]
        replacement: String,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show the renames the current settings would make
    Preview {
        /// Preview format (defaults to the configured one)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Rename every valid entry of the current plan
    Apply {
        /// Preview format shown before confirming
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes", env = "VAULTREN_YES")]
        yes: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
