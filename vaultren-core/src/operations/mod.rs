//! High-level operations that correspond to CLI commands
//!
//! These modules hold the logic behind each vaultren command, separated from
//! CLI concerns like argument parsing and output formatting.

pub mod apply;
pub mod preview;
pub mod recompute;
pub mod settings;

pub use apply::apply_operation;
pub use preview::{load_preview, preview_operation};
pub use recompute::{get_candidates, get_plan, recompute, rename_all, PlanPreview};
pub use settings::{
    flags_operation, open_settings, settings_operation, vaultren_dir, SettingsChange,
};
