#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod catalog;
pub mod config;
pub mod flags;
pub mod lock;
pub mod operations;
pub mod output;
pub mod pattern;
pub mod planner;
pub mod preview;
pub mod renamer;
pub mod selector;
pub mod settings;

pub use catalog::{CandidateFile, FileCatalog, FsCatalog, MemoryCatalog};
pub use config::Config;
pub use flags::{all_flags, is_supported_flag, FlagSet, FlagSpec, UnsupportedFlag};
pub use lock::BatchLock;
pub use operations::{
    apply_operation, flags_operation, get_candidates, get_plan, load_preview, preview_operation,
    recompute, rename_all, settings_operation, PlanPreview, SettingsChange,
};
pub use output::{
    ApplyResult, FlagsResult, OutputFormat, OutputFormatter, PreviewResult, SettingsResult,
    VersionResult,
};
pub use pattern::{compile, compile_entries, CompileError, Matcher};
pub use planner::{plan, EntryStatus, InvalidReason, Plan, PlanEntry, RenameRule};
pub use preview::{render_preview, write_preview, Preview};
pub use renamer::{
    execute, execute_with_options, ExecuteOptions, FailureReason, FsMover, MoveError,
    MovePrimitive, OutcomeStatus, RenameOutcome, RenameReport,
};
pub use selector::{select, Selection, SelectionOutcome};
pub use settings::{
    JsonSettingsStore, MemorySettingsStore, Settings, SettingsError, SettingsState, SettingsStore,
    ViewType,
};
