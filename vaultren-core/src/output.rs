use crate::planner::Plan;
use crate::renamer::RenameReport;
use crate::settings::{Settings, ViewType};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a preview operation
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub mode: ViewType,
    pub candidates: usize,
    pub valid: usize,
    pub blocked: usize,
    pub changes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

/// Result of an apply operation
#[derive(Debug, Serialize)]
pub struct ApplyResult {
    pub report: RenameReport,
}

impl ApplyResult {
    pub fn has_failures(&self) -> bool {
        self.report.failed() > 0
    }
}

/// The settings document after a command read or changed it
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResult {
    pub settings: Settings,
    /// The change made, if the command made one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlagsResult {
    pub flags: Vec<FlagItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlagItem {
    pub flag: String,
    pub label: String,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.error.is_none(),
            "operation": "preview",
            "mode": self.mode,
            "summary": {
                "candidates": self.candidates,
                "valid": self.valid,
                "blocked": self.blocked,
                "changes": self.changes,
            },
            "error": self.error,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "{} candidates, {} to rename, {} blocked",
            self.candidates, self.changes, self.blocked
        )
        .unwrap();
        if let Some(error) = &self.error {
            writeln!(output, "Pattern error: {}", error).unwrap();
        }
        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": !self.has_failures(),
            "operation": "apply",
            "summary": {
                "succeeded": self.report.succeeded(),
                "failed": self.report.failed(),
                "skipped": self.report.skipped(),
            },
            "outcomes": self.report.outcomes,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        for outcome in &self.report.outcomes {
            if outcome.is_success() {
                if outcome.original != outcome.proposed {
                    writeln!(output, "✓ {} -> {}", outcome.original, outcome.proposed).unwrap();
                }
            } else if let crate::renamer::OutcomeStatus::Failed(reason) = &outcome.status {
                writeln!(output, "✗ {} ({})", outcome.original, reason).unwrap();
            }
        }
        writeln!(output, "{}", self.report.summary()).unwrap();
        output
    }
}

impl OutputFormatter for SettingsResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "settings",
            "changed": self.changed,
            "settings": self.settings,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let settings = &self.settings;
        let mut output = String::new();
        if let Some(changed) = &self.changed {
            writeln!(output, "✓ {}", changed).unwrap();
            return output;
        }

        writeln!(output, "Mode:            {}", settings.view_type.as_str()).unwrap();
        writeln!(output, "Folder:          {}", settings.folder_name).unwrap();
        writeln!(output, "Tags:            {}", settings.tags.join(", ")).unwrap();
        writeln!(
            output,
            "Pattern:         {}",
            settings.reg_exp_state.reg_exp
        )
        .unwrap();
        writeln!(
            output,
            "Flags:           {}",
            settings.reg_exp_state.flags.concat()
        )
        .unwrap();
        writeln!(output, "Existing symbol: {}", settings.existing_symbol).unwrap();
        writeln!(output, "Replacement:     {}", settings.replace_pattern).unwrap();
        output
    }
}

impl OutputFormatter for FlagsResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "flags",
            "flags": self.flags,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        for item in &self.flags {
            writeln!(output, "{}  {}", item.flag, item.label).unwrap();
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "name": self.name,
            "version": self.version,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
