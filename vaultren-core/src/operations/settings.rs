use crate::flags::all_flags;
use crate::output::{FlagItem, FlagsResult, SettingsResult};
use crate::settings::{JsonSettingsStore, SettingsState, ViewType};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const VAULTREN_DIR_NAME: &str = ".vaultren";

pub fn vaultren_dir(vault_root: &Path) -> PathBuf {
    vault_root.join(VAULTREN_DIR_NAME)
}

/// Load the settings of a vault, defaults included
pub fn open_settings(vault_root: &Path) -> Result<SettingsState<JsonSettingsStore>> {
    let store = JsonSettingsStore::in_dir(&vaultren_dir(vault_root));
    SettingsState::load(store).context("Failed to load vault settings")
}

/// One edit to the settings document, as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsChange {
    Show,
    Mode(ViewType),
    Folder(String),
    Tags(String),
    RegExp {
        source: String,
        flags: Option<String>,
    },
    Flags(String),
    Existing(String),
    Replace(String),
}

/// Apply `change` to the vault settings and persist it
pub fn settings_operation(vault_root: &Path, change: SettingsChange) -> Result<SettingsResult> {
    let mut state = open_settings(vault_root)?;

    let changed = match change {
        SettingsChange::Show => None,
        SettingsChange::Mode(view_type) => {
            state.set_view_type(view_type)?;
            Some(format!("Mode set to {}", view_type.as_str()))
        },
        SettingsChange::Folder(folder) => {
            state.set_folder_name(&folder)?;
            Some(format!("Folder set to '{}'", folder))
        },
        SettingsChange::Tags(input) => {
            state.set_tags_input(&input)?;
            Some(format!("Tags set to [{}]", state.settings().tags.join(", ")))
        },
        SettingsChange::RegExp { source, flags } => {
            state.set_reg_exp(&source)?;
            if let Some(flags) = flags {
                state.set_flags_input(&flags)?;
            }
            let settings = state.settings();
            Some(format!(
                "Pattern set to /{}/{}",
                settings.reg_exp_state.reg_exp,
                settings.reg_exp_state.flags.concat()
            ))
        },
        SettingsChange::Flags(flags) => {
            state.set_flags_input(&flags)?;
            Some(format!(
                "Flags set to '{}'",
                state.settings().reg_exp_state.flags.concat()
            ))
        },
        SettingsChange::Existing(symbol) => {
            state.set_existing_symbol(&symbol)?;
            Some(format!("Existing symbol set to '{}'", symbol))
        },
        SettingsChange::Replace(pattern) => {
            state.set_replace_pattern(&pattern)?;
            Some(format!("Replacement set to '{}'", pattern))
        },
    };

    Ok(SettingsResult {
        settings: state.snapshot(),
        changed,
    })
}

/// The flags the pattern engine accepts
pub fn flags_operation() -> FlagsResult {
    FlagsResult {
        flags: all_flags()
            .iter()
            .map(|spec| FlagItem {
                flag: spec.ch.to_string(),
                label: spec.label.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SETTINGS_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_changes_are_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        settings_operation(root, SettingsChange::Mode(ViewType::RegExp)).unwrap();
        settings_operation(
            root,
            SettingsChange::RegExp {
                source: "^draft".to_string(),
                flags: Some("ii".to_string()),
            },
        )
        .unwrap();
        let result = settings_operation(root, SettingsChange::Show).unwrap();

        assert!(result.changed.is_none());
        assert_eq!(result.settings.view_type, ViewType::RegExp);
        assert_eq!(result.settings.reg_exp_state.reg_exp, "^draft");
        assert_eq!(result.settings.reg_exp_state.flags, vec!["i".to_string()]);

        let stored = fs::read_to_string(vaultren_dir(root).join(SETTINGS_FILE_NAME)).unwrap();
        assert!(stored.contains("\"viewType\": \"regexp\""));
    }

    #[test]
    fn test_mode_change_keeps_other_parameters() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        settings_operation(root, SettingsChange::Folder("notes".to_string())).unwrap();
        settings_operation(root, SettingsChange::Tags("a, b".to_string())).unwrap();
        let result = settings_operation(root, SettingsChange::Mode(ViewType::Tags)).unwrap();

        assert_eq!(result.changed.as_deref(), Some("Mode set to tags"));
        assert_eq!(result.settings.folder_name, "notes");
        assert_eq!(result.settings.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_flags_operation_lists_registry() {
        let result = flags_operation();
        assert!(result.flags.iter().any(|f| f.flag == "i"));
        assert_eq!(result.flags.len(), all_flags().len());
    }
}
