use crate::catalog::{CandidateFile, FileCatalog};
use crate::pattern::CompileError;
use crate::planner::{plan, Plan, RenameRule};
use crate::renamer::{execute, MovePrimitive, RenameReport};
use crate::selector::{select, Selection, SelectionOutcome};
use crate::settings::Settings;
use serde::Serialize;

/// Everything a preview needs after one settings change: the selection that
/// produced the plan, the plan, and the compile error if any
#[derive(Debug, Clone, Serialize)]
pub struct PlanPreview {
    pub selection: Selection,
    pub existing_symbol: String,
    pub replace_pattern: String,
    pub plan: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CompileError>,
}

/// Candidates for the mode the settings have active
pub fn get_candidates(settings: &Settings, catalog: &dyn FileCatalog) -> SelectionOutcome {
    select(&Selection::from_settings(settings), catalog)
}

/// Plan renames for `candidates`.
///
/// When the rename pattern does not compile, every name is kept and the
/// error is returned alongside so the plan can still be shown.
pub fn get_plan(candidates: &[CandidateFile], settings: &Settings) -> (Plan, Option<CompileError>) {
    match RenameRule::from_settings(settings) {
        Ok(rule) => (plan(candidates, &rule), None),
        Err(error) => {
            tracing::warn!(symbol = %settings.existing_symbol, %error, "rename pattern did not compile");
            (plan(candidates, &RenameRule::PassThrough), Some(error))
        },
    }
}

pub async fn rename_all(plan: &Plan, mover: &dyn MovePrimitive) -> RenameReport {
    execute(plan, mover).await
}

/// Re-derive candidates and plan from the current settings. Runs after every
/// settings change; the selection error wins over the rename error.
pub fn recompute(settings: &Settings, catalog: &dyn FileCatalog) -> PlanPreview {
    let selection = Selection::from_settings(settings);
    let outcome = select(&selection, catalog);
    let (plan, rename_error) = get_plan(&outcome.candidates, settings);

    PlanPreview {
        selection,
        existing_symbol: settings.existing_symbol.clone(),
        replace_pattern: settings.replace_pattern.clone(),
        plan,
        error: outcome.error.or(rename_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::planner::{EntryStatus, InvalidReason};
    use crate::settings::ViewType;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new(vec![
            CandidateFile::new("notes/a.md").with_tags(["work"]),
            CandidateFile::new("notes/b.md"),
            CandidateFile::new("journal/2024-05-01.md").with_tags(["#daily"]),
        ])
    }

    #[test]
    fn test_folder_mode_literal_rename() {
        let settings = Settings {
            folder_name: "notes".to_string(),
            existing_symbol: "a".to_string(),
            replace_pattern: "z".to_string(),
            ..Settings::default()
        };

        let preview = recompute(&settings, &catalog());
        assert!(preview.error.is_none());
        let proposed: Vec<_> = preview
            .plan
            .entries
            .iter()
            .map(|e| (e.proposed.as_str(), e.status))
            .collect();
        assert_eq!(
            proposed,
            vec![
                ("notes/z.md", EntryStatus::Valid),
                ("notes/b.md", EntryStatus::Valid),
            ]
        );
    }

    #[test]
    fn test_tags_mode_selects_by_tag() {
        let settings = Settings {
            view_type: ViewType::Tags,
            tags: vec!["daily".to_string()],
            ..Settings::default()
        };

        let outcome = get_candidates(&settings, &catalog());
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].path, "journal/2024-05-01.md");
    }

    #[test]
    fn test_regexp_mode_uses_groups() {
        let mut settings = Settings {
            view_type: ViewType::RegExp,
            existing_symbol: r"(\d{4})-(\d{2})-(\d{2})".to_string(),
            replace_pattern: "$3.$2.$1".to_string(),
            ..Settings::default()
        };
        settings.reg_exp_state.reg_exp = r"^\d{4}".to_string();

        let preview = recompute(&settings, &catalog());
        assert_eq!(preview.plan.len(), 1);
        assert_eq!(preview.plan.entries[0].proposed, "journal/01.05.2024.md");
    }

    #[test]
    fn test_selection_error_is_reported_with_empty_plan() {
        let mut settings = Settings {
            view_type: ViewType::RegExp,
            ..Settings::default()
        };
        settings.reg_exp_state.reg_exp = "(".to_string();

        let preview = recompute(&settings, &catalog());
        assert!(preview.plan.is_empty());
        assert!(matches!(preview.error, Some(CompileError::SyntaxError(_))));
    }

    #[test]
    fn test_bad_rename_pattern_falls_back_to_pass_through() {
        let mut settings = Settings {
            view_type: ViewType::RegExp,
            existing_symbol: "[".to_string(),
            ..Settings::default()
        };
        settings.reg_exp_state.reg_exp = "md$".to_string();

        let candidates = get_candidates(&settings, &catalog()).candidates;
        let (plan, error) = get_plan(&candidates, &settings);
        assert!(error.is_some());
        assert_eq!(plan.len(), 3);
        assert!(plan.entries.iter().all(|e| !e.is_change()));
    }

    #[test]
    fn test_collision_is_blocked() {
        let catalog = MemoryCatalog::new(vec![
            CandidateFile::new("inbox/xy.md"),
            CandidateFile::new("inbox/yx.md"),
        ]);
        let settings = Settings {
            folder_name: "inbox".to_string(),
            existing_symbol: "x".to_string(),
            replace_pattern: "y".to_string(),
            ..Settings::default()
        };

        let preview = recompute(&settings, &catalog);
        assert_eq!(preview.plan.len(), 2);
        assert!(preview
            .plan
            .entries
            .iter()
            .all(|e| e.invalid_reason() == Some(InvalidReason::Collision)));
    }
}
