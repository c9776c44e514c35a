use crate::catalog::{CandidateFile, FileCatalog};
use crate::pattern::{compile_entries, CompileError};
use crate::settings::{Settings, ViewType};
use serde::Serialize;

/// The active selection mode together with only the parameters it reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Selection {
    Folder { folder: String },
    Tags { tags: Vec<String> },
    RegExp { source: String, flags: Vec<String> },
}

impl Selection {
    /// Snapshot the parameters of the mode `settings` has active
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.view_type {
            ViewType::Folder => Self::Folder {
                folder: settings.folder_name.clone(),
            },
            ViewType::Tags => Self::Tags {
                tags: settings.tags.clone(),
            },
            ViewType::RegExp => Self::RegExp {
                source: settings.reg_exp_state.reg_exp.clone(),
                flags: settings.reg_exp_state.flags.clone(),
            },
        }
    }

    pub fn view_type(&self) -> ViewType {
        match self {
            Self::Folder { .. } => ViewType::Folder,
            Self::Tags { .. } => ViewType::Tags,
            Self::RegExp { .. } => ViewType::RegExp,
        }
    }
}

/// Result of one selection pass. A compile error in RegExp mode leaves the
/// candidate list empty and is kept here for display.
#[derive(Debug, Clone, Default)]
pub struct SelectionOutcome {
    pub candidates: Vec<CandidateFile>,
    pub error: Option<CompileError>,
}

impl SelectionOutcome {
    fn found(candidates: Vec<CandidateFile>) -> Self {
        Self {
            candidates,
            error: None,
        }
    }
}

pub fn select(selection: &Selection, catalog: &dyn FileCatalog) -> SelectionOutcome {
    let outcome = match selection {
        Selection::Folder { folder } => SelectionOutcome::found(select_by_folder(folder, catalog)),
        Selection::Tags { tags } => SelectionOutcome::found(select_by_tags(tags, catalog)),
        Selection::RegExp { source, flags } => match select_by_regexp(source, flags, catalog) {
            Ok(candidates) => SelectionOutcome::found(candidates),
            Err(error) => {
                tracing::warn!(source = %source, %error, "pattern did not compile");
                SelectionOutcome {
                    candidates: Vec::new(),
                    error: Some(error),
                }
            },
        },
    };

    tracing::debug!(
        mode = ?selection.view_type(),
        candidates = outcome.candidates.len(),
        "selection pass"
    );
    outcome
}

/// Every file below `folder`. An empty folder selects nothing.
pub fn select_by_folder(folder: &str, catalog: &dyn FileCatalog) -> Vec<CandidateFile> {
    if folder.trim().is_empty() {
        return Vec::new();
    }
    catalog.files_under_folder(folder)
}

/// Every file carrying at least one of `tags`. A blank list selects nothing.
pub fn select_by_tags(tags: &[String], catalog: &dyn FileCatalog) -> Vec<CandidateFile> {
    let tags: Vec<String> = tags
        .iter()
        .map(|t| crate::catalog::normalize_tag(t).to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        return Vec::new();
    }
    catalog.files_with_any_tag(&tags)
}

/// Every file whose name matches the compiled pattern. An empty source
/// compiles to a matcher that selects nothing.
pub fn select_by_regexp(
    source: &str,
    flags: &[String],
    catalog: &dyn FileCatalog,
) -> Result<Vec<CandidateFile>, CompileError> {
    let matcher = compile_entries(source, flags)?;
    if !matcher.is_active() {
        return Ok(Vec::new());
    }

    Ok(catalog
        .list_files()
        .into_iter()
        .filter(|file| matcher.test(&file.name))
        .collect())
}

/// Split user input such as `"a, b,c"` into tags. All whitespace is removed
/// before splitting and empty items are dropped.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    stripped
        .split(',')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
