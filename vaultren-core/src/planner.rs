use crate::catalog::{join_path, CandidateFile};
use crate::pattern::{compile_entries, CompileError, Matcher};
use crate::settings::{Settings, ViewType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Characters no file name may contain on any platform the vault syncs to
pub const ILLEGAL_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Device names Windows refuses as a file stem, whatever the extension
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// How the existing symbol in a file name is rewritten
#[derive(Debug, Clone)]
pub enum RenameRule {
    /// No existing symbol: every name is kept as is
    PassThrough,
    /// Replace every literal occurrence of `search`
    Literal { search: String, replace: String },
    /// Replace every match, expanding group references in `template`
    Pattern { matcher: Matcher, template: String },
}

impl RenameRule {
    pub fn literal(search: &str, replace: &str) -> Self {
        if search.is_empty() {
            Self::PassThrough
        } else {
            Self::Literal {
                search: search.to_string(),
                replace: replace.to_string(),
            }
        }
    }

    /// The rule the settings describe. In RegExp mode the existing symbol is
    /// compiled with the selection flags; the other modes treat it literally.
    pub fn from_settings(settings: &Settings) -> Result<Self, CompileError> {
        if settings.existing_symbol.is_empty() {
            return Ok(Self::PassThrough);
        }

        match settings.view_type {
            ViewType::Folder | ViewType::Tags => Ok(Self::literal(
                &settings.existing_symbol,
                &settings.replace_pattern,
            )),
            ViewType::RegExp => {
                let matcher =
                    compile_entries(&settings.existing_symbol, &settings.reg_exp_state.flags)?;
                Ok(Self::Pattern {
                    matcher,
                    template: settings.replace_pattern.clone(),
                })
            },
        }
    }

    pub fn rename(&self, name: &str) -> String {
        match self {
            Self::PassThrough => name.to_string(),
            Self::Literal { search, replace } => name.replace(search.as_str(), replace),
            Self::Pattern { matcher, template } => matcher.replace_all(name, template).into_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    EmptyName,
    Collision,
    IllegalCharacter,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyName => "empty name",
            Self::Collision => "collision",
            Self::IllegalCharacter => "illegal character",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum EntryStatus {
    Valid,
    Invalid(InvalidReason),
}

/// One proposed rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Position of the candidate this entry was computed from
    pub index: usize,
    pub original: String,
    pub proposed: String,
    #[serde(flatten)]
    pub status: EntryStatus,
}

impl PlanEntry {
    pub fn is_valid(&self) -> bool {
        self.status == EntryStatus::Valid
    }

    pub fn is_change(&self) -> bool {
        self.original != self.proposed
    }

    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self.status {
            EntryStatus::Valid => None,
            EntryStatus::Invalid(reason) => Some(reason),
        }
    }
}

/// Proposed renames in candidate discovery order, blocked entries included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.len() - self.valid_count()
    }

    /// Valid entries whose path actually changes
    pub fn rename_count(&self) -> usize {
        self.renames().count()
    }

    pub fn renames(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.is_valid() && e.is_change())
    }
}

/// Compute the proposed path of every candidate. Pure: the same inputs
/// always give the same plan.
///
/// Only the file name is rewritten; the directory is kept. Checks run in
/// order (empty name, collision, illegal character) and the first failure is
/// recorded.
pub fn plan(candidates: &[CandidateFile], rule: &RenameRule) -> Plan {
    let mut entries: Vec<PlanEntry> = Vec::with_capacity(candidates.len());
    let mut names: Vec<String> = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        let name = rule.rename(&candidate.name);
        let proposed = match rule {
            RenameRule::PassThrough => candidate.path.clone(),
            _ => join_path(candidate.parent(), &name),
        };
        let status = if name.trim().is_empty() {
            EntryStatus::Invalid(InvalidReason::EmptyName)
        } else {
            EntryStatus::Valid
        };

        entries.push(PlanEntry {
            index,
            original: candidate.path.clone(),
            proposed,
            status,
        });
        names.push(name);
    }

    mark_collisions(&mut entries);

    for (entry, name) in entries.iter_mut().zip(&names) {
        if entry.is_valid() && is_illegal_name(name) {
            entry.status = EntryStatus::Invalid(InvalidReason::IllegalCharacter);
        }
    }

    Plan { entries }
}

/// Two still-valid entries that land on one path collide unless they are
/// the same source file
fn mark_collisions(entries: &mut [PlanEntry]) {
    let mut by_target: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, entry) in entries.iter().enumerate() {
        if entry.is_valid() {
            by_target.entry(entry.proposed.as_str()).or_default().push(i);
        }
    }

    let mut colliding: Vec<usize> = by_target
        .into_values()
        .filter(|group| {
            group
                .iter()
                .any(|&i| entries[i].original != entries[group[0]].original)
        })
        .flatten()
        .collect();
    colliding.sort_unstable();

    for i in colliding {
        entries[i].status = EntryStatus::Invalid(InvalidReason::Collision);
    }
}

pub fn has_illegal_character(name: &str) -> bool {
    name.chars()
        .any(|c| ILLEGAL_NAME_CHARS.contains(&c) || c.is_control())
}

/// A name the host cannot create as a file: illegal characters, `.` and
/// `..`, a reserved device stem, or a trailing dot or space
pub fn is_illegal_name(name: &str) -> bool {
    if has_illegal_character(name) || name == "." || name == ".." {
        return true;
    }
    if name.ends_with('.') || name.ends_with(' ') {
        return true;
    }
    let stem = name.split('.').next().unwrap_or(name).to_uppercase();
    RESERVED_NAMES.contains(&stem.as_str())
}
