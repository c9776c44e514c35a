use super::{extract_tags, CandidateFile, FileCatalog};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// A snapshot of the files below a vault root.
///
/// The tree is walked once when the catalog is opened, in file-name order,
/// so every selection pass over the same catalog sees the same files in the
/// same order. Hidden entries (including `.vaultren/`) are skipped.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    files: Vec<CandidateFile>,
}

impl FsCatalog {
    pub fn open(root: &Path) -> Result<Self> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry =
                entry.with_context(|| format!("Failed to walk vault at {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(path) = vault_path(root, entry.path()) else {
                tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 path");
                continue;
            };

            let tags = if is_markdown(entry.path()) {
                match fs::read_to_string(entry.path()) {
                    Ok(content) => extract_tags(&content),
                    Err(e) => {
                        tracing::debug!(path = %path, error = %e, "could not read tags");
                        Vec::new()
                    },
                }
            } else {
                Vec::new()
            };

            files.push(CandidateFile::new(path).with_tags(tags));
        }

        tracing::debug!(root = %root.display(), files = files.len(), "opened vault catalog");

        Ok(Self {
            files,
        })
    }
}

impl FileCatalog for FsCatalog {
    fn list_files(&self) -> Vec<CandidateFile> {
        self.files.clone()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Vault-relative, `/`-separated form of an on-disk path
fn vault_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut segments = Vec::new();
    for component in relative.components() {
        segments.push(component.as_os_str().to_str()?);
    }
    Some(segments.join("/"))
}
