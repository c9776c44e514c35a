//! The file catalog the selectors enumerate.
//!
//! Paths are vault-relative and always use `/` as the separator. A catalog is
//! read-only to this crate and is expected to stay consistent for the length
//! of one selection pass.

mod frontmatter;
mod fs;

pub use frontmatter::extract_tags;
pub use fs::FsCatalog;

use serde::{Deserialize, Serialize};

/// A file known to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Vault-relative path, e.g. `notes/daily/2024-05-01.md`
    pub path: String,
    /// Final path segment including any extension
    pub name: String,
    /// Tags without a leading `#`
    pub tags: Vec<String>,
}

impl CandidateFile {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_name(&path).to_string();
        Self {
            path,
            name,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(|t| normalize_tag(&t.into()).to_string())
            .collect();
        self
    }

    /// Directory portion of the path, empty for files at the vault root
    pub fn parent(&self) -> &str {
        parent_dir(&self.path)
    }
}

/// Read access to the files of a vault
pub trait FileCatalog {
    /// Every file, in the catalog's natural enumeration order
    fn list_files(&self) -> Vec<CandidateFile>;

    /// Files anywhere below `folder`, recursively
    fn files_under_folder(&self, folder: &str) -> Vec<CandidateFile> {
        self.list_files()
            .into_iter()
            .filter(|file| is_under_folder(&file.path, folder))
            .collect()
    }

    /// Files carrying at least one of `tags`
    fn files_with_any_tag(&self, tags: &[String]) -> Vec<CandidateFile> {
        self.list_files()
            .into_iter()
            .filter(|file| has_any_tag(file, tags))
            .collect()
    }
}

/// A catalog over a fixed list of files, used by tests and embedders that
/// already hold an index
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    files: Vec<CandidateFile>,
}

impl MemoryCatalog {
    pub fn new(files: Vec<CandidateFile>) -> Self {
        Self { files }
    }

    pub fn push(&mut self, file: CandidateFile) {
        self.files.push(file);
    }
}

impl FromIterator<CandidateFile> for MemoryCatalog {
    fn from_iter<T: IntoIterator<Item = CandidateFile>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FileCatalog for MemoryCatalog {
    fn list_files(&self) -> Vec<CandidateFile> {
        self.files.clone()
    }
}

/// Split a path into its meaningful segments, dropping empty and `.` parts
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty() && *segment != ".")
}

/// Case-sensitive prefix match on whole path segments. The file must sit
/// strictly below the folder, and an empty folder contains nothing.
pub fn is_under_folder(path: &str, folder: &str) -> bool {
    let folder: Vec<&str> = path_segments(folder).collect();
    if folder.is_empty() {
        return false;
    }

    let path: Vec<&str> = path_segments(path).collect();
    path.len() > folder.len() && path.iter().zip(&folder).all(|(a, b)| a == b)
}

pub fn normalize_tag(tag: &str) -> &str {
    tag.trim().trim_start_matches('#')
}

pub fn has_any_tag(file: &CandidateFile, tags: &[String]) -> bool {
    tags.iter().any(|wanted| {
        let wanted = normalize_tag(wanted);
        !wanted.is_empty() && file.tags.iter().any(|t| normalize_tag(t) == wanted)
    })
}

pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Join a directory and a file name with the vault separator
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
