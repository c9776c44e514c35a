use crate::planner::{InvalidReason, Plan, PlanEntry};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure reported by the move primitive. The reason is opaque and shown
/// to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MoveError(pub String);

impl From<io::Error> for MoveError {
    fn from(err: io::Error) -> Self {
        Self(err.to_string())
    }
}

/// Moves one file to a new vault-relative path
#[async_trait]
pub trait MovePrimitive: Send + Sync {
    async fn move_path(&self, from: &str, to: &str) -> Result<(), MoveError>;
}

/// Moves files inside a vault directory on disk
#[derive(Debug, Clone)]
pub struct FsMover {
    root: PathBuf,
}

impl FsMover {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, vault_path: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(vault_path.split('/').filter(|s| !s.is_empty()));
        path
    }
}

#[async_trait]
impl MovePrimitive for FsMover {
    async fn move_path(&self, from: &str, to: &str) -> Result<(), MoveError> {
        let source = self.resolve(from);
        let target = self.resolve(to);

        if !tokio::fs::try_exists(&source).await? {
            return Err(MoveError(format!("{from} does not exist")));
        }
        if source == target {
            return Ok(());
        }
        if tokio::fs::try_exists(&target).await? {
            return Err(MoveError(format!("{to} already exists")));
        }

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::rename(&source, &target).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "lowercase")]
pub enum FailureReason {
    /// The entry was blocked in the plan and never attempted
    Skipped(InvalidReason),
    Move(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(_) => f.write_str("skipped: invalid"),
            Self::Move(reason) => f.write_str(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Succeeded,
    Failed(FailureReason),
}

/// What happened to one plan entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    pub index: usize,
    pub original: String,
    pub proposed: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl RenameOutcome {
    fn new(entry: &PlanEntry, status: OutcomeStatus) -> Self {
        Self {
            index: entry.index,
            original: entry.original.clone(),
            proposed: entry.proposed.clone(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(FailureReason::Skipped(_)))
    }
}

/// One outcome per plan entry, in plan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    pub outcomes: Vec<RenameOutcome>,
}

impl RenameReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Move failures, not counting skipped entries
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OutcomeStatus::Failed(FailureReason::Move(_))))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} failed, {} skipped",
            self.succeeded(),
            self.failed(),
            self.skipped()
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Append one timestamped line per entry to this file
    pub log_file: Option<PathBuf>,
}

struct ApplyLog {
    file: Option<File>,
}

impl ApplyLog {
    fn open(path: Option<&Path>) -> Self {
        let file = path.and_then(|path| {
            let opened = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| OpenOptions::new().create(true).append(true).open(path));
            match opened {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "apply log unavailable");
                    None
                },
            }
        });
        Self { file }
    }

    fn log(&mut self, message: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        let line = format!(
            "[{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        );
        let written = writeln!(file, "{line}").and_then(|()| file.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write apply log");
            self.file = None;
        }
    }
}

/// Execute a plan without an apply log
pub async fn execute(plan: &Plan, mover: &dyn MovePrimitive) -> RenameReport {
    execute_with_options(plan, mover, &ExecuteOptions::default()).await
}

/// Apply every valid entry in plan order, one move at a time.
///
/// A failed move is recorded and the batch carries on; invalid entries are
/// reported as skipped without touching the mover.
pub async fn execute_with_options(
    plan: &Plan,
    mover: &dyn MovePrimitive,
    options: &ExecuteOptions,
) -> RenameReport {
    let mut log = ApplyLog::open(options.log_file.as_deref());
    log.log(&format!("Starting batch of {} entries", plan.len()));

    let mut outcomes = Vec::with_capacity(plan.len());
    for entry in &plan.entries {
        if let Some(reason) = entry.invalid_reason() {
            log.log(&format!("SKIP {} ({})", entry.original, reason));
            outcomes.push(RenameOutcome::new(
                entry,
                OutcomeStatus::Failed(FailureReason::Skipped(reason)),
            ));
            continue;
        }

        let status = match mover.move_path(&entry.original, &entry.proposed).await {
            Ok(()) => {
                tracing::info!(from = %entry.original, to = %entry.proposed, "renamed");
                log.log(&format!("OK {} -> {}", entry.original, entry.proposed));
                OutcomeStatus::Succeeded
            },
            Err(e) => {
                tracing::warn!(from = %entry.original, to = %entry.proposed, error = %e, "rename failed");
                log.log(&format!("FAIL {} -> {}: {}", entry.original, entry.proposed, e));
                OutcomeStatus::Failed(FailureReason::Move(e.0))
            },
        };
        outcomes.push(RenameOutcome::new(entry, status));
    }

    let report = RenameReport { outcomes };
    log.log(&format!("Finished: {}", report.summary()));
    report
}
