use super::recompute::recompute;
use super::settings::{open_settings, vaultren_dir};
use crate::catalog::FsCatalog;
use crate::lock::BatchLock;
use crate::output::ApplyResult;
use crate::planner::Plan;
use crate::renamer::{execute_with_options, ExecuteOptions, FsMover, RenameReport};
use anyhow::{anyhow, Result};
use std::path::Path;

/// High-level apply operation - equivalent to `vaultren apply`.
///
/// The plan is recomputed under the batch lock. When `confirmed` is given
/// and the vault no longer produces that plan, nothing is moved.
pub async fn apply_operation(vault_root: &Path, confirmed: Option<&Plan>) -> Result<ApplyResult> {
    let vaultren_dir = vaultren_dir(vault_root);
    let lock = BatchLock::acquire(&vaultren_dir)?;

    let settings = open_settings(vault_root)?.snapshot();
    let catalog = FsCatalog::open(vault_root)?;
    let preview = recompute(&settings, &catalog);

    if let Some(error) = &preview.error {
        return Err(anyhow!("Cannot apply while the pattern has an error: {}", error));
    }
    if confirmed.is_some_and(|plan| *plan != preview.plan) {
        return Err(anyhow!(
            "The vault changed since the preview was shown. Run the command again."
        ));
    }

    let options = ExecuteOptions {
        log_file: Some(vaultren_dir.join("logs").join("apply.log")),
    };
    let mover = FsMover::new(vault_root);
    let report = execute_with_options(&preview.plan, &mover, &options).await;

    tracing::info!(summary = %report.summary(), "batch finished");
    Ok(finish_batch(lock, report))
}

/// Files have already moved, so a lock that cannot be released must not
/// hide the report
fn finish_batch(lock: BatchLock, report: RenameReport) -> ApplyResult {
    if let Err(error) = lock.release() {
        tracing::warn!(error = %format!("{error:#}"), "failed to release batch lock");
    }
    ApplyResult { report }
}
