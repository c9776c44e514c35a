use super::recompute::{recompute, PlanPreview};
use super::settings::open_settings;
use crate::catalog::FsCatalog;
use crate::output::PreviewResult;
use crate::preview::{render_preview, Preview};
use anyhow::Result;
use std::path::Path;

/// Recompute the plan of a vault from its stored settings
pub fn load_preview(vault_root: &Path) -> Result<PlanPreview> {
    let settings = open_settings(vault_root)?.snapshot();
    let catalog = FsCatalog::open(vault_root)?;
    Ok(recompute(&settings, &catalog))
}

/// High-level preview operation - equivalent to `vaultren preview`.
///
/// Returns the result summary and the rendered preview, if any.
pub fn preview_operation(
    vault_root: &Path,
    format: Preview,
    use_color: Option<bool>,
    include_plan: bool,
) -> Result<(PreviewResult, Option<String>)> {
    let preview = load_preview(vault_root)?;

    let rendered = match format {
        Preview::None => None,
        format => Some(render_preview(&preview, format, use_color)),
    };

    let plan = &preview.plan;
    let result = PreviewResult {
        mode: preview.selection.view_type(),
        candidates: plan.len(),
        valid: plan.valid_count(),
        blocked: plan.invalid_count(),
        changes: plan.rename_count(),
        error: preview.error.as_ref().map(ToString::to_string),
        plan: include_plan.then(|| preview.plan.clone()),
    };

    Ok((result, rendered))
}
