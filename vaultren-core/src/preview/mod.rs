mod diff;
mod summary;
mod table;

pub use diff::render_diff;
pub use summary::render_summary;
pub use table::render_table;

use crate::operations::PlanPreview;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Diff,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "diff" => Ok(Self::Diff),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render a recomputed plan in the given format
pub fn render_preview(preview: &PlanPreview, format: Preview, use_color: Option<bool>) -> String {
    let use_color = format != Preview::Json && should_use_color(use_color);

    match format {
        Preview::Table => render_table(preview, use_color),
        Preview::Diff => render_diff(preview, use_color),
        Preview::Summary => render_summary(preview),
        Preview::Json => serde_json::to_string_pretty(preview).unwrap_or_default(),
        Preview::None => String::new(),
    }
}

/// Write a preview to stdout
pub fn write_preview(preview: &PlanPreview, format: Preview, use_color: Option<bool>) -> Result<()> {
    let output = render_preview(preview, format, use_color);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}
