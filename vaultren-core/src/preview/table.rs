use crate::operations::PlanPreview;
use crate::planner::PlanEntry;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

fn status_label(entry: &PlanEntry) -> (String, Color) {
    match entry.invalid_reason() {
        Some(reason) => (format!("blocked: {}", reason), Color::Red),
        None if entry.is_change() => ("rename".to_string(), Color::Green),
        None => ("unchanged".to_string(), Color::DarkGrey),
    }
}

/// Render the plan as one row per candidate
pub fn render_table(preview: &PlanPreview, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("File").fg(Color::Cyan),
            Cell::new("New path").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["File", "New path", "Status"]);
    }

    for entry in &preview.plan.entries {
        let (status, color) = status_label(entry);
        let target = if entry.is_change() {
            format!("→ {}", entry.proposed)
        } else {
            String::new()
        };

        if use_color {
            table.add_row(vec![
                Cell::new(&entry.original),
                Cell::new(&target).fg(Color::Magenta),
                Cell::new(&status).fg(color),
            ]);
        } else {
            table.add_row(vec![entry.original.as_str(), target.as_str(), status.as_str()]);
        }
    }

    let plan = &preview.plan;
    let totals = format!(
        "{} to rename, {} blocked",
        plan.rename_count(),
        plan.invalid_count()
    );
    let files = format!("{} files", plan.len());

    if use_color {
        table.add_row(vec![
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(&files).fg(Color::White),
            Cell::new(&totals).fg(Color::Yellow),
        ]);
    } else {
        table.add_row(vec!["─────────", "─────────", "─────────"]);
        table.add_row(vec!["TOTALS", files.as_str(), totals.as_str()]);
    }

    let mut output = table.to_string();
    if let Some(error) = &preview.error {
        output.push_str(&format!("\nPattern error: {}", error));
    }
    output.push('\n');
    output
}
