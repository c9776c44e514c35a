use crate::operations::PlanPreview;
use nu_ansi_term::{Color as AnsiColor, Style};
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Paint the old and new name, highlighting the characters that differ
fn highlight_pair(old: &str, new: &str) -> (String, String) {
    let removed = Style::new().fg(AnsiColor::Red);
    let removed_strong = Style::new().on(AnsiColor::Red).fg(AnsiColor::White);
    let added = Style::new().fg(AnsiColor::Green);
    let added_strong = Style::new().on(AnsiColor::Green).fg(AnsiColor::Black);

    let mut old_line = removed.paint("--- ").to_string();
    let mut new_line = added.paint("+++ ").to_string();

    // Paint runs of equal tags at once rather than char by char
    let diff = TextDiff::from_chars(old, new);
    let mut run = String::new();
    let mut run_tag: Option<ChangeTag> = None;
    let mut flush = |tag: Option<ChangeTag>, run: &mut String| {
        match tag {
            Some(ChangeTag::Equal) => {
                old_line.push_str(&removed.paint(run.as_str()).to_string());
                new_line.push_str(&added.paint(run.as_str()).to_string());
            },
            Some(ChangeTag::Delete) => {
                old_line.push_str(&removed_strong.paint(run.as_str()).to_string());
            },
            Some(ChangeTag::Insert) => {
                new_line.push_str(&added_strong.paint(run.as_str()).to_string());
            },
            None => {},
        }
        run.clear();
    };

    for change in diff.iter_all_changes() {
        if run_tag != Some(change.tag()) {
            flush(run_tag, &mut run);
            run_tag = Some(change.tag());
        }
        run.push_str(change.value());
    }
    flush(run_tag, &mut run);

    (old_line, new_line)
}

/// Render each rename as an old/new line pair
pub fn render_diff(preview: &PlanPreview, use_color: bool) -> String {
    let mut output = String::new();

    if let Some(error) = &preview.error {
        let message = format!("Pattern error: {}", error);
        if use_color {
            writeln!(output, "{}", AnsiColor::Red.bold().paint(message)).unwrap();
        } else {
            writeln!(output, "{}", message).unwrap();
        }
        writeln!(output).unwrap();
    }

    let mut shown = 0;
    for entry in &preview.plan.entries {
        if let Some(reason) = entry.invalid_reason() {
            let line = format!("! {} -> {} (blocked: {})", entry.original, entry.proposed, reason);
            if use_color {
                writeln!(output, "{}", AnsiColor::Yellow.paint(line)).unwrap();
            } else {
                writeln!(output, "{}", line).unwrap();
            }
            shown += 1;
            continue;
        }
        if !entry.is_change() {
            continue;
        }

        if use_color {
            let (old, new) = highlight_pair(&entry.original, &entry.proposed);
            writeln!(output, "{}", old).unwrap();
            writeln!(output, "{}", new).unwrap();
        } else {
            writeln!(output, "--- {}", entry.original).unwrap();
            writeln!(output, "+++ {}", entry.proposed).unwrap();
        }
        shown += 1;
    }

    if shown == 0 {
        writeln!(output, "No renames.").unwrap();
    }
    output
}
