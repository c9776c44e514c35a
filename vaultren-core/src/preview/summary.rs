use crate::operations::PlanPreview;
use crate::selector::Selection;
use std::fmt::Write;

/// Render the plan as a plain, line-oriented summary
pub fn render_summary(preview: &PlanPreview) -> String {
    let mut output = String::new();
    let plan = &preview.plan;

    writeln!(output, "[PLAN SUMMARY]").unwrap();
    match &preview.selection {
        Selection::Folder { folder } => writeln!(output, "Folder: {}", folder).unwrap(),
        Selection::Tags { tags } => writeln!(output, "Tags: {}", tags.join(", ")).unwrap(),
        Selection::RegExp { source, flags } => {
            writeln!(output, "Pattern: /{}/{}", source, flags.concat()).unwrap();
        },
    }
    writeln!(output, "Existing: {}", preview.existing_symbol).unwrap();
    writeln!(output, "Replace: {}", preview.replace_pattern).unwrap();
    writeln!(output, "Candidates: {}", plan.len()).unwrap();
    writeln!(output, "Blocked: {}", plan.invalid_count()).unwrap();
    if let Some(error) = &preview.error {
        writeln!(output, "Error: {}", error).unwrap();
    }
    writeln!(output).unwrap();

    let renames: Vec<_> = plan.renames().collect();
    if !renames.is_empty() {
        writeln!(output, "[RENAMES]").unwrap();
        for entry in renames {
            writeln!(output, "{} -> {}", entry.original, entry.proposed).unwrap();
        }
        writeln!(output).unwrap();
    }

    let blocked: Vec<_> = plan.entries.iter().filter(|e| !e.is_valid()).collect();
    if !blocked.is_empty() {
        writeln!(output, "[BLOCKED]").unwrap();
        for entry in blocked {
            if let Some(reason) = entry.invalid_reason() {
                writeln!(output, "{} -> {}: {}", entry.original, entry.proposed, reason).unwrap();
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::fixtures::sample_preview;

    #[test]
    fn test_render_summary() {
        let output = render_summary(&sample_preview());
        assert!(output.starts_with("[PLAN SUMMARY]\nFolder: notes\n"));
        assert!(output.contains("Existing: draft\nReplace: final\n"));
        assert!(output.contains("Candidates: 3\nBlocked: 1\n"));
        assert!(output.contains("[RENAMES]\nnotes/draft one.md -> notes/final one.md\n"));
        assert!(output.contains("[BLOCKED]\nnotes/draft?.md -> notes/final?.md: illegal character"));
        assert!(!output.contains("keep.md"));
    }

    #[test]
    fn test_render_summary_regexp_selection() {
        let mut preview = sample_preview();
        preview.selection = Selection::RegExp {
            source: "^draft".to_string(),
            flags: vec!["i".to_string()],
        };
        let output = render_summary(&preview);
        assert!(output.contains("Pattern: /^draft/i\n"));
    }
}
