use std::fs;
use tempfile::TempDir;
use vaultren_core::{
    get_candidates, get_plan, recompute, rename_all, EntryStatus, FsCatalog, FsMover,
    InvalidReason, OutcomeStatus, Settings, ViewType,
};

fn write(root: &std::path::Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

#[tokio::test]
async fn test_folder_rename_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "notes/a.md", "first");
    write(root, "notes/b.md", "second");
    write(root, "other/a.md", "untouched");

    let settings = Settings {
        view_type: ViewType::Folder,
        folder_name: "notes".to_string(),
        existing_symbol: "a".to_string(),
        replace_pattern: "z".to_string(),
        ..Settings::default()
    };
    let catalog = FsCatalog::open(root).unwrap();

    let outcome = get_candidates(&settings, &catalog);
    assert!(outcome.error.is_none());
    let (plan, error) = get_plan(&outcome.candidates, &settings);
    assert!(error.is_none());

    let entries: Vec<_> = plan
        .entries
        .iter()
        .map(|e| (e.proposed.as_str(), e.status))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("notes/z.md", EntryStatus::Valid),
            ("notes/b.md", EntryStatus::Valid),
        ]
    );

    let report = rename_all(&plan, &FsMover::new(root)).await;
    let statuses: Vec<_> = report.outcomes.iter().map(|o| o.status.clone()).collect();
    assert_eq!(
        statuses,
        vec![OutcomeStatus::Succeeded, OutcomeStatus::Succeeded]
    );

    assert_eq!(fs::read_to_string(root.join("notes/z.md")).unwrap(), "first");
    assert_eq!(fs::read_to_string(root.join("notes/b.md")).unwrap(), "second");
    assert_eq!(fs::read_to_string(root.join("other/a.md")).unwrap(), "untouched");
}

#[tokio::test]
async fn test_tag_selection_reads_frontmatter_and_inline_tags() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "one.md", "---\ntags: [project, draft]\n---\nbody");
    write(root, "two.md", "Some text #draft here");
    write(root, "three.md", "no tags at all");

    let settings = Settings {
        view_type: ViewType::Tags,
        tags: vec!["#draft".to_string()],
        existing_symbol: ".md".to_string(),
        replace_pattern: " (draft).md".to_string(),
        ..Settings::default()
    };
    let catalog = FsCatalog::open(root).unwrap();
    let preview = recompute(&settings, &catalog);

    let proposed: Vec<_> = preview
        .plan
        .entries
        .iter()
        .map(|e| e.proposed.as_str())
        .collect();
    assert_eq!(proposed, vec!["one (draft).md", "two (draft).md"]);

    let report = rename_all(&preview.plan, &FsMover::new(root)).await;
    assert_eq!(report.summary(), "2 succeeded, 0 failed, 0 skipped");
    assert!(root.join("one (draft).md").exists());
    assert!(root.join("three.md").exists());
}

#[tokio::test]
async fn test_blocked_entries_are_never_moved() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "inbox/xy.md", "1");
    write(root, "inbox/yx.md", "2");
    write(root, "inbox/x.md", "3");

    let settings = Settings {
        folder_name: "inbox".to_string(),
        existing_symbol: "x".to_string(),
        replace_pattern: "y".to_string(),
        ..Settings::default()
    };
    let catalog = FsCatalog::open(root).unwrap();
    let preview = recompute(&settings, &catalog);

    let reasons: Vec<_> = preview
        .plan
        .entries
        .iter()
        .map(|e| (e.original.as_str(), e.invalid_reason()))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("inbox/x.md", None),
            ("inbox/xy.md", Some(InvalidReason::Collision)),
            ("inbox/yx.md", Some(InvalidReason::Collision)),
        ]
    );

    let report = rename_all(&preview.plan, &FsMover::new(root)).await;
    assert_eq!(report.summary(), "1 succeeded, 0 failed, 2 skipped");
    assert!(root.join("inbox/y.md").exists());
    assert!(root.join("inbox/xy.md").exists());
    assert!(root.join("inbox/yx.md").exists());
}

#[test]
fn test_regexp_selection_with_bad_flag_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "a.md", "");

    let mut settings = Settings {
        view_type: ViewType::RegExp,
        ..Settings::default()
    };
    settings.reg_exp_state.reg_exp = "a".to_string();
    settings.reg_exp_state.flags = vec!["z".to_string()];

    let catalog = FsCatalog::open(root).unwrap();
    let preview = recompute(&settings, &catalog);
    assert!(preview.plan.is_empty());
    assert_eq!(
        preview.error.map(|e| e.to_string()).as_deref(),
        Some("unsupported regular expression flag 'z'")
    );
}
