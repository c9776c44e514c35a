use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn vaultren(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vaultren").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("VAULTREN_VAULT")
        .env_remove("VAULTREN_YES")
        .arg("--no-color");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    vaultren(dir).args(args).assert().success();
}

/// notes/a.md and notes/b.md, with folder mode renaming "a" to "z"
fn notes_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("notes/a.md").write_str("alpha").unwrap();
    dir.child("notes/b.md").write_str("beta").unwrap();
    run(&dir, &["folder", "notes"]);
    run(&dir, &["existing", "a"]);
    run(&dir, &["replace", "z"]);
    dir
}

#[test]
fn test_help_command() {
    Command::cargo_bin("vaultren")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Select vault files by folder, tag or pattern",
        ));
}

#[test]
fn test_version_subcommand() {
    Command::cargo_bin("vaultren")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vaultren 0.1.0"));
}

#[test]
fn test_version_subcommand_json() {
    Command::cargo_bin("vaultren")
        .unwrap()
        .args(["version", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"\{"name":"vaultren","version":"0\.1\.0"\}"#).unwrap());
}

#[test]
fn test_show_defaults_in_empty_vault() {
    let dir = TempDir::new().unwrap();
    vaultren(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode:            folder"));
    dir.child(".vaultren/settings.json")
        .assert(predicate::path::missing());
}

#[test]
fn test_settings_commands_persist() {
    let dir = TempDir::new().unwrap();
    vaultren(&dir)
        .args(["tags", " work, #home ,"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tags set to [work, #home]"));
    run(&dir, &["mode", "tags"]);

    dir.child(".vaultren/settings.json")
        .assert(predicate::str::contains("\"viewType\": \"tags\""))
        .assert(predicate::str::contains("\"work\""));

    vaultren(&dir)
        .args(["show", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"viewType\":\"tags\""));
}

#[test]
fn test_flags_lists_registry() {
    let dir = TempDir::new().unwrap();
    vaultren(&dir)
        .arg("flags")
        .assert()
        .success()
        .stdout(predicate::str::contains("i  ignore case"));
}

#[test]
fn test_preview_summary() {
    let dir = notes_vault();
    vaultren(&dir)
        .args(["preview", "--preview", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes/a.md -> notes/z.md"))
        .stdout(predicate::str::contains("2 candidates, 1 to rename, 0 blocked"));
}

#[test]
fn test_preview_table_is_default() {
    let dir = notes_vault();
    vaultren(&dir)
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTALS"))
        .stdout(predicate::str::contains("→ notes/z.md"));
}

#[test]
fn test_preview_format_from_config() {
    let dir = notes_vault();
    dir.child(".vaultren/config.toml")
        .write_str("[defaults]\npreview_format = \"diff\"\n")
        .unwrap();
    vaultren(&dir)
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- notes/a.md\n+++ notes/z.md"));
}

#[test]
fn test_preview_json_output() {
    let dir = notes_vault();
    let output = vaultren(&dir)
        .args(["preview", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "preview");
    assert_eq!(json["summary"]["candidates"], 2);
    assert_eq!(json["plan"]["entries"][0]["proposed"], "notes/z.md");
    assert_eq!(json["plan"]["entries"][1]["status"], "valid");
}

#[test]
fn test_apply_with_yes() {
    let dir = notes_vault();
    vaultren(&dir)
        .args(["apply", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ notes/a.md -> notes/z.md"))
        .stdout(predicate::str::contains("2 succeeded, 0 failed, 0 skipped"));

    dir.child("notes/z.md").assert("alpha");
    dir.child("notes/b.md").assert("beta");
    dir.child("notes/a.md").assert(predicate::path::missing());
    dir.child(".vaultren/logs/apply.log")
        .assert(predicate::str::contains("OK notes/a.md -> notes/z.md"));
}

#[test]
fn test_apply_declined() {
    let dir = notes_vault();
    vaultren(&dir)
        .arg("apply")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Apply these renames? [y/N]"))
        .stdout(predicate::str::contains("Operation cancelled."));

    dir.child("notes/a.md").assert(predicate::path::exists());
}

#[test]
fn test_apply_confirmed_from_stdin() {
    let dir = notes_vault();
    vaultren(&dir)
        .args(["apply", "--preview", "none"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 succeeded"));

    dir.child("notes/z.md").assert(predicate::path::exists());
}

#[test]
fn test_blocked_entries_are_skipped() {
    let dir = TempDir::new().unwrap();
    dir.child("inbox/xy.md").write_str("").unwrap();
    dir.child("inbox/yx.md").write_str("").unwrap();
    run(&dir, &["folder", "inbox"]);
    run(&dir, &["existing", "x"]);
    run(&dir, &["replace", "y"]);

    vaultren(&dir)
        .args(["apply", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ inbox/xy.md (skipped: invalid)"))
        .stdout(predicate::str::contains("0 succeeded, 0 failed, 2 skipped"));

    dir.child("inbox/xy.md").assert(predicate::path::exists());
    dir.child("inbox/yx.md").assert(predicate::path::exists());
}

#[test]
fn test_failed_move_exits_with_error() {
    let dir = TempDir::new().unwrap();
    dir.child("notes/a.md").write_str("#move").unwrap();
    dir.child("notes/b.md").write_str("taken").unwrap();
    run(&dir, &["tags", "move"]);
    run(&dir, &["mode", "tags"]);
    run(&dir, &["existing", "a"]);
    run(&dir, &["replace", "b"]);

    vaultren(&dir)
        .args(["apply", "--yes"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("0 succeeded, 1 failed, 0 skipped"))
        .stderr(predicate::str::contains("1 of 1 renames failed"));

    dir.child("notes/a.md").assert("#move");
    dir.child("notes/b.md").assert("taken");
}

#[test]
fn test_regexp_mode_with_groups() {
    let dir = TempDir::new().unwrap();
    dir.child("journal/2024-05-01.md").write_str("").unwrap();
    dir.child("journal/notes.md").write_str("").unwrap();
    run(&dir, &["mode", "regexp"]);
    run(&dir, &["regexp", r"^\d{4}-\d{2}-\d{2}"]);
    run(&dir, &["existing", r"(\d{4})-(\d{2})-(\d{2})"]);
    run(&dir, &["replace", "$3.$2.$1"]);

    vaultren(&dir)
        .args(["apply", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded, 0 failed, 0 skipped"));

    dir.child("journal/01.05.2024.md")
        .assert(predicate::path::exists());
    dir.child("journal/notes.md").assert(predicate::path::exists());
}

#[test]
fn test_unsupported_flag_blocks_apply() {
    let dir = TempDir::new().unwrap();
    dir.child("a.md").write_str("").unwrap();
    run(&dir, &["mode", "regexp"]);
    run(&dir, &["regexp", "a", "--flags", "q"]);

    vaultren(&dir)
        .args(["preview", "--preview", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pattern error: unsupported regular expression flag 'q'",
        ));

    vaultren(&dir)
        .args(["apply", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot apply while the pattern has an error"));

    dir.child("a.md").assert(predicate::path::exists());
}

#[test]
fn test_directory_flag() {
    let dir = notes_vault();
    Command::cargo_bin("vaultren")
        .unwrap()
        .args(["--no-color", "-C"])
        .arg(dir.path())
        .args(["preview", "--preview", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes/a.md -> notes/z.md"));
}

#[test]
fn test_missing_directory_is_setup_error() {
    Command::cargo_bin("vaultren")
        .unwrap()
        .args(["-C", "/definitely/not/a/vault", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to change to directory"));
}
