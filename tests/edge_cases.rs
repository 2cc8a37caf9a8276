//! Edge case and error handling tests for treex


use harness::TestDir;
use std::fs;

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_no_infinite_loop() {
    use std::os::unix::fs::symlink;

    let dir = TestDir::new();
    dir.add_file("subdir/file.txt", "");
    symlink("..", dir.path().join("subdir").join("parent")).expect("Failed to create symlink");

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success, "treex should not hang on parent symlink");
    assert!(stdout.contains("subdir"));
    // Links are listed but never followed
    assert_eq!(stdout.matches("file.txt").count(), 1, "{}", stdout);
    assert!(stdout.contains("📄 parent"));
}

#[test]
#[cfg(unix)]
fn test_broken_symlink() {
    use std::os::unix::fs::symlink;

    let dir = TestDir::new();
    dir.add_file("real.txt", "");
    symlink("/nonexistent/target", dir.path().join("dangling")).expect("Failed to create symlink");

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    assert!(stdout.contains("dangling"));
    assert!(stdout.contains("real.txt"));
}

// ============================================================================
// Permission Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    // Root ignores permission bits; the walker unit tests cover this through
    // an injected access probe instead.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let dir = TestDir::new();
    dir.add_file("readable/file.txt", "");
    let unreadable = dir.add_dir("unreadable");
    fs::write(unreadable.join("secret.txt"), "").expect("Failed to write file");
    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o000))
        .expect("Failed to set permissions");

    let (stdout, _stderr, success) = dir.run(&[]);

    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o755))
        .expect("Failed to restore permissions");

    assert!(success, "treex should handle unreadable directories gracefully");
    assert!(stdout.contains("file.txt"));
    assert!(stdout.contains("📂 unreadable\n    └── 🚫 Permission denied\n"), "{}", stdout);
    assert!(!stdout.contains("secret.txt"));
}

#[test]
fn test_missing_directory_reports_error_line() {
    let dir = TestDir::new();
    let (stdout, _stderr, success) = dir.run(&["does-not-exist"]);
    assert!(success);
    assert!(stdout.starts_with("Error reading "), "{}", stdout);
    assert!(stdout.contains("does-not-exist"));
    assert_eq!(stdout.lines().count(), 1);
}

// ============================================================================
// Filename Edge Cases
// ============================================================================

#[test]
fn test_filename_with_spaces() {
    let dir = TestDir::new();
    dir.add_file("my file.txt", "");
    dir.add_file("folder with spaces/inner.txt", "");

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    assert!(stdout.contains("📂 folder with spaces"));
    assert!(stdout.contains("📄 my file.txt"));
}

#[test]
fn test_filename_with_unicode() {
    let dir = TestDir::new();
    dir.add_file("日本語.txt", "");
    dir.add_file("émoji_🎉.txt", "");

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    assert!(stdout.contains("日本語.txt"));
    assert!(stdout.contains("émoji_🎉.txt"));
}

#[test]
fn test_glob_metacharacters_are_literal() {
    let dir = TestDir::new();
    dir.write_config("ignored-names.json", r#"["file(1).txt", "a+b", "[x]"]"#);
    dir.add_file("file(1).txt", "");
    dir.add_file("file1.txt", "");
    dir.add_file("a+b", "");
    dir.add_file("aab", "");
    dir.add_file("[x]", "");
    dir.add_file("x", "");

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    assert!(!stdout.contains("file(1).txt"));
    assert!(stdout.contains("file1.txt"));
    assert!(!stdout.contains("a+b"));
    assert!(stdout.contains("aab"));
    assert!(!stdout.contains("[x]"));
    assert!(stdout.contains("└── 📄 x\n"), "{}", stdout);
}

#[test]
fn test_question_mark_matches_one_character() {
    let dir = TestDir::new();
    dir.write_config("ignored-names.json", r#"["?.tmp"]"#);
    dir.add_file("a.tmp", "");
    dir.add_file("ab.tmp", "");

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    assert!(!stdout.contains("📄 a.tmp"));
    assert!(stdout.contains("ab.tmp"));
}

// ============================================================================
// Structure Edge Cases
// ============================================================================

#[test]
fn test_empty_directory() {
    let dir = TestDir::new();
    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("📂 "));
}

#[test]
fn test_very_deep_nesting() {
    let dir = TestDir::new();
    let deep = (0..30).map(|i| format!("d{}", i)).collect::<Vec<_>>().join("/");
    dir.add_file(&format!("{}/leaf.txt", deep), "");

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    let leaf = stdout.lines().find(|l| l.contains("leaf.txt")).unwrap();
    assert!(leaf.starts_with(&"    ".repeat(30)), "{}", leaf);
}

#[test]
fn test_many_files_in_directory() {
    let dir = TestDir::new();
    for i in 0..200 {
        dir.add_file(&format!("file_{:03}.txt", i), "");
    }

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 201);
    assert_eq!(stdout.matches("└──").count(), 1);
    assert!(stdout.trim_end().ends_with("└── 📄 file_199.txt"));
}

#[test]
fn test_mixed_case_names_sort_lowercase_first() {
    let dir = TestDir::new();
    dir.add_file("readme", "");
    dir.add_file("README", "");

    // Case-insensitive filesystems cannot hold both names
    if fs::read_dir(dir.path()).unwrap().count() < 2 {
        return;
    }

    let (stdout, _stderr, success) = dir.run(&[]);
    assert!(success);
    let lower = stdout.find("📄 readme").unwrap();
    let upper = stdout.find("📄 README").unwrap();
    assert!(lower < upper);
}

#[test]
fn test_corrupt_config_is_reported() {
    let dir = TestDir::new();
    dir.write_config("ignored-names.json", "{not json");

    let (_stdout, stderr, success) = dir.run(&[]);
    assert!(!success);
    assert!(stderr.starts_with("treex: cannot parse"), "{}", stderr);
    assert!(stderr.contains("ignored-names.json"));
}
