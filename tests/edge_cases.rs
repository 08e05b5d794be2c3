//! Edge case and error handling tests for dirgraph


use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};

use assert_cmd::Command;
use harness::{TestTree, count_clusters, count_leaves, run_dirgraph};
use predicates::prelude::*;

fn dirgraph() -> Command {
    let mut cmd = Command::cargo_bin("dirgraph").expect("binary should build");
    cmd.env("NO_COLOR", "1").env_remove("DIRGRAPH_LOG");
    cmd
}

// ============================================================================
// Naming and Escaping
// ============================================================================

#[test]
fn test_underscores_escaped_in_labels_only() {
    let tree = TestTree::new("my_project");
    tree.add_file("snake_case_file.rs");

    dirgraph()
        .current_dir(tree.parent())
        .arg("my_project")
        .assert()
        .success()
        .stdout(predicate::str::contains("subgraph cluster_my_project {"))
        .stdout(predicate::str::contains("label=\"my\\_project\";"))
        .stdout(predicate::str::contains(
            "my_project_snake_case_file_rs [label=\"snake\\_case\\_file.rs\"];",
        ));
}

#[test]
fn test_filename_with_spaces_and_dashes() {
    let tree = TestTree::new("root");
    tree.add_file("file with spaces.rs");
    tree.add_file("ui-tests/spec-one.ts");

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["root"]);
    assert!(success);
    assert!(stdout.contains("root_file_with_spaces_rs [label=\"file with spaces.rs\"];"));
    assert!(stdout.contains("subgraph cluster_root_ui_tests {"));
    assert!(stdout.contains("root_ui_tests_spec_one_ts [label=\"spec-one.ts\"];"));
    // "ui" comes before "tests" in the default table
    assert!(stdout.contains("color=plum;"));
}

#[test]
fn test_filename_with_unicode() {
    let tree = TestTree::new("root");
    tree.add_file("日本語.rs");
    tree.add_file("中文目录/文件.rs");

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["root"]);
    assert!(success, "dirgraph should handle unicode filenames");
    assert!(stdout.contains("root_日本語_rs [label=\"日本語.rs\"];"));
    assert!(stdout.contains("subgraph cluster_root_中文目录 {"));
}

#[test]
fn test_filename_with_quotes() {
    let tree = TestTree::new("root");
    tree.add_file("say \"hi\".txt");

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["root"]);
    assert!(success);
    assert!(stdout.contains("root_say__hi__txt [label=\"say \\\"hi\\\".txt\"];"), "{}", stdout);
}

#[test]
fn test_root_name_starting_with_digit() {
    let tree = TestTree::new("2024-archive");
    tree.add_file("notes.md");

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["2024-archive"]);
    assert!(success);
    assert!(stdout.contains("subgraph cluster_n2024_archive {"));
    assert!(stdout.contains("n2024_archive_notes_md [label=\"notes.md\"];"));
    assert!(stdout.contains("label=\"2024-archive\";"));
}

#[test]
fn test_dot_root_uses_directory_name() {
    let tree = TestTree::new("workspace");
    tree.add_file("a.txt");

    dirgraph()
        .current_dir(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("subgraph cluster_workspace {"))
        .stdout(predicate::str::contains("workspace_a_txt"));
}

// ============================================================================
// Tree Shapes
// ============================================================================

#[test]
fn test_empty_root() {
    let tree = TestTree::new("empty");

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["empty"]);
    assert!(success);
    assert_eq!(count_clusters(&stdout), 1);
    assert_eq!(count_leaves(&stdout), 0);
}

#[test]
fn test_deeply_nested_indentation() {
    let tree = TestTree::new("r");
    tree.add_file("a/b/c/d/leaf.txt");

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["r"]);
    assert!(success);
    assert!(stdout.contains(&format!("{}r_a_b_c_d_leaf_txt [label=\"leaf.txt\"];", " ".repeat(24))));
    assert_eq!(count_clusters(&stdout), 5);
}

#[test]
fn test_root_is_a_file() {
    let tree = TestTree::new("root");
    tree.add_file("plain.txt");

    dirgraph()
        .current_dir(tree.path())
        .arg("plain.txt")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not a directory"));
}

// ============================================================================
// Symlinks
// ============================================================================

#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new("root");
    tree.add_file("subdir/file.rs");
    symlink("..", tree.path().join("subdir/parent")).expect("Failed to create parent symlink");

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["root"]);
    assert!(success, "dirgraph should not hang on parent symlink");
    assert!(stdout.contains("root_subdir_file_rs"));
    assert!(!stdout.contains("parent"));
}

#[test]
fn test_follow_symlinks_bounded_by_level() {
    let tree = TestTree::new("root");
    tree.add_file("real/file.rs");
    symlink(tree.path().join("real"), tree.path().join("alias")).unwrap();
    symlink("..", tree.path().join("real/up")).unwrap();

    let (stdout, _stderr, success) =
        run_dirgraph(tree.parent(), &["root", "--follow-symlinks", "-L", "3"]);
    assert!(success);
    assert!(stdout.contains("root_alias_file_rs"));
    assert!(stdout.contains("cluster_root_real_up"));
}

#[test]
fn test_broken_symlink_skipped() {
    let tree = TestTree::new("root");
    tree.add_file("real.rs");
    symlink("nonexistent.rs", tree.path().join("broken.rs")).unwrap();

    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["root", "--follow-symlinks"]);
    assert!(success);
    assert!(stdout.contains("root_real_rs"));
    assert!(!stdout.contains("broken"));
}

// ============================================================================
// Permission Error Handling
// ============================================================================

/// Make `dir` unreadable. Returns false when the current user can read it
/// anyway (running as root), in which case the test has nothing to check.
fn lock(dir: &std::path::Path) -> bool {
    let mut perms = fs::metadata(dir).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(dir, perms).expect("Failed to set permissions");
    fs::read_dir(dir).is_err()
}

fn unlock(dir: &std::path::Path) {
    let mut perms = fs::metadata(dir).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(dir, perms).expect("Failed to restore permissions");
}

#[test]
fn test_unreadable_directory_aborts() {
    let tree = TestTree::new("root");
    tree.add_file("readable/file.rs");
    let locked = tree.add_dir("locked");
    tree.add_file("locked/secret.rs");

    if !lock(&locked) {
        unlock(&locked);
        return;
    }
    let (stdout, stderr, success) = run_dirgraph(tree.parent(), &["root"]);
    unlock(&locked);

    assert!(!success, "unreadable folder should fail the run");
    assert!(stdout.is_empty());
    assert!(stderr.contains("Permission denied"), "{}", stderr);
}

#[test]
fn test_unreadable_directory_skipped() {
    let tree = TestTree::new("root");
    tree.add_file("readable/file.rs");
    let locked = tree.add_dir("locked");
    tree.add_file("locked/secret.rs");

    if !lock(&locked) {
        unlock(&locked);
        return;
    }
    let (stdout, stderr, success) = run_dirgraph(tree.parent(), &["root", "--skip-unreadable"]);
    unlock(&locked);

    assert!(success, "stderr: {}", stderr);
    assert!(stdout.contains("root_readable_file_rs"));
    assert!(!stdout.contains("cluster_root_locked"));
    assert!(stderr.contains("skipping folder"), "{}", stderr);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_sorted_output_is_stable() {
    let tree = TestTree::new("root");
    for name in ["zeta.rs", "alpha.rs", "Mid.rs", "beta.rs"] {
        tree.add_file(name);
    }

    let (first, _, ok1) = run_dirgraph(tree.parent(), &["root"]);
    let (second, _, ok2) = run_dirgraph(tree.parent(), &["root"]);
    assert!(ok1 && ok2);
    assert_eq!(first, second);

    let order: Vec<_> = ["root_Mid_rs", "root_alpha_rs", "root_beta_rs", "root_zeta_rs"]
        .iter()
        .map(|id| first.find(id).expect("id present"))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", first);
}

#[test]
fn test_unsorted_still_complete() {
    let tree = TestTree::new("root");
    for i in 0..20 {
        tree.add_file(&format!("f{}.txt", i));
    }
    let (stdout, _stderr, success) = run_dirgraph(tree.parent(), &["root", "--unsorted"]);
    assert!(success);
    assert_eq!(count_leaves(&stdout), 20);
}
