mod common;

use anyhow::Result;
use common::{CollectingReporter, TestTree};
use driftwatch::snapshot::{FileStatus, Snapshot};
use std::path::Path;

#[test]
fn test_first_run_classifies_everything_as_added() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("a.txt", "a")?;
    tree.write_file("sub/b.txt", "b")?;

    let reporter = CollectingReporter::default();
    let summary = tree.ctx.engine().report(&reporter, true)?;

    assert_eq!(summary.added, 2);
    assert_eq!(summary.changes(), 2);
    assert!(
        reporter
            .statuses()
            .iter()
            .all(|s| matches!(s, FileStatus::Added(_)))
    );
    Ok(())
}

#[test]
fn test_classification_after_edits() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("same.txt", "stable")?;
    tree.write_file("changed.txt", "before")?;
    tree.write_file("gone.txt", "doomed")?;

    tree.ctx.engine().commit()?;

    tree.write_file("changed.txt", "after")?;
    tree.write_file("fresh.txt", "new")?;
    tree.remove_file("gone.txt")?;

    let reporter = CollectingReporter::default();
    let summary = tree.ctx.engine().report(&reporter, true)?;

    assert_eq!(summary.added, 1);
    assert_eq!(summary.edited, 1);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.unchanged, 1);

    let statuses = reporter.statuses();
    assert!(statuses.contains(&FileStatus::Added("fresh.txt".into())));
    assert!(statuses.contains(&FileStatus::Edited("changed.txt".into())));
    assert!(statuses.contains(&FileStatus::Deleted("gone.txt".into())));
    assert!(statuses.contains(&FileStatus::Unchanged("same.txt".into())));
    Ok(())
}

#[test]
fn test_deleted_entries_reported_after_current_entries() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("aaa.txt", "1")?;
    tree.write_file("zzz.txt", "2")?;
    tree.ctx.engine().commit()?;
    tree.remove_file("aaa.txt")?;

    let reporter = CollectingReporter::default();
    tree.ctx.engine().report(&reporter, true)?;

    let statuses = reporter.statuses();
    assert_eq!(
        statuses,
        vec![
            FileStatus::Unchanged("zzz.txt".into()),
            FileStatus::Deleted("aaa.txt".into()),
        ]
    );
    Ok(())
}

#[test]
fn test_quiet_report_suppresses_unchanged() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("a.txt", "a")?;
    tree.ctx.engine().commit()?;
    tree.write_file("b.txt", "b")?;

    let reporter = CollectingReporter::default();
    let summary = tree.ctx.engine().report(&reporter, false)?;

    assert_eq!(summary.unchanged, 1);
    assert_eq!(reporter.statuses(), vec![FileStatus::Added("b.txt".into())]);
    Ok(())
}

#[test]
fn test_commit_then_report_with_no_changes_is_clean() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("a.txt", "a")?;
    tree.write_file("b/c.txt", "c")?;

    tree.ctx.engine().commit()?;

    let reporter = CollectingReporter::default();
    let summary = tree.ctx.engine().report(&reporter, false)?;
    assert_eq!(summary.changes(), 0);
    assert_eq!(reporter.count(), 0);
    Ok(())
}

#[test]
fn test_diff_never_advances_the_baseline() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("a.txt", "a")?;
    tree.ctx.engine().commit()?;
    tree.write_file("b.txt", "b")?;

    let reporter = CollectingReporter::default();
    // Two consecutive reports must classify identically: report never saves.
    tree.ctx.engine().report(&reporter, false)?;
    let first = reporter.statuses();
    reporter.clear();
    tree.ctx.engine().report(&reporter, false)?;

    assert_eq!(first, reporter.statuses());
    Ok(())
}

#[test]
fn test_commit_makes_content_restoring_clean_again() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("a.txt", "original")?;
    tree.ctx.engine().commit()?;

    tree.write_file("a.txt", "modified")?;
    tree.write_file("a.txt", "original")?;

    let reporter = CollectingReporter::default();
    let summary = tree.ctx.engine().report(&reporter, false)?;
    // Fingerprints depend only on content, so restoring bytes restores clean.
    assert_eq!(summary.changes(), 0);
    Ok(())
}

#[test]
fn test_empty_root_commits_empty_snapshot() -> Result<()> {
    let tree = TestTree::new()?;
    let snapshot = tree.ctx.engine().commit()?;
    assert!(snapshot.is_empty());

    let persisted = Snapshot::load(&tree.ctx.snapshot_path)?;
    assert!(persisted.is_empty());
    Ok(())
}

#[test]
fn test_snapshot_file_inside_root_is_not_tracked() -> Result<()> {
    let tree = TestTree::new()?;
    let ctx = driftwatch::WatchContext::new_explicit(
        tree.root().to_path_buf(),
        tree.root().join("snapshot.txt"),
        driftwatch::config::Config::default(),
    );
    tree.write_file("data.txt", "data")?;

    ctx.engine().commit()?;
    let reporter = CollectingReporter::default();
    let summary = ctx.engine().report(&reporter, false)?;

    assert_eq!(summary.changes(), 0);
    let persisted = Snapshot::load(&ctx.snapshot_path)?;
    assert_eq!(persisted.len(), 1);
    assert!(persisted.contains(Path::new("data.txt")));
    Ok(())
}

#[test]
fn test_ignored_directories_stay_invisible() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("src.txt", "visible")?;
    tree.write_file(".git/objects/blob", "invisible")?;
    tree.write_file("node_modules/pkg/index.js", "invisible")?;

    let snapshot = tree.ctx.engine().commit()?;
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains(Path::new("src.txt")));
    Ok(())
}

#[test]
fn test_unreadable_file_is_skipped_not_fatal() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write_file("good.txt", "fine")?;

    // A dangling symlink hashes with an error once the walk follows links.
    let mut config = driftwatch::config::Config::default();
    config.tracking.follow_symlinks = true;
    let ctx = driftwatch::WatchContext::new_explicit(
        tree.root().to_path_buf(),
        tree.ctx.snapshot_path.clone(),
        config,
    );
    std::os::unix::fs::symlink(
        tree.root().join("missing-target"),
        tree.root().join("dangling.txt"),
    )?;

    let snapshot = ctx.engine().commit()?;
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains(Path::new("good.txt")));
    Ok(())
}
