//! Initial registration of watch targets

use std::path::{Path, PathBuf};

use tracing::{debug, error};
use walkdir::WalkDir;

use crate::error::AutorunResult;

use super::registry::WatchRegistry;
use super::source::NotifySource;

/// Outcome of a successful tree registration
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Entries that received a watch
    pub registered: usize,
    /// Traversal errors unrelated to watch registration
    pub errors: Vec<walkdir::Error>,
}

/// Watch every entry under each root, without following symlinks.
///
/// Symlinks below a root get no watch of their own: inotify would follow
/// them to their target. Their creation and removal still show up on the
/// parent directory's watch. A root given as a symlink is followed.
///
/// The first `add_watch` failure aborts the walk and is returned; the rest of
/// the tree stays unwatched. Entries that cannot be read are collected and
/// logged once after the walk.
pub fn watch_trees<S, P>(
    registry: &mut WatchRegistry<S>,
    roots: &[P],
) -> AutorunResult<WalkReport>
where
    S: NotifySource,
    P: AsRef<Path>,
{
    let mut report = WalkReport::default();

    for root in roots {
        for entry in WalkDir::new(root.as_ref()).follow_links(false) {
            match entry {
                Ok(entry) if entry.depth() > 0 && entry.path_is_symlink() => {
                    debug!(path = %entry.path().display(), "skipping symlink");
                }
                Ok(entry) => {
                    debug!(path = %entry.path().display(), "watch");
                    registry.add_watch(entry.path())?;
                    report.registered += 1;
                }
                Err(err) => report.errors.push(err),
            }
        }
    }

    if let Some(first) = report.errors.first() {
        error!(count = report.errors.len(), "walk: {first}");
    }

    Ok(report)
}

/// Watch `root` and everything below it.
pub fn watch_tree<S: NotifySource>(
    registry: &mut WatchRegistry<S>,
    root: &Path,
) -> AutorunResult<WalkReport> {
    watch_trees(registry, &[root])
}

/// Watch each file individually; stops at the first failure.
pub fn watch_files<S: NotifySource>(
    registry: &mut WatchRegistry<S>,
    files: &[PathBuf],
) -> AutorunResult<()> {
    for file in files {
        debug!(path = %file.display(), "watch");
        registry.add_watch(file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutorunError;
    use crate::watcher::testing::FakeSource;
    use nix::errno::Errno;
    use std::fs;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested/deep")).unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "").unwrap();
        fs::write(dir.path().join("docs/index.md"), "").unwrap();
        dir
    }

    #[test]
    fn every_directory_under_root_is_watched() {
        let dir = fixture();
        let mut registry = WatchRegistry::with_source(FakeSource::new());

        let report = watch_trees(&mut registry, &[dir.path()]).unwrap();

        assert!(registry.is_watched(dir.path()));
        for sub in ["src", "src/nested", "src/nested/deep", "docs"] {
            let path = dir.path().join(sub);
            assert!(registry.is_watched(&path), "{} not watched", path.display());
        }
        assert!(registry.is_watched(&dir.path().join("src/lib.rs")));
        assert_eq!(report.registered, 7);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn each_path_has_exactly_one_handle() {
        let dir = fixture();
        let mut registry = WatchRegistry::with_source(FakeSource::new());

        watch_trees(&mut registry, &[dir.path()]).unwrap();

        for path in registry.paths().map(Path::to_path_buf).collect::<Vec<_>>() {
            assert_eq!(registry.handles_for(&path).len(), 1, "{}", path.display());
        }
    }

    #[test]
    fn multiple_roots_are_all_walked() {
        let first = fixture();
        let second = fixture();
        let mut registry = WatchRegistry::with_source(FakeSource::new());

        watch_trees(&mut registry, &[first.path(), second.path()]).unwrap();

        assert!(registry.is_watched(&first.path().join("src/nested/deep")));
        assert!(registry.is_watched(&second.path().join("docs")));
    }

    #[test]
    fn first_add_watch_failure_aborts_walk() {
        let dir = fixture();
        let source = FakeSource::new();
        let control = source.clone();
        let blocked = dir.path().join("src");
        source.reject(&blocked, Errno::ENOSPC);
        let mut registry = WatchRegistry::with_source(source);

        let err = watch_trees(&mut registry, &[dir.path()]).unwrap_err();

        match err {
            AutorunError::AddWatch { path, source } => {
                assert_eq!(path, blocked);
                assert_eq!(source, Errno::ENOSPC);
            }
            other => panic!("unexpected error: {other}"),
        }
        // nothing is attempted after the failing entry
        assert_eq!(control.added().last(), Some(&blocked));
        assert!(!registry.is_watched(&dir.path().join("src/nested")));
    }

    #[test]
    fn symlinks_below_root_are_not_registered() {
        let dir = fixture();
        let outside = tempdir().unwrap();
        fs::create_dir(outside.path().join("elsewhere")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink("nowhere", dir.path().join("src/dangling")).unwrap();
        let source = FakeSource::new();
        let control = source.clone();
        let mut registry = WatchRegistry::with_source(source);

        let report = watch_trees(&mut registry, &[dir.path()]).unwrap();

        assert_eq!(report.registered, 7);
        let added = control.added();
        assert!(!added.contains(&dir.path().join("link")));
        assert!(!added.contains(&dir.path().join("link/elsewhere")));
        assert!(!added.contains(&dir.path().join("src/dangling")));
    }

    #[test]
    fn symlinked_root_is_followed() {
        let dir = fixture();
        let parent = tempdir().unwrap();
        let root = parent.path().join("root");
        std::os::unix::fs::symlink(dir.path(), &root).unwrap();
        let mut registry = WatchRegistry::with_source(FakeSource::new());

        watch_trees(&mut registry, &[&root]).unwrap();

        assert!(registry.is_watched(&root));
        assert!(registry.is_watched(&root.join("src/nested/deep")));
    }

    #[test]
    fn missing_root_is_a_walk_error_not_an_abort() {
        let dir = tempdir().unwrap();
        let mut registry = WatchRegistry::with_source(FakeSource::new());

        let report = watch_tree(&mut registry, &dir.path().join("gone")).unwrap();

        assert_eq!(report.registered, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn watch_files_registers_each_file() {
        let dir = fixture();
        let files = vec![
            dir.path().join("src/lib.rs"),
            dir.path().join("docs/index.md"),
        ];
        let mut registry = WatchRegistry::with_source(FakeSource::new());

        watch_files(&mut registry, &files).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(!registry.is_watched(&dir.path().join("src")));
    }

    #[test]
    fn watch_files_stops_at_first_failure() {
        let source = FakeSource::new();
        source.reject("b.txt", Errno::EACCES);
        let mut registry = WatchRegistry::with_source(source);
        let files: Vec<PathBuf> = ["a.txt", "b.txt", "c.txt"].iter().map(PathBuf::from).collect();

        let err = watch_files(&mut registry, &files).unwrap_err();

        assert_eq!(err.exit_code(), libc::EACCES);
        assert!(registry.is_watched(Path::new("a.txt")));
        assert!(!registry.is_watched(Path::new("c.txt")));
    }
}
