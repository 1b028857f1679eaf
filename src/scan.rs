//! Directory scanning: walk, filter by extension, and total the counts.

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use thiserror::Error;

use crate::catalog::matches_extension;
use crate::counter::read_counts;
use crate::walker::{walk_files, WalkError};

/// Totals for one scan. All three counts come from the same set of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub file_count: u64,
    pub line_count: u64,
    pub char_count: u64,
}

/// A matching file that could not be read and was left out of the totals.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: std::io::Error,
}

/// A scan that did not complete. No partial totals are kept.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Walk(#[from] WalkError),
}

impl ScanError {
    /// Whether the scan stopped because of an interrupt.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, ScanError::Walk(WalkError::Interrupted))
    }
}

type SkipHandler<'a> = Box<dyn FnMut(&SkippedFile) + 'a>;

/// Builder for a single scan.
///
/// # Examples
///
/// ```no_run
/// use codetally::scan::Scan;
///
/// let result = Scan::new("./project")
///     .extensions(&[".rs"])
///     .on_skip(|skip| eprintln!("skipped {}", skip.path.display()))
///     .run()
///     .unwrap();
/// println!("{} files, {} lines", result.file_count, result.line_count);
/// ```
pub struct Scan<'a> {
    root: PathBuf,
    extensions: Vec<&'a str>,
    on_skip: Option<SkipHandler<'a>>,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> Scan<'a> {
    /// Create a scan rooted at `root`. With no extensions set nothing matches.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            on_skip: None,
            interrupt: None,
        }
    }

    /// File extensions to count, with leading dot, matched case-insensitively.
    pub fn extensions(mut self, extensions: &[&'a str]) -> Self {
        self.extensions = extensions.to_vec();
        self
    }

    /// Called once for each matching file that cannot be read.
    pub fn on_skip(mut self, handler: impl FnMut(&SkippedFile) + 'a) -> Self {
        self.on_skip = Some(Box::new(handler));
        self
    }

    /// Abort the scan once `flag` becomes true.
    pub fn interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Walk the tree and total every matching file.
    pub fn run(mut self) -> Result<ScanResult, ScanError> {
        tracing::info!(root = %self.root.display(), extensions = ?self.extensions, "scan started");

        let mut result = ScanResult::default();

        for entry in walk_files(&self.root, self.interrupt) {
            let entry = entry?;
            if !matches_extension(&entry.file_name(), &self.extensions) {
                continue;
            }

            match read_counts(&entry.path) {
                Ok(counts) => {
                    tracing::debug!(
                        path = %entry.path.display(),
                        lines = counts.lines,
                        chars = counts.chars,
                        "counted file"
                    );
                    result.file_count += 1;
                    result.line_count += counts.lines;
                    result.char_count += counts.chars;
                }
                Err(error) => {
                    tracing::warn!(path = %entry.path.display(), %error, "skipping unreadable file");
                    let skipped = SkippedFile {
                        path: entry.path,
                        error,
                    };
                    if let Some(handler) = self.on_skip.as_mut() {
                        handler(&skipped);
                    }
                }
            }
        }

        tracing::info!(
            files = result.file_count,
            lines = result.line_count,
            chars = result.char_count,
            "scan finished"
        );
        Ok(result)
    }
}

/// Scan `root` for files with any of `extensions`, ignoring unreadable files.
pub fn scan(root: &Path, extensions: &[&str]) -> Result<ScanResult, ScanError> {
    Scan::new(root).extensions(extensions).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_scan_python_with_excluded_venv() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "x\ny\n");
        write(dir.path(), "b.py", "z");
        write(dir.path(), "venv/c.py", "ignored\nignored\n");

        let result = scan(dir.path(), &[".py"]).unwrap();
        assert_eq!(result.file_count, 2);
        assert_eq!(result.line_count, 3);
        assert_eq!(result.char_count, 5);
    }

    #[test]
    fn test_scan_matches_extensions_case_insensitively() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Main.PY", "print(1)\n");
        write(dir.path(), "notes.txt", "not code\n");

        let result = scan(dir.path(), &[".py"]).unwrap();
        assert_eq!(result.file_count, 1);
        assert_eq!(result.line_count, 1);
    }

    #[test]
    fn test_scan_excluded_and_hidden_dirs_at_depth() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/lib.rs", "fn a() {}\n");
        write(dir.path(), "src/target/gen.rs", "fn b() {}\n");
        write(dir.path(), "crates/x/.git/hook.rs", "fn c() {}\n");
        write(dir.path(), "crates/x/node_modules/y.rs", "fn d() {}\n");

        let result = scan(dir.path(), &[".rs"]).unwrap();
        assert_eq!(result.file_count, 1);
    }

    #[test]
    fn test_scan_counts_empty_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "empty.go", "");
        write(dir.path(), "one.go", "package main");

        let result = scan(dir.path(), &[".go"]).unwrap();
        assert_eq!(result.file_count, 2);
        assert_eq!(result.line_count, 1);
        assert_eq!(result.char_count, 12);
    }

    #[test]
    fn test_scan_multiple_extensions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.ts", "1\n");
        write(dir.path(), "b.tsx", "1\n2\n");
        write(dir.path(), "c.js", "1\n");

        let result = scan(dir.path(), &[".ts", ".tsx"]).unwrap();
        assert_eq!(result.file_count, 2);
        assert_eq!(result.line_count, 3);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let err = scan(&dir.path().join("missing"), &[".py"]).unwrap_err();
        assert!(matches!(err, ScanError::Walk(WalkError::NotFound { .. })));
    }

    #[test]
    fn test_scan_interrupted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "x\n");

        let flag = AtomicBool::new(true);
        let err = Scan::new(dir.path())
            .extensions(&[".py"])
            .interrupt(&flag)
            .run()
            .unwrap_err();
        assert!(err.is_interrupted());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.py", "ok\n");
        write(dir.path(), "locked.py", "secret\n");
        let locked = dir.path().join("locked.py");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to a privileged user.
        if fs::read(&locked).is_ok() {
            return;
        }

        let mut skipped = Vec::new();
        let result = Scan::new(dir.path())
            .extensions(&[".py"])
            .on_skip(|s| skipped.push(s.path.clone()))
            .run()
            .unwrap();

        assert_eq!(result.file_count, 1);
        assert_eq!(result.line_count, 1);
        assert_eq!(result.char_count, 3);
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].ends_with("locked.py"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_counts_symlinked_files_and_warns_on_dangling() {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        write(outside.path(), "real.py", "a\nb\n");

        let dir = TempDir::new().unwrap();
        write(dir.path(), "x.py", "z\n");
        symlink(outside.path().join("real.py"), dir.path().join("link.py")).unwrap();
        symlink(outside.path().join("gone.py"), dir.path().join("broken.py")).unwrap();

        let mut skipped = Vec::new();
        let result = Scan::new(dir.path())
            .extensions(&[".py"])
            .on_skip(|s| skipped.push(s.path.clone()))
            .run()
            .unwrap();

        assert_eq!(result.file_count, 2);
        assert_eq!(result.line_count, 3);
        assert_eq!(result.char_count, 6);
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].ends_with("broken.py"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_aborts_on_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "counted before the failure\n");
        write(dir.path(), "locked/b.py", "x\n");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to a privileged user.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut skipped = 0;
        let outcome = Scan::new(dir.path())
            .extensions(&[".py"])
            .on_skip(|_| skipped += 1)
            .run();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(
            outcome,
            Err(ScanError::Walk(WalkError::PermissionDenied { .. }))
        ));
        assert_eq!(skipped, 0);
    }
}
