//! Pruned directory traversal.
//!
//! Uses the `ignore` crate's walker with its standard filters turned off, so
//! gitignore rules play no part. Excluded directories are pruned through
//! `filter_entry`, which means their subtrees are never read at all.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use ignore::{DirEntry, WalkBuilder};
use thiserror::Error;

use crate::catalog::is_excluded_dir;

/// Errors that can occur during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("traversal failed at {path}: {message}")]
    Traversal { path: PathBuf, message: String },

    #[error("walk interrupted")]
    Interrupted,
}

/// A file reached by the walk: a regular file, or a symlink that does not
/// point at a directory (including a dangling one).
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Path to the file.
    pub path: PathBuf,
}

impl WalkEntry {
    /// The file's own name, lossily converted.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Check that `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<(), WalkError> {
    let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WalkError::NotFound {
            path: root.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => WalkError::PermissionDenied {
            path: root.to_path_buf(),
        },
        _ => WalkError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Whether the walker should descend into / yield this entry.
///
/// The root is always kept, even when its own name starts with a dot.
fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    if !is_dir {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if is_excluded_dir(&name) {
        tracing::debug!(path = %entry.path().display(), "pruning excluded directory");
        return false;
    }
    true
}

/// Walk the regular files under `root`, top-down in file-name order.
///
/// Excluded directories (see [`is_excluded_dir`]) are pruned before the walk
/// descends into them. Any traversal error ends the iteration with that error.
///
/// # Examples
///
/// ```no_run
/// use codetally::walker::walk_files;
/// use std::path::Path;
///
/// for entry in walk_files(Path::new("."), None).flatten() {
///     println!("{}", entry.path.display());
/// }
/// ```
pub fn walk_files<'a>(
    root: &Path,
    interrupt: Option<&'a AtomicBool>,
) -> impl Iterator<Item = Result<WalkEntry, WalkError>> + 'a {
    let (mut walker, mut pending_error) = match check_root(root) {
        Ok(()) => {
            let mut builder = WalkBuilder::new(root);
            builder
                .standard_filters(false)
                .follow_links(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .filter_entry(keep_entry);
            (Some(builder.build()), None)
        }
        Err(e) => (None, Some(e)),
    };
    let mut failed = false;

    std::iter::from_fn(move || {
        if let Some(err) = pending_error.take() {
            failed = true;
            return Some(Err(err));
        }
        if failed {
            return None;
        }
        let walker = walker.as_mut()?;

        loop {
            if interrupt.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
                failed = true;
                return Some(Err(WalkError::Interrupted));
            }

            match walker.next()? {
                Ok(entry) => {
                    if is_file_like(&entry) {
                        return Some(Ok(WalkEntry {
                            path: entry.path().to_path_buf(),
                        }));
                    }
                }
                Err(e) => {
                    failed = true;
                    return Some(Err(convert_error(e)));
                }
            }
        }
    })
}

/// Regular files, plus symlinks whose target is not a directory.
///
/// Symlinked directories are never descended into. A dangling link is kept so
/// that reading it fails and is reported like any other unreadable file.
fn is_file_like(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => entry.depth() > 0 && !entry.path().is_dir(),
        _ => false,
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn convert_error(err: ignore::Error) -> WalkError {
    let path = error_path(&err)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("<walk error>"));

    let permission_denied = err
        .io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied);
    if permission_denied {
        return WalkError::PermissionDenied { path };
    }

    WalkError::Traversal {
        path,
        message: err.to_string(),
    }
}
