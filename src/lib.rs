//! Codetally - count files, lines and characters of a code project.
//!
//! A project type (a named set of file extensions) is picked from a
//! compiled-in catalog, the directory tree is walked with well-known build
//! and dependency directories pruned, and every matching file is counted.
//!
//! # Quick Start
//!
//! ```no_run
//! use codetally::catalog::PROJECT_TYPES;
//! use codetally::scan::Scan;
//!
//! let rust = PROJECT_TYPES.iter().find(|p| p.name == "Rust Project").unwrap();
//! let result = Scan::new("./my-project")
//!     .extensions(rust.extensions)
//!     .run()
//!     .unwrap();
//!
//! println!("{} files, {} lines", result.file_count, result.line_count);
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Project types and excluded directory names
//! - [`walker`] - Pruned directory traversal
//! - [`counter`] - Lossy decoding and line/character counting
//! - [`scan`] - Aggregation over a directory tree
//! - [`input`] - Cancellable line input
//! - [`selector`] - Project type menu and directory prompt
//! - [`report`] - Result formatting

pub mod catalog;
pub mod counter;
pub mod errors;
pub mod input;
pub mod report;
pub mod scan;
pub mod selector;
pub mod walker;

// Re-export key types at crate root for convenience
pub use catalog::{ProjectType, EXCLUDED_DIRS, PROJECT_TYPES};
pub use errors::TallyError;
pub use input::{InputSource, Prompted};
pub use scan::{Scan, ScanError, ScanResult};
pub use walker::WalkError;
