//! Compiled-in project types and excluded directory names.
//!
//! Both tables are `'static` and never change at runtime. Extensions keep
//! their leading dot and are matched as case-insensitive filename suffixes.

/// A named language profile and the file extensions that belong to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectType {
    /// Display name shown in the menu and the report.
    pub name: &'static str,
    /// Extensions, including the leading dot, in menu order.
    pub extensions: &'static [&'static str],
}

impl ProjectType {
    /// Check whether a file name ends with one of this type's extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use codetally::catalog::PROJECT_TYPES;
    ///
    /// let python = PROJECT_TYPES.iter().find(|p| p.name == "Python Project").unwrap();
    /// assert!(python.matches("Main.PY"));
    /// assert!(!python.matches("main.pyc"));
    /// ```
    pub fn matches(&self, file_name: &str) -> bool {
        matches_extension(file_name, self.extensions)
    }

    /// Extensions joined for display, e.g. `.ts, .tsx`.
    pub fn extension_list(&self) -> String {
        self.extensions.join(", ")
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Project types in menu order.
pub static PROJECT_TYPES: &[ProjectType] = &[
    ProjectType {
        name: "C++ Project",
        extensions: &[".h", ".hpp", ".cpp", ".cc", ".cxx"],
    },
    ProjectType {
        name: "TypeScript Project",
        extensions: &[".ts", ".tsx"],
    },
    ProjectType {
        name: "Python Project",
        extensions: &[".py"],
    },
    ProjectType {
        name: "JavaScript Project",
        extensions: &[".js", ".jsx"],
    },
    ProjectType {
        name: "Java Project",
        extensions: &[".java"],
    },
    ProjectType {
        name: "C# Project",
        extensions: &[".cs"],
    },
    ProjectType {
        name: "Go Project",
        extensions: &[".go"],
    },
    ProjectType {
        name: "Rust Project",
        extensions: &[".rs"],
    },
];

/// Directory names that are never descended into.
///
/// Any directory whose name starts with `.` is skipped as well, see
/// [`is_excluded_dir`].
pub static EXCLUDED_DIRS: &[&str] = &[
    // Web
    "node_modules",
    "dist",
    "build",
    "coverage",
    // Python
    "__pycache__",
    "venv",
    "env",
    "site-packages",
    // C / C++ / .NET
    "libs",
    "bin",
    "obj",
    "Debug",
    "Release",
    "packages",
    // JVM
    "target",
    "out",
    // OS litter
    "Thumbs.db",
    // Scratch
    "tmp",
    "temp",
    "cache",
];

/// Check whether a directory with this name is pruned from traversal.
///
/// The comparison against [`EXCLUDED_DIRS`] is exact (case-sensitive).
pub fn is_excluded_dir(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name)
}

/// Case-insensitive suffix match of `file_name` against `extensions`.
pub fn matches_extension(file_name: &str, extensions: &[&str]) -> bool {
    let lower = file_name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}
