//! Interactive project type menu and directory prompt.
//!
//! Each prompt is a small loop with three exits: a valid answer, a
//! cancellation, or malformed input that re-prompts. All text goes to the
//! injected writer.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::catalog::ProjectType;
use crate::input::{InputSource, Prompted};

const RULE: &str = "==================================================";

/// Result of the project type menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen(&'static ProjectType),
    Quit,
    Cancelled,
}

/// Result of resolving the directory to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    Resolved(PathBuf),
    /// A `--src` path that does not name a directory.
    Invalid,
    Cancelled,
}

/// What one menu answer means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Project(usize),
    Quit,
    NotANumber,
    OutOfRange,
}

fn parse_choice(input: &str, count: usize) -> MenuChoice {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return MenuChoice::NotANumber;
    }
    match input.parse::<usize>() {
        Ok(n) if n == count + 1 => MenuChoice::Quit,
        Ok(n) if (1..=count).contains(&n) => MenuChoice::Project(n - 1),
        Ok(_) => MenuChoice::OutOfRange,
        // Too many digits to fit; certainly not a menu entry.
        Err(_) => MenuChoice::OutOfRange,
    }
}

/// Write the numbered menu, ending with the Quit entry.
pub fn render_menu(out: &mut dyn Write, catalog: &[ProjectType]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "CODE PROJECT STATISTICS BUDDY")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Select project type:")?;
    writeln!(out)?;
    for (i, project) in catalog.iter().enumerate() {
        writeln!(
            out,
            "[{}] {} (checks {} files)",
            i + 1,
            project.name,
            project.extension_list()
        )?;
    }
    writeln!(out, "[{}] Quit", catalog.len() + 1)?;
    writeln!(out)?;
    Ok(())
}

/// Show the menu until the user picks a project type, quits, or cancels.
pub fn select_project_type(
    catalog: &'static [ProjectType],
    input: &mut dyn InputSource,
    out: &mut dyn Write,
) -> io::Result<Selection> {
    loop {
        render_menu(out, catalog)?;
        write!(out, "Enter your choice (number): ")?;
        out.flush()?;

        let line = match input.read_line() {
            Prompted::Line(line) => line,
            Prompted::Cancelled => {
                writeln!(out)?;
                writeln!(out, "Goodbye!")?;
                return Ok(Selection::Cancelled);
            }
        };

        match parse_choice(&line, catalog.len()) {
            MenuChoice::Project(index) => return Ok(Selection::Chosen(&catalog[index])),
            MenuChoice::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Selection::Quit);
            }
            MenuChoice::NotANumber => writeln!(out, "Please enter a valid number.")?,
            MenuChoice::OutOfRange => writeln!(
                out,
                "Please enter a number between 1 and {}.",
                catalog.len() + 1
            )?,
        }
    }
}

/// Strip surrounding whitespace, then surrounding quote characters.
///
/// ```
/// use codetally::selector::clean_path_input;
///
/// assert_eq!(clean_path_input("  \"C:/My Code\" "), "C:/My Code");
/// assert_eq!(clean_path_input("'src'"), "src");
/// ```
pub fn clean_path_input(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Decide which directory to scan.
///
/// A `provided` path is checked once; a bad one yields
/// [`PathResolution::Invalid`] with no retry. Without one, the user is
/// prompted until a directory is entered or the prompt is cancelled.
pub fn resolve_directory(
    provided: Option<&str>,
    project: &ProjectType,
    input: &mut dyn InputSource,
    out: &mut dyn Write,
) -> io::Result<PathResolution> {
    // An empty `--src` counts as no path at all.
    if let Some(raw) = provided.filter(|raw| !raw.is_empty()) {
        let path = PathBuf::from(clean_path_input(raw));
        if path.is_dir() {
            return Ok(PathResolution::Resolved(path));
        }
        writeln!(out, "Error: Directory '{raw}' not found.")?;
        return Ok(PathResolution::Invalid);
    }

    writeln!(out)?;
    writeln!(out, "Selected project type: {}", project.name)?;
    writeln!(out)?;
    writeln!(out, "Enter the directory path to analyze:")?;
    writeln!(out, "(You can copy and paste the path)")?;

    loop {
        write!(out, "Directory path: ")?;
        out.flush()?;

        let line = match input.read_line() {
            Prompted::Line(line) => line,
            Prompted::Cancelled => {
                writeln!(out)?;
                writeln!(out, "Operation cancelled.")?;
                return Ok(PathResolution::Cancelled);
            }
        };

        let cleaned = clean_path_input(&line);
        if cleaned.is_empty() {
            writeln!(out, "Please enter a valid path.")?;
            continue;
        }

        let path = PathBuf::from(cleaned);
        if path.is_dir() {
            return Ok(PathResolution::Resolved(path));
        }
        writeln!(out, "Directory not found. Please enter a valid directory path.")?;
    }
}
