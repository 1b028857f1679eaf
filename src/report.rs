//! Human-readable result block.

use std::io::{self, Write};

use crate::catalog::ProjectType;
use crate::scan::ScanResult;

const RULE: &str = "==================================================";

/// Format an integer with `,` between groups of three digits.
///
/// ```
/// use codetally::report::format_thousands;
///
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// assert_eq!(format_thousands(999), "999");
/// ```
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Per-file and per-line averages, only defined when files were counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub lines_per_file: f64,
    pub chars_per_line: f64,
}

impl Averages {
    pub fn of(result: &ScanResult) -> Option<Self> {
        if result.file_count == 0 {
            return None;
        }
        let chars_per_line = if result.line_count > 0 {
            result.char_count as f64 / result.line_count as f64
        } else {
            0.0
        };
        Some(Self {
            lines_per_file: result.line_count as f64 / result.file_count as f64,
            chars_per_line,
        })
    }
}

/// Print the statistics block for a finished scan.
pub fn display_results(
    out: &mut dyn Write,
    result: &ScanResult,
    project: &ProjectType,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "PROJECT STATISTICS")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Project type: {}", project.name)?;
    writeln!(out, "File extensions: {}", project.extension_list())?;
    writeln!(out, "Code characters: {} characters", format_thousands(result.char_count))?;
    writeln!(out, "Code lines: {} lines", format_thousands(result.line_count))?;
    writeln!(out, "Code files: {} files", format_thousands(result.file_count))?;
    writeln!(out, "{RULE}")?;

    if let Some(avg) = Averages::of(result) {
        writeln!(out, "Average lines per file: {:.1}", avg.lines_per_file)?;
        writeln!(out, "Average characters per line: {:.1}", avg.chars_per_line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PROJECT_TYPES;

    fn render(result: ScanResult) -> String {
        let mut out = Vec::new();
        display_results(&mut out, &result, &PROJECT_TYPES[2]).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(100), "100");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12345), "12,345");
        assert_eq!(format_thousands(123456), "123,456");
        assert_eq!(format_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_display_results_with_averages() {
        let text = render(ScanResult {
            file_count: 2,
            line_count: 3,
            char_count: 12_500,
        });

        assert!(text.contains("Project type: Python Project"));
        assert!(text.contains("File extensions: .py"));
        assert!(text.contains("Code characters: 12,500 characters"));
        assert!(text.contains("Code lines: 3 lines"));
        assert!(text.contains("Code files: 2 files"));
        assert!(text.contains("Average lines per file: 1.5"));
        assert!(text.contains("Average characters per line: 4166.7"));
    }

    #[test]
    fn test_display_results_no_files_omits_averages() {
        let text = render(ScanResult::default());
        assert!(text.contains("Code files: 0 files"));
        assert!(!text.contains("Average"));
    }

    #[test]
    fn test_averages_with_only_empty_files() {
        let avg = Averages::of(&ScanResult {
            file_count: 3,
            line_count: 0,
            char_count: 0,
        })
        .unwrap();
        assert_eq!(avg.lines_per_file, 0.0);
        assert_eq!(avg.chars_per_line, 0.0);
    }
}
