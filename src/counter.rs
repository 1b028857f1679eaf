//! Per-file line and character counting.
//!
//! Decoding is intentionally lossy: invalid UTF-8 sequences are dropped, so
//! statistics for files in other encodings are approximate. Newlines follow
//! text-mode conventions, where `\r\n` and a lone `\r` each count as a single
//! `\n`.

use std::path::Path;

/// Line and character totals for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCounts {
    pub lines: u64,
    pub chars: u64,
}

/// Decode bytes as UTF-8, dropping any invalid sequences.
///
/// ```
/// use codetally::counter::decode_lossy;
///
/// assert_eq!(decode_lossy(b"ab\xffc"), "abc");
/// ```
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Count lines and characters of already-decoded text.
///
/// A final line without a trailing newline still counts as a line; empty text
/// has zero lines.
///
/// ```
/// use codetally::counter::count_text;
///
/// assert_eq!(count_text("abc").lines, 1);
/// assert_eq!(count_text("abc\n").lines, 1);
/// assert_eq!(count_text("abc\ndef\n").lines, 2);
/// assert_eq!(count_text("").lines, 0);
/// ```
pub fn count_text(text: &str) -> TextCounts {
    let bytes = text.as_bytes();
    let crlf = text.matches("\r\n").count();
    let newlines = bytecount::count(bytes, b'\n') + bytecount::count(bytes, b'\r') - crlf;
    let chars = bytecount::num_chars(bytes) - crlf;

    let ends_with_newline = matches!(bytes.last(), Some(b'\n' | b'\r'));
    let trailing = usize::from(!text.is_empty() && !ends_with_newline);

    TextCounts {
        lines: (newlines + trailing) as u64,
        chars: chars as u64,
    }
}

/// Read a whole file and count it.
///
/// The file handle is closed before this returns, on success and on error.
pub fn read_counts(path: &Path) -> std::io::Result<TextCounts> {
    let bytes = std::fs::read(path)?;
    Ok(count_text(&decode_lossy(&bytes)))
}
