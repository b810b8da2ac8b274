//! CLI utilities for cigarco
//!
//! This module provides testable functions used by the CLI binary.
//! By extracting pure functions and I/O-abstracted functions to the library,
//! we enable comprehensive unit testing without requiring end-to-end CLI tests.

pub mod format;
pub mod input;
pub mod parse;

pub use format::{output_result, OutputFormat};
pub use input::open_input;
pub use parse::{parse_alignment_line, parse_query_line, QueryRecord};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// This is common when files are exported from Windows applications or Excel.
///
/// # Examples
///
/// ```
/// use cigarco::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}TR1\t4"), "TR1\t4");
/// assert_eq!(strip_bom("TR1\t4"), "TR1\t4");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Strip inline comments from a record line.
///
/// Comments start with `#` and extend to the end of the line.
/// Leading/trailing whitespace is also trimmed.
///
/// # Examples
///
/// ```
/// use cigarco::cli::strip_inline_comment;
///
/// assert_eq!(strip_inline_comment("TR1\t4  # exon start"), "TR1\t4");
/// assert_eq!(strip_inline_comment("TR1\t4"), "TR1\t4");
/// assert_eq!(strip_inline_comment("# full line comment"), "");
/// ```
pub fn strip_inline_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => s[..pos].trim(),
        None => s.trim(),
    }
}

/// Process an input line: trim whitespace, strip BOM (for first line), and strip inline comments.
///
/// Returns None if the line is empty or a comment-only line.
///
/// # Examples
///
/// ```
/// use cigarco::cli::process_input_line;
///
/// assert_eq!(process_input_line("TR1\t4", false), Some("TR1\t4"));
/// assert_eq!(process_input_line("\u{feff}TR1\t4", true), Some("TR1\t4"));
/// assert_eq!(process_input_line("", false), None);
/// assert_eq!(process_input_line("# comment", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = strip_inline_comment(line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
