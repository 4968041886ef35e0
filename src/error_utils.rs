//! Shared error utilities

use miette::{NamedSource, SourceSpan};
use std::path::Path;

/// Source name used when the record did not come from a file
pub const STDIN_SOURCE_NAME: &str = "<stdin>";

/// Format an input location for error display
pub fn format_source_name(path: Option<&Path>) -> String {
    match path {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => STDIN_SOURCE_NAME.to_string(),
    }
}

/// Create a NamedSource for miette diagnostics
pub fn create_named_source(name: &str, content: String) -> NamedSource<String> {
    NamedSource::new(name, content)
}

/// Convert a 1-based line/column pair (as reported by serde_json) into a byte offset.
///
/// Columns past the end of a line and lines past the end of the input are
/// clamped to the end of the source. The result always sits on a char boundary.
pub fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_idx = line.saturating_sub(1);
    let mut offset = 0;

    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx == line_idx {
            let within = column.saturating_sub(1).min(text.len());
            offset += within;
            break;
        }
        offset += text.len();
    }

    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Span covering the single character at `offset`.
///
/// Offsets at the end of input (unexpected EOF) move back to the last
/// non-whitespace character so the label has something to point at.
pub fn char_span(source: &str, offset: usize) -> SourceSpan {
    let offset = if offset >= source.len() {
        source
            .trim_end()
            .char_indices()
            .next_back()
            .map_or(0, |(idx, _)| idx)
    } else {
        offset
    };
    let len = source
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    SourceSpan::new(offset.into(), len)
}
