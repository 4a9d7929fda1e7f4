//! Source snippet rendering with caret underlines.
//!
//! Produces the compact form used in error output:
//!
//! ```text
//! unterminated string at line 2, col 8
//!   |
//! 2 | value: "oops
//!   |        ^^^^^
//! ```

use crate::{ErrorInfo, LineOffsetTable};

/// Number of decimal digits needed to display a line number.
fn digit_count(mut n: u32) -> usize {
    if n == 0 {
        return 1;
    }
    let mut count = 0;
    while n > 0 {
        count += 1;
        n /= 10;
    }
    count
}

/// Character-based (start, end) columns of the span on one line.
fn span_columns_on_line(
    table: &LineOffsetTable,
    source: &str,
    line: u32,
    span_start: u32,
    span_end: u32,
) -> Option<(usize, usize)> {
    let line_start = table.line_start_offset(line)?;
    let line_text = table.line_text(source, line)?;
    let line_end = line_start.saturating_add(u32::try_from(line_text.len()).unwrap_or(u32::MAX));

    let start_byte = (span_start.max(line_start) - line_start) as usize;
    let end_byte = (span_end.min(line_end).max(line_start) - line_start) as usize;

    let start_col = line_text
        .get(..start_byte.min(line_text.len()))
        .map_or(0, |s| s.chars().count());
    let end_col = line_text
        .get(..end_byte.min(line_text.len()))
        .map_or(start_col, |s| s.chars().count());
    Some((start_col, end_col.max(start_col)))
}

/// Render `info.message` followed by an underlined source snippet.
pub(crate) fn render(info: &ErrorInfo, source: &str) -> String {
    let table = LineOffsetTable::build(source);

    let mut out = String::new();
    if info.span.is_invalid() {
        out.push_str(&info.message);
        return out;
    }

    let (line, col) = table.offset_to_line_col(source, info.span.start);
    out.push_str(&info.message);
    out.push_str(&format!(" at line {line}, col {col}"));

    let last_line = table.line_from_offset(info.span.end.saturating_sub(1)).max(line);
    let gutter = digit_count(last_line);

    out.push('\n');
    out.push_str(&format!("{:gutter$} |", ""));

    // Underline the span on each line it touches (error spans are almost
    // always single-line; raw strings are the exception).
    for ln in line..=last_line {
        let Some(text) = table.line_text(source, ln) else {
            break;
        };
        let Some((start_col, end_col)) =
            span_columns_on_line(&table, source, ln, info.span.start, info.span.end)
        else {
            break;
        };
        out.push('\n');
        out.push_str(&format!("{ln:gutter$} | {text}"));
        out.push('\n');
        let underline_len = (end_col - start_col).max(1);
        out.push_str(&format!(
            "{:gutter$} | {:start_col$}{}",
            "",
            "",
            "^".repeat(underline_len)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jxc_ir::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_single_line_snippet() {
        let source = "key: \"oops";
        let info = ErrorInfo::new("unterminated string", Span::new(5, 10));
        let rendered = render(&info, source);
        assert_eq!(
            rendered,
            "unterminated string at line 1, col 6\n  |\n1 | key: \"oops\n  |      ^^^^^"
        );
    }

    #[test]
    fn renders_second_line() {
        let source = "{\n  x: ]\n}";
        let info = ErrorInfo::new("unexpected `]`", Span::new(7, 8));
        let rendered = render(&info, source);
        assert!(rendered.contains("line 2, col 6"));
        assert!(rendered.contains("2 |   x: ]"));
        assert!(rendered.ends_with("  |      ^"));
    }

    #[test]
    fn no_span_renders_message_only() {
        let info = ErrorInfo::unlocated("something failed");
        assert_eq!(render(&info, "abc"), "something failed");
    }
}
