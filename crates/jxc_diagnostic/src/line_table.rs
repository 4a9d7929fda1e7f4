//! Line offset table for line/column lookup.
//!
//! Scans the source once to record every line start, then answers
//! offset→line/col queries with a binary search.

/// Pre-computed byte offsets of line starts.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build from source text. O(n) construction, O(log L) lookups.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source buffers are bounded by u32 offsets"
    )]
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line number containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column) for `offset`. The column counts characters,
    /// not bytes, so multi-byte UTF-8 aligns with what an editor shows.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col_chars = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        let col = u32::try_from(col_chars).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }

    /// Byte offset of a 1-based line start, or `None` if out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// The text of a 1-based line, without its trailing newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let start = self.line_start_offset(line)? as usize;
        let rest = source.get(start..)?;
        Some(rest.split('\n').next().unwrap_or(rest))
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let table = LineOffsetTable::build("hello world");
        assert_eq!(table.line_count(), 1);
        assert_eq!(table.line_from_offset(0), 1);
        assert_eq!(table.line_from_offset(10), 1);
        assert_eq!(table.line_text("hello world", 1), Some("hello world"));
        assert_eq!(table.line_text("hello world", 2), None);
    }

    #[test]
    fn multiple_lines() {
        let source = "line1\nline2\nline3";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_count(), 3);
        assert_eq!(table.line_from_offset(0), 1);
        assert_eq!(table.line_from_offset(5), 1);
        assert_eq!(table.line_from_offset(6), 2);
        assert_eq!(table.line_from_offset(12), 3);
        assert_eq!(table.line_text(source, 2), Some("line2"));
        assert_eq!(table.offset_to_line_col(source, 7), (2, 2));
    }

    #[test]
    fn unicode_columns_are_char_based() {
        let source = "αβγ\nδε";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.offset_to_line_col(source, 4), (1, 3)); // γ
        assert_eq!(table.offset_to_line_col(source, 7), (2, 1)); // δ
    }

    #[test]
    fn empty_source() {
        let table = LineOffsetTable::build("");
        assert_eq!(table.line_count(), 1);
        assert_eq!(table.offset_to_line_col("", 0), (1, 1));
    }
}
