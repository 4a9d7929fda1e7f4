//! Bounds-checked cursor over the source buffer.
//!
//! The cursor reads bytes one at a time and reports `0x00` at end of input,
//! so scanning loops terminate on any predicate that rejects the null byte.
//! Unlike a sentinel-terminated copy, the cursor borrows the caller's
//! `&str` directly — token slices share the input's lifetime and no owned
//! buffer is needed.

/// Byte cursor with cheap copies for backtracking.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at position 0.
    ///
    /// Sources larger than `u32::MAX` bytes are not supported; the tail
    /// beyond that limit is never reached because positions saturate at the
    /// source length check in [`is_eof`](Self::is_eof).
    pub fn new(src: &'a str) -> Self {
        Cursor {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    /// Byte at the current position, or `0x00` at end of input.
    ///
    /// JXC source is UTF-8 text and never contains NUL, so `0` is
    /// unambiguous (an interior NUL lexes as an invalid byte anyway).
    #[inline]
    pub fn current(&self) -> u8 {
        self.bytes.get(self.pos as usize).copied().unwrap_or(0)
    }

    /// Byte one position ahead, or `0x00` past the end.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.bytes
            .get(self.pos as usize + 1)
            .copied()
            .unwrap_or(0)
    }

    /// Byte two positions ahead, or `0x00` past the end.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.bytes
            .get(self.pos as usize + 2)
            .copied()
            .unwrap_or(0)
    }

    /// Advance by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = match self.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        self.advance_n(width);
    }

    /// `true` once the cursor has consumed the whole source.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.bytes.len()
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source in bytes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source buffers are bounded by u32 offsets"
    )]
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.bytes.len() as u32
    }

    /// Source substring for `start..end`.
    ///
    /// Boundaries must fall on character boundaries, which holds for every
    /// span the scanner produces (tokens start and end at ASCII bytes or
    /// whole characters).
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.src.get(start as usize..end as usize).unwrap_or("")
    }

    /// Source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` accepts the current byte.
    ///
    /// `pred(0)` must be `false`, which holds for every byte-class
    /// predicate used by the scanner.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance past horizontal whitespace (spaces and tabs).
    ///
    /// A simple byte loop beats vectorized scans for the 1–4 byte runs
    /// typical between tokens.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        loop {
            let b = self.current();
            if b == b' ' || b == b'\t' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Advance to the next `\n` or end of input (SIMD-accelerated).
    ///
    /// Used for comment bodies. The newline itself is not consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within the buffer fit in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.bytes[(self.pos as usize).min(self.bytes.len())..];
        match memchr::memchr(b'\n', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len(),
        }
    }

    /// Skip ordinary string content up to the next interesting byte and
    /// return it (`quote`, `\`, `\n`, `\r`), or `0` at end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within the buffer fit in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = &self.bytes[(self.pos as usize).min(self.bytes.len())..];
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);
        let offset = match (primary, cr) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        match offset {
            Some(off) => {
                self.pos += off as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len();
                0
            }
        }
    }

    /// Advance to the next occurrence of `byte` and return `true`, or move
    /// to end of input and return `false`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within the buffer fit in u32"
    )]
    pub fn seek_byte(&mut self, byte: u8) -> bool {
        let remaining = &self.bytes[(self.pos as usize).min(self.bytes.len())..];
        match memchr::memchr(byte, remaining) {
            Some(off) => {
                self.pos += off as u32;
                true
            }
            None => {
                self.pos = self.source_len();
                false
            }
        }
    }

    /// Find `needle` at or after the current position (SIMD substring
    /// search). Returns its absolute byte offset.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within the buffer fit in u32"
    )]
    pub fn find_forward(&self, needle: &[u8]) -> Option<u32> {
        let start = (self.pos as usize).min(self.bytes.len());
        memchr::memmem::find(&self.bytes[start..], needle).map(|off| self.pos + off as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn current_and_peek_past_end() {
        let mut cur = Cursor::new("ab");
        assert_eq!(cur.current(), b'a');
        assert_eq!(cur.peek(), b'b');
        assert_eq!(cur.peek2(), 0);
        cur.advance_n(2);
        assert!(cur.is_eof());
        assert_eq!(cur.current(), 0);
        assert_eq!(cur.peek(), 0);
    }

    #[test]
    fn eat_while_stops_at_eof() {
        let mut cur = Cursor::new("aaa");
        cur.eat_while(|b| b == b'a');
        assert!(cur.is_eof());
        assert_eq!(cur.pos(), 3);
    }

    #[test]
    fn slice_and_slice_from() {
        let mut cur = Cursor::new("hello world");
        cur.advance_n(5);
        assert_eq!(cur.slice(0, 5), "hello");
        assert_eq!(cur.slice_from(0), "hello");
    }

    #[test]
    fn newline_scan() {
        let mut cur = Cursor::new("# comment\nrest");
        cur.eat_until_newline_or_eof();
        assert_eq!(cur.current(), b'\n');
        assert_eq!(cur.pos(), 9);

        let mut cur = Cursor::new("# no newline");
        cur.eat_until_newline_or_eof();
        assert!(cur.is_eof());
    }

    #[test]
    fn string_delim_scan() {
        let mut cur = Cursor::new("abc\\ndef\"tail");
        assert_eq!(cur.skip_to_string_delim(b'"'), b'\\');
        cur.advance_n(2);
        assert_eq!(cur.skip_to_string_delim(b'"'), b'"');
        assert_eq!(cur.pos(), 8);
    }

    #[test]
    fn find_forward_substring() {
        let cur = Cursor::new("body)TAG\" rest");
        assert_eq!(cur.find_forward(b")TAG\""), Some(4));
        assert_eq!(cur.find_forward(b")NOPE\""), None);
    }

    #[test]
    fn advance_char_multibyte() {
        let mut cur = Cursor::new("λx");
        cur.advance_char();
        assert_eq!(cur.current(), b'x');
    }
}
