//! Read position over the source buffer.

use memchr::memchr_iter;

/// Immutable view over the markup plus a read position and a 1-based line counter.
///
/// Invariant: `line` is one more than the number of `\n` bytes before `pos`. Every
/// movement goes through [`SourceCursor::advance_to`], so newlines inside comments, tag
/// interiors, and raw-text spans are all counted.
#[derive(Debug)]
pub(crate) struct SourceCursor<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
}

impl<'a> SourceCursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    pub(crate) fn src(&self) -> &'a str {
        self.src
    }

    pub(crate) fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Move forward to `target`, counting the newlines skipped.
    pub(crate) fn advance_to(&mut self, target: usize) {
        let target = target.min(self.src.len());
        debug_assert!(target >= self.pos, "cursor never moves backwards");
        debug_assert!(self.src.is_char_boundary(target));
        self.line += count_newlines(&self.bytes()[self.pos..target]);
        self.pos = target;
    }
}

fn count_newlines(bytes: &[u8]) -> u32 {
    memchr_iter(b'\n', bytes).count() as u32
}

pub(crate) fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_every_newline() {
        let mut cursor = SourceCursor::new("a\nb\n\nc");
        assert_eq!(cursor.line(), 1);
        cursor.advance_to(2);
        assert_eq!(cursor.line(), 2);
        cursor.advance_to(6);
        assert_eq!(cursor.line(), 4);
        assert!(cursor.at_end());
    }

    #[test]
    fn advance_clamps_to_input_length() {
        let mut cursor = SourceCursor::new("x\n");
        cursor.advance_to(100);
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.line(), 2);
    }

    #[test]
    fn prefix_match_ignores_ascii_case() {
        assert!(starts_with_ignore_ascii_case_at(b"<!DocType html>", 2, b"doctype"));
        assert!(!starts_with_ignore_ascii_case_at(b"<!doc", 2, b"doctype"));
    }
}
