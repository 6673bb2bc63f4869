//! Opaque content of `script`, `style`, and `textarea`.
//!
//! The end is the first case-insensitive occurrence of the literal `</name`, regardless of
//! any `<` or `>` in between. The end tag itself runs to the next `<` or `>`.

use crate::cursor::starts_with_ignore_ascii_case_at;
use memchr::{memchr, memchr2};

/// Element whose content is not tokenized as markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawTextKind {
    Script,
    Style,
    Textarea,
}

impl RawTextKind {
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "script" => Some(Self::Script),
            "style" => Some(Self::Style),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }

    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Style => "style",
            Self::Textarea => "textarea",
        }
    }

    fn close_tag(self) -> &'static [u8] {
        match self {
            Self::Script => b"</script",
            Self::Style => b"</style",
            Self::Textarea => b"</textarea",
        }
    }

    /// Textarea content is entity-decoded; script and style are verbatim.
    pub fn decodes_entities(self) -> bool {
        matches!(self, Self::Textarea)
    }
}

/// Where raw-text content stops and where scanning resumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawTextEnd {
    /// Offset of the `<` of the end tag.
    pub content_end: usize,
    /// Offset just past the end tag's `>`, or of a `<` that cut the end tag short.
    pub resume_at: usize,
}

/// Find the end of raw-text content starting at `start`.
pub fn find_raw_text_end(haystack: &[u8], start: usize, kind: RawTextKind) -> Option<RawTextEnd> {
    let content_end = find_ignore_ascii_case(haystack, start, kind.close_tag())?;
    let after = content_end + kind.close_tag().len();
    let rel = memchr2(b'<', b'>', &haystack[after..])?;
    let stop = after + rel;
    let resume_at = if haystack[stop] == b'>' { stop + 1 } else { stop };
    Some(RawTextEnd {
        content_end,
        resume_at,
    })
}

// it only attempts matches starting at ASCII <
// < cannot appear in UTF-8 continuation bytes
fn find_ignore_ascii_case(haystack: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    debug_assert!(needle.first() == Some(&b'<'));
    let n = needle.len();
    let mut i = start;
    while i + n <= haystack.len() {
        i += memchr(b'<', &haystack[i..])?;
        if starts_with_ignore_ascii_case_at(haystack, i, needle) {
            return Some(i);
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(s: &str, kind: RawTextKind) -> Option<(usize, usize)> {
        find_raw_text_end(s.as_bytes(), 0, kind).map(|e| (e.content_end, e.resume_at))
    }

    #[test]
    fn finds_end_tag_case_insensitively() {
        let s = "let x = 1;</ScRiPt>after";
        assert_eq!(end(s, RawTextKind::Script), Some((10, 19)));
    }

    #[test]
    fn ignores_markup_inside_content() {
        let s = "var x = \"<b>\"; if (a > b) {}</script>";
        let (content_end, resume_at) = end(s, RawTextKind::Script).expect("end tag");
        assert_eq!(&s[..content_end], "var x = \"<b>\"; if (a > b) {}");
        assert_eq!(resume_at, s.len());
    }

    #[test]
    fn end_tag_may_carry_junk_before_gt() {
        let s = "body{}</style foo>x";
        assert_eq!(end(s, RawTextKind::Style), Some((6, 18)));
    }

    #[test]
    fn end_tag_cut_short_by_lt_resumes_at_lt() {
        let s = "abc</textarea <p>";
        assert_eq!(end(s, RawTextKind::Textarea), Some((3, 14)));
    }

    #[test]
    fn missing_end_tag_or_missing_gt_is_none() {
        assert_eq!(end("no end tag", RawTextKind::Script), None);
        assert_eq!(end("x</script", RawTextKind::Script), None);
    }

    #[test]
    fn near_misses_do_not_end_content() {
        let s = "</scrip></styl></script>";
        assert_eq!(end(s, RawTextKind::Script), Some((15, 24)));
    }

    #[test]
    fn handles_dense_near_match_body() {
        let body = "</scripX>".repeat(10_000);
        let s = format!("{body}</SCRIPT>");
        assert_eq!(
            end(&s, RawTextKind::Script),
            Some((body.len(), s.len()))
        );
    }
}
