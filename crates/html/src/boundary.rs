//! Locating the `>` that ends a tag on malformed pages.
//!
//! A `>` inside a quoted attribute value does not end the tag, except when the quote looks
//! unterminated:
//! - a newline shows up before the quote closes after a `>` was already seen, or
//! - `><` shows up inside the quote (a new tag presumably starts).
//!
//! In both cases the tag ends at the first `>` seen after the quote opened. A quote only
//! opens where an attribute value starts, i.e. as the first non-blank byte after `=`.

/// Offset of the `>` that ends the tag whose interior starts at `start`, or `None` when
/// the input ends first.
pub fn find_tag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut first_gt_in_quote: Option<usize> = None;
    let mut after_equals = false;
    let mut i = start;

    while i < bytes.len() {
        let c = bytes[i];
        match quote {
            None => {
                if c == b'>' {
                    return Some(i);
                }
                if after_equals && (c == b'"' || c == b'\'') {
                    quote = Some(c);
                    first_gt_in_quote = None;
                    after_equals = false;
                } else if c == b'=' {
                    after_equals = true;
                } else if !c.is_ascii_whitespace() {
                    after_equals = false;
                }
            }
            Some(q) => {
                if c == q {
                    quote = None;
                } else if c == b'>' {
                    let first = *first_gt_in_quote.get_or_insert(i);
                    if bytes.get(i + 1) == Some(&b'<') {
                        return Some(first);
                    }
                } else if c == b'\n'
                    && let Some(first) = first_gt_in_quote
                {
                    return Some(first);
                }
            }
        }
        i += 1;
    }

    // Unterminated quote that did contain a `>`: fall back to it.
    first_gt_in_quote
}
