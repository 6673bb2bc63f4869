//! Character reference decoding.
//!
//! Contract:
//! - Numeric references `&#65;`, `&#x41;`, `&#X41;` decode to UTF-8. The trailing `;` is
//!   optional; the reference ends at the last digit otherwise.
//! - Code points `0..=4` are reserved for internal markers downstream and decode to a space,
//!   as do surrogates, values above U+10FFFF, and digit runs that overflow.
//! - Named references are looked up in [`ENTITY_TABLE`]. The `;` may be omitted. Unknown
//!   names are copied through verbatim.
//! - NUL and tab become spaces.
//! - Decoding is single pass: an expansion is never rescanned, so `&amp;amp;` is `&amp;`.
//!
//! The decoded form is never longer than its source, so callers can size buffers from the
//! input length.

use crate::entity_table::ENTITY_TABLE;

// Longest name in the table is `thetasym`; anything longer cannot match.
const MAX_ENTITY_NAME: usize = 8;

/// Look up a named reference (no leading `&`, no trailing `;`).
///
/// Classic left/right/mid binary search over the sorted table.
pub fn lookup_entity(name: &str) -> Option<char> {
    let word = name.as_bytes();
    if word.is_empty() || word.len() > MAX_ENTITY_NAME {
        return None;
    }
    let mut left = 0usize;
    let mut right = ENTITY_TABLE.len();
    while left < right {
        let mid = left + (right - left) / 2;
        let (candidate, code) = ENTITY_TABLE[mid];
        match word.cmp(candidate.as_bytes()) {
            std::cmp::Ordering::Equal => return char::from_u32(code),
            std::cmp::Ordering::Less => right = mid,
            std::cmp::Ordering::Greater => left = mid + 1,
        }
    }
    None
}

/// Decode character references in `s`.
pub fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'&' && b != b'\0' && b != b'\t' {
            i += 1;
            continue;
        }

        // Flush bytes up to the special byte unchanged (preserves UTF-8).
        if copy_start < i {
            out.push_str(&s[copy_start..i]);
        }

        if b != b'&' {
            out.push(' ');
            i += 1;
            copy_start = i;
            continue;
        }

        if bytes.get(i + 1) == Some(&b'#') {
            i = decode_numeric(s, i, &mut out);
        } else {
            i = decode_named(s, i, &mut out);
        }
        copy_start = i;
    }

    if copy_start < bytes.len() {
        out.push_str(&s[copy_start..]);
    }

    out
}

/// Decode `&#...` starting at `amp`; returns the index just past what was consumed.
fn decode_numeric(s: &str, amp: usize, out: &mut String) -> usize {
    let bytes = s.as_bytes();
    let mut j = amp + 2;
    let hex = matches!(bytes.get(j), Some(b'x' | b'X'));
    if hex {
        j += 1;
    }
    let digits_start = j;
    let radix = if hex { 16 } else { 10 };
    let mut value: Option<u32> = Some(0);
    while let Some(digit) = bytes.get(j).and_then(|&c| (c as char).to_digit(radix)) {
        value = value
            .and_then(|v| v.checked_mul(radix))
            .and_then(|v| v.checked_add(digit));
        j += 1;
    }

    if j == digits_start {
        // `&#` or `&#x` with no digits is plain text.
        out.push('&');
        return amp + 1;
    }
    if bytes.get(j) == Some(&b';') {
        j += 1;
    }

    match value.filter(|&v| v > 4).and_then(char::from_u32) {
        Some(ch) => out.push(ch),
        None => out.push(' '),
    }
    j
}

/// Decode `&name` starting at `amp`; returns the index just past what was consumed.
fn decode_named(s: &str, amp: usize, out: &mut String) -> usize {
    let bytes = s.as_bytes();
    let start = amp + 1;
    let mut j = start;
    while j < bytes.len() && bytes[j].is_ascii_alphanumeric() {
        j += 1;
    }

    if let Some(ch) = lookup_entity(&s[start..j]) {
        out.push(ch);
        if bytes.get(j) == Some(&b';') {
            j += 1;
        }
        return j;
    }

    // Unknown or empty name: copy `&` and the identifier through.
    out.push_str(&s[amp..j]);
    j
}
