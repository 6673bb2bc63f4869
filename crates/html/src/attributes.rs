//! Attribute scanning for the interior of a start tag.

use crate::entities::decode_entities;

/// One `name=value` pair in source order. Duplicates are kept.
pub type Attribute = (String, String);

/// Parse the bytes between a tag name and its closing `>`.
///
/// - Names start with an ASCII letter and continue with letters, digits, `_`, `-`.
///   They are lowercased.
/// - `name = value` tolerates blanks around `=`. A value opening with `'` or `"` runs to
///   the matching quote (or the end of the span); otherwise it runs to the next blank.
/// - A name without `=` is a boolean attribute with an empty value, but only when it is
///   followed directly by a blank or the end of the span.
/// - Values go through [`decode_entities`].
///
/// Bytes that cannot start a name are skipped.
pub fn parse_attributes(span: &str) -> Vec<Attribute> {
    let bytes = span.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut k = 0;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };
    let is_name_char = |c: u8| c.is_ascii_alphanumeric() || c == b'_' || c == b'-';

    while k < len {
        if !bytes[k].is_ascii_alphabetic() {
            k += 1;
            continue;
        }

        let name_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        let name_end = k;
        let name = span[name_start..name_end].to_ascii_lowercase();

        skip_whitespace(&mut k);
        if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            let raw = if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                while k < len && bytes[k] != quote {
                    k += 1;
                }
                let raw = &span[vstart..k];
                if k < len {
                    k += 1;
                }
                raw
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() {
                    k += 1;
                }
                &span[vstart..k]
            };
            attributes.push((name, decode_entities(raw)));
            continue;
        }

        // Boolean form needs a clean boundary right after the name.
        if name_end == len || bytes[name_end].is_ascii_whitespace() {
            attributes.push((name, String::new()));
        }
    }

    attributes
}
