//! Excel `_xHHHH_` escape sequences
//!
//! Excel writes characters XML cannot carry as `_xHHHH_`:
//! - `_x000D_` = CR
//! - `_x000A_` = LF
//! - `_x0009_` = Tab
//! - `_x005F_` = a literal underscore (escapes the escape)

use std::borrow::Cow;

/// Decode Excel's `_xHHHH_` escape sequences in a string.
///
/// Anything that is not a complete sequence with four hex digits is kept
/// as-is. Borrows when there is nothing to decode.
pub fn decode_excel_escapes(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_sequence(tail) {
            Some(c) => {
                out.push(c);
                // `_xHHHH_` is seven ASCII bytes
                rest = &tail[7..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn decode_sequence(s: &str) -> Option<char> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || bytes[6] != b'_' {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    char::from_u32(u32::from_str_radix(hex, 16).ok()?)
}
