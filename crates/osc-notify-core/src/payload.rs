//! Payload normalization: optional base64 decoding followed by text checks.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Decode and validate an invocation payload.
///
/// When `encoded` is set the payload is standard (padded) base64 and is
/// decoded into `scratch`, which is cleared first and reused across calls.
/// The resulting bytes must be [safe text](check_safe_text).
pub fn decode<'a>(raw: &'a [u8], encoded: bool, scratch: &'a mut Vec<u8>) -> Result<&'a str> {
    let bytes: &'a [u8] = if encoded {
        scratch.clear();
        STANDARD.decode_vec(raw, scratch)?;
        debug_assert!(scratch.len() <= raw.len());
        scratch.as_slice()
    } else {
        raw
    };
    let text = std::str::from_utf8(bytes)?;
    check_safe_text(text)?;
    Ok(text)
}

/// Reject control characters other than TAB, LF and CR.
///
/// This covers the C0 range, DEL and the C1 range, so no escape sequence can
/// be smuggled through a notification title or body.
pub fn check_safe_text(text: &str) -> Result<()> {
    match text
        .chars()
        .find(|&c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        Some(c) => Err(Error::UnsafeText {
            codepoint: u32::from(c),
        }),
        None => Ok(()),
    }
}
