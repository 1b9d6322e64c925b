//! Character-set checks applied to cookie names, values and attributes.

/// Returns `true` if `s` matches the `field-content` grammar from
/// [RFC 7230 §3.2](https://datatracker.ietf.org/doc/html/rfc7230#section-3.2).
///
/// Accepted bytes are horizontal tabs, visible ASCII characters, spaces and
/// `obs-text` (`0x80`-`0xFF`).
/// Everything else (control characters, `CR`, `LF`, `DEL`) is rejected, since it
/// could be used to inject additional headers or attributes.
///
/// The empty string is rejected.
pub fn is_field_content(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| matches!(b, b'\t' | 0x20..=0x7E | 0x80..=0xFF))
}
