//! Log sanitization
//!
//! Vendor responses can echo TXT/DKIM payloads and request ids at length, and
//! credentials must never reach a log line in full.

/// Maximum number of bytes of a body included in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Leading characters of a key id kept visible by [`mask_key_id`].
const VISIBLE_KEY_PREFIX: usize = 4;

/// Truncates `s` to at most [`TRUNCATE_LIMIT`] bytes on a char boundary,
/// noting the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Keeps the first few characters of a key id and masks the rest.
pub fn mask_key_id(key_id: &str) -> String {
    let visible: String = key_id.chars().take(VISIBLE_KEY_PREFIX).collect();
    if visible.len() == key_id.len() {
        "*".repeat(key_id.chars().count())
    } else {
        format!("{visible}***")
    }
}
