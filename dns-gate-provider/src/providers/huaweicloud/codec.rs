//! Huawei recordset value and name encoding.

/// Joins content and priority into one recordset value.
///
/// MX values are `"<priority> <content>"`, TXT values are quoted with `\`
/// and `"` escaped. Other types pass through.
pub(crate) fn encode_value(record_type: &str, content: &str, priority: u16) -> String {
    match record_type {
        "MX" => format!("{priority} {content}"),
        "TXT" => {
            let mut quoted = String::with_capacity(content.len() + 2);
            quoted.push('"');
            for c in content.chars() {
                if matches!(c, '\\' | '"') {
                    quoted.push('\\');
                }
                quoted.push(c);
            }
            quoted.push('"');
            quoted
        }
        _ => content.to_string(),
    }
}

/// Inverse of [`encode_value`]; returns `(content, priority)`.
///
/// An MX value without a numeric priority is kept whole with priority 0.
pub(crate) fn decode_value(record_type: &str, raw: &str) -> (String, u16) {
    match record_type {
        "MX" => match raw.split_once(' ') {
            Some((priority, content)) => match priority.parse() {
                Ok(priority) => (content.to_string(), priority),
                Err(_) => (raw.to_string(), 0),
            },
            None => (raw.to_string(), 0),
        },
        "TXT" => {
            let inner = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(raw);
            let mut content = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\'
                    && let Some(escaped) = chars.next()
                {
                    content.push(escaped);
                    continue;
                }
                content.push(c);
            }
            (content, 0)
        }
        _ => (raw.to_string(), 0),
    }
}

/// Fully qualified recordset name with a trailing dot.
///
/// `"www"` → `"www.example.com."`, `"@"` and `""` → `"example.com."`.
/// Names already inside the zone keep their labels.
pub(crate) fn format_name(name: &str, domain: &str) -> String {
    format!(
        "{}.",
        crate::providers::common::relative_to_full_name(name, domain)
    )
}
