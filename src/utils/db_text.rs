/// Undo the HTML entity escaping the management server applies to stored strings.
pub fn fromdb(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

pub fn no_null(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Keep at most `limit` characters; counts chars so multi-byte names never split.
pub fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
