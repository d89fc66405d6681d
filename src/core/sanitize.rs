// src/core/sanitize.rs

/// Decode the handful of entities the dashboard actually emits.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Report file stem: keep alphanumerics, spaces, `-` and `_`; trim trailing whitespace.
/// Falls back to `account_<id>` when nothing survives.
pub fn sanitize_report_filename(name: &str, id: u32) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect();
    let out = kept.trim_end();
    if out.trim().is_empty() { format!("account_{id}") } else { out.to_string() }
}

/// Strip a trailing `%` (and surrounding blanks) from a percentage cell.
pub fn strip_percent(s: &str) -> &str {
    let t = s.trim();
    t.strip_suffix('%').unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_allowed_chars_only() {
        assert_eq!(sanitize_report_filename("Acme Pay / EU|acme.eu ", 7), "Acme Pay  EUacmeeu");
        assert_eq!(sanitize_report_filename("Ünï-Pay_2  ", 1), "Ünï-Pay_2");
        assert_eq!(sanitize_report_filename("***", 9), "account_9");
    }

    #[test]
    fn percent_is_stripped_once() {
        assert_eq!(strip_percent("45.5%"), "45.5");
        assert_eq!(strip_percent(" 12 "), "12");
    }

    #[test]
    fn entities_decode_amp_last() {
        assert_eq!(normalize_entities("a&amp;lt;b"), "a&lt;b");
        assert_eq!(normalize_entities("x&nbsp;y"), "x y");
    }
}
