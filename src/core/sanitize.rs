// src/core/sanitize.rs

/// Collapse runs of whitespace (including the newlines WebDriver puts between
/// inline children) into single spaces and trim both ends.
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

/// Remove a leading list rank such as `"3. "` from a title.
///
/// Every consecutive `<digits>. ` prefix is removed, so the result never
/// starts with one and applying this twice is the same as applying it once.
/// Titles without the prefix come back unchanged (apart from trimming).
pub fn strip_rank_prefix(title: &str) -> String {
    let mut rest = title.trim();
    while let Some(after) = rank_tail(rest) {
        rest = after;
    }
    rest.to_string()
}

// "12. Heat" -> Some("Heat"); anything else -> None
fn rank_tail(s: &str) -> Option<&str> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 { return None; }
    let tail = s[digits..].strip_prefix(". ")?;
    Some(tail.trim_start())
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
/// `"sci-fi"` becomes `"Sci-Fi"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
