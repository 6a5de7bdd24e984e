//! Text helpers shared by the extractor and the prompt builder.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// Respects UTF-8 boundaries and never panics on multi-byte input.
///
/// # Examples
/// ```
/// # use search_lens::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("日本語のテキスト", 3), "日本語");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Trim a string and collapse every internal whitespace run to one space.
///
/// Result cards spread their text over many inline nodes; concatenated
/// text content is full of newlines and indentation.
///
/// ```
/// # use search_lens::utils::collapse_whitespace;
/// assert_eq!(collapse_whitespace("  Rust \n\t ownership  "), "Rust ownership");
/// assert_eq!(collapse_whitespace(" \n "), "");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
