//! Helpers for untrusted input: upload filenames, HTML output and span fields.

use std::path::Path;

/// Returns only the filename component of a path (no directory).
///
/// Safe for span fields: reveals the file name without exposing the full path.
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Reduces a client-supplied filename to a safe flat name.
///
/// Path separators become spaces, whitespace runs are joined with `_`,
/// anything outside `[A-Za-z0-9_.-]` is dropped and leading or trailing
/// `.`/`_` are stripped. Returns `None` when nothing is left.
///
/// ```
/// use docsift::sanitize::secure_filename;
///
/// assert_eq!(secure_filename("My cool movie.mov").as_deref(), Some("My_cool_movie.mov"));
/// assert_eq!(secure_filename("../../../etc/passwd").as_deref(), Some("etc_passwd"));
/// assert_eq!(secure_filename("..."), None);
/// ```
pub fn secure_filename(filename: &str) -> Option<String> {
    let spaced = filename.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Escapes text for HTML element content and quoted attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
