//! DOT format helpers.

/// Escapes a string for use inside a quoted DOT label.
///
/// # Examples
///
/// ```rust
/// use lindgraph::utils::escape_dot;
///
/// assert_eq!(escape_dot("say \"hi\""), "say \\\"hi\\\"");
/// ```
#[must_use]
pub fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}
