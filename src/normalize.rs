use std::borrow::Cow;

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
pub fn line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Splits already-normalized text into lines. A trailing newline does not
/// open an extra empty line, and empty input has no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
