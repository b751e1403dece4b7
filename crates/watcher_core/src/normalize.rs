/// Joiner placed between surviving lines of normalized text.
pub const LINE_SEPARATOR: &str = "\r\n";

/// Canonical form used for change comparison: split on CR/LF, trim every
/// line, drop blank lines and rejoin with [`LINE_SEPARATOR`].
///
/// Text made only of blank lines normalizes to the empty string.
pub fn normalize(raw: &str) -> String {
    raw.split(|c: char| c == '\r' || c == '\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}
