/// Characters that terminate a line. `\r\n` is handled as a single
/// terminator.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Splits text into lines, dropping the line terminators.
///
/// A trailing terminator does not produce an empty final line, so documents
/// that differ only in a final newline compare equal line by line.
///
/// ## Example
///
/// ```not_rust
/// "Hello\nWorld!"      -> ["Hello", "World!"]
/// "Line 1\r\nLine 2\n" -> ["Line 1", "Line 2"]
/// "Start\n\nEnd"       -> ["Start", "", "End"]
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut line_start = 0;

    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }

        result.push(&text[line_start..i]);
        line_start = i + c.len_utf8();

        if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            line_start += 1;
        }
    }

    if line_start < text.len() {
        result.push(&text[line_start..]);
    }

    result
}
