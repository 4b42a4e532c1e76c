// Line and word tokenization.
//
// A word is a maximal run of letters, apostrophes (straight or curly), and
// hyphens that contains at least one letter. Everything else (spaces,
// punctuation, digits, em-dashes) separates words. Each word keeps its byte
// offset for slicing and its char offset/length for column alignment in
// scansion output.

/// A word within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan<'a> {
    /// The word as written, punctuation excluded.
    pub text: &'a str,
    /// Byte offset of the word within its line.
    pub byte_start: usize,
    /// Char offset of the word within its line.
    pub char_start: usize,
    /// Length of the word in chars.
    pub char_len: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '\'' | '\u{2019}' | '\u{2018}' | '-')
}

/// Split text into lines, accepting `\n` and `\r\n`.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
}

/// Whether a line has any visible content.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// All words in a line, in reading order.
pub fn words(line: &str) -> Vec<WordSpan<'_>> {
    let mut out = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut char_idx = 0;

    for (byte_idx, c) in line.char_indices() {
        if is_word_char(c) {
            if current.is_none() {
                current = Some((byte_idx, char_idx));
            }
        } else if let Some((byte_start, char_start)) = current.take() {
            push_word(&mut out, line, byte_start, byte_idx, char_start, char_idx);
        }
        char_idx += 1;
    }
    if let Some((byte_start, char_start)) = current {
        push_word(&mut out, line, byte_start, line.len(), char_start, char_idx);
    }

    out
}

fn push_word<'a>(
    out: &mut Vec<WordSpan<'a>>,
    line: &'a str,
    byte_start: usize,
    byte_end: usize,
    char_start: usize,
    char_end: usize,
) {
    let text = &line[byte_start..byte_end];
    if text.chars().any(char::is_alphabetic) {
        out.push(WordSpan {
            text,
            byte_start,
            char_start,
            char_len: char_end - char_start,
        });
    }
}

/// The line's final word with trailing punctuation stripped.
pub fn last_word(line: &str) -> Option<&str> {
    words(line).last().map(|w| w.text)
}
