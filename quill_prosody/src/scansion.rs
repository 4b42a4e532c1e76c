// Presentation helpers built on the resolver: syllable counts, the haiku
// check, and scansion mark lines.
//
// A scansion line puts one mark per syllable under the word it belongs to.
// Each word's character span is divided evenly among its syllables and the
// mark sits at the start of each share, so "compare" (two syllables, seven
// chars) gets marks at columns 0 and 3 of the word. Marks never collide: a
// word with more syllables than characters pushes later marks rightward.

use quill_lexicon::resolver::spell_syllables;
use quill_lexicon::{Resolver, Stress};

use crate::text;

/// Syllable counts a haiku must have, line by line.
pub const HAIKU_COUNTS: [usize; 3] = [5, 7, 5];

/// Separator placed between syllables by `syllabified`.
pub const SYLLABLE_SEPARATOR: char = '\u{b7}';

/// Total syllables in a line.
pub fn line_syllables(resolver: &Resolver<'_>, line: &str) -> usize {
    text::words(line)
        .iter()
        .map(|w| resolver.resolve(w.text).len())
        .sum()
}

/// Syllable count of every line, blank lines included as 0.
pub fn syllable_counts(resolver: &Resolver<'_>, text: &str) -> Vec<usize> {
    text::lines(text)
        .map(|line| line_syllables(resolver, line))
        .collect()
}

/// True for exactly three nonblank lines of 5, 7, and 5 syllables.
pub fn is_haiku(resolver: &Resolver<'_>, text: &str) -> bool {
    is_haiku_counts(text::lines(text).map(|line| (line, line_syllables(resolver, line))))
}

/// The haiku check over lines whose syllables are already counted. Blank
/// lines are ignored.
pub fn is_haiku_counts<'t>(lines: impl IntoIterator<Item = (&'t str, usize)>) -> bool {
    let counts: Vec<usize> = lines
        .into_iter()
        .filter(|(line, _)| !text::is_blank(line))
        .map(|(_, count)| count)
        .collect();
    counts == HAIKU_COUNTS
}

/// The mark drawn for a stress level.
pub fn mark(stress: Stress) -> char {
    match stress {
        Stress::Primary => '/',
        Stress::Secondary => '\\',
        Stress::Unstressed => 'u',
    }
}

/// A mark line aligned under `line`, trailing spaces trimmed.
pub fn scansion(resolver: &Resolver<'_>, line: &str) -> String {
    let mut columns: Vec<char> = Vec::new();
    let mut next_free = 0;

    for word in text::words(line) {
        let stresses = resolver.stresses(word.text);
        let n = stresses.len();
        for (k, stress) in stresses.into_iter().enumerate() {
            let col = (word.char_start + k * word.char_len / n).max(next_free);
            if columns.len() <= col {
                columns.resize(col + 1, ' ');
            }
            columns[col] = mark(stress);
            next_free = col + 1;
        }
    }

    columns.into_iter().collect::<String>().trim_end().to_string()
}

/// The line with each word's syllables joined by `·`.
///
/// Punctuation and spacing between words are kept as written.
pub fn syllabified(resolver: &Resolver<'_>, line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut copied = 0;

    for word in text::words(line) {
        out.push_str(&line[copied..word.byte_start]);
        let count = resolver.resolve(word.text).len();
        let chunks = spell_syllables(word.text, count);
        out.push_str(&chunks.join(&SYLLABLE_SEPARATOR.to_string()));
        copied = word.byte_start + word.text.len();
    }
    out.push_str(&line[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_lexicon::PronunciationStore;

    const SAMPLE: &str = "AN  AE1 N
OLD  OW1 L D
SILENT  S AY1 L AH0 N T
POND  P AA1 N D
A  AH0
FROG  F R AA1 G
JUMPS  JH AH1 M P S
INTO  IH1 N T UW0
THE  DH AH0
SPLASH  S P L AE1 SH
SILENCE  S AY1 L AH0 N S
AGAIN  AH0 G EH1 N
SHALL  SH AE1 L
I  AY1
COMPARE  K AH0 M P EH1 R
SOMETIME  S AH1 M T AY2 M
";

    fn store() -> PronunciationStore {
        PronunciationStore::from_cmu_text(SAMPLE).unwrap()
    }

    const HAIKU: &str = "An old silent pond\nA frog jumps into the pond\nSplash! Silence again";

    #[test]
    fn test_line_syllables() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(syllable_counts(&resolver, HAIKU), vec![5, 7, 5]);
        assert_eq!(line_syllables(&resolver, ""), 0);
        assert_eq!(line_syllables(&resolver, "... 42 --"), 0);
    }

    #[test]
    fn test_is_haiku() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert!(is_haiku(&resolver, HAIKU));
        // Blank lines around and between do not count.
        let spaced = "\nAn old silent pond\n\nA frog jumps into the pond\nSplash! Silence again\n\n";
        assert!(is_haiku(&resolver, spaced));
        assert!(!is_haiku(&resolver, "An old silent pond\nA frog jumps into the pond"));
        assert!(!is_haiku(&resolver, "An old pond\nA frog jumps into the pond\nSplash! Silence again"));
    }

    #[test]
    fn test_is_haiku_counts_skips_blank_lines() {
        assert!(is_haiku_counts([("a", 5), ("", 0), ("b", 7), ("   ", 0), ("c", 5)]));
        assert!(!is_haiku_counts([("a", 5), ("b", 7)]));
        // A nonblank line without syllables still counts as a line.
        assert!(!is_haiku_counts([("a", 5), ("b", 7), ("c", 5), ("42", 0)]));
    }

    #[test]
    fn test_is_haiku_rejects_four_lines() {
        let store = store();
        let resolver = Resolver::new(&store);
        let text = format!("{HAIKU}\nAn old silent pond");
        assert!(!is_haiku(&resolver, &text));
    }

    #[test]
    fn test_scansion_aligns_marks_with_words() {
        let store = store();
        let resolver = Resolver::new(&store);
        let line = "Shall I compare";
        assert_eq!(scansion(&resolver, line), "/     / u  /");
    }

    #[test]
    fn test_scansion_secondary_and_leading_space() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(scansion(&resolver, "  sometime"), "  /   \\");
        assert_eq!(scansion(&resolver, "   "), "");
    }

    #[test]
    fn test_scansion_never_collides() {
        let resolver = Resolver::heuristic();
        // Two estimated syllables squeezed into a short word still get two marks.
        let marks = scansion(&resolver, "ble");
        assert_eq!(marks.chars().filter(|&c| c == '/').count(), 2);
    }

    #[test]
    fn test_syllabified() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(
            syllabified(&resolver, "Splash! Silence again."),
            "Splash! Si\u{b7}lence a\u{b7}gain."
        );
        assert_eq!(syllabified(&resolver, ""), "");
    }
}
