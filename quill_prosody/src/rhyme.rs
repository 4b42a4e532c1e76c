// Rhyme fingerprints, rhyme-scheme assignment, form compliance, and
// internal rhymes.
//
// A word's fingerprint is its phonetic tail: the phonemes from the vowel of
// its last stressed syllable (primary or secondary; the final syllable if
// none is stressed) to the end of the word. Two words rhyme perfectly when
// their tails are identical, and slant-rhyme when the tails differ but the
// final syllables' vowels agree under the configured `SlantPolicy`. Words
// the dictionary does not know have no fingerprint unless the orthographic
// fallback is enabled, in which case their spelling tail is compared instead.
//
// Scheme assignment is greedy and monotonic: each line compares its final
// word against every earlier labelled line, joins the first perfect match,
// else the first slant match, else opens the next letter. Letters are handed
// out strictly in first-appearance order, so the labels used on lines 0..i
// are always a prefix of A, B, C, ... Lines with no fingerprint get `X` and
// take no part in grouping.
//
// Form compliance checks an expected pattern ("ABAB CDCD EFEF GG") against
// the filled lines, reporting per line whether it matches its partners.

use std::collections::BTreeMap;
use std::fmt;

use quill_lexicon::arpabet;
use quill_lexicon::{Pronunciation, Resolver, Source, normalize};
use serde::{Deserialize, Serialize};

use crate::text;

/// How close two final vowels must be for a slant rhyme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlantPolicy {
    /// Final vowel phonemes identical ("time" / "mine").
    #[default]
    VowelNucleus,
    /// Final vowels in the same front/central/back/diphthong family.
    VowelFamily,
    /// No slant rhymes; only perfect matches group lines.
    Off,
}

impl SlantPolicy {
    fn vowels_match(self, a: &str, b: &str) -> bool {
        match self {
            SlantPolicy::VowelNucleus => a == b,
            SlantPolicy::VowelFamily => match (arpabet::vowel_family(a), arpabet::vowel_family(b)) {
                (Some(fa), Some(fb)) => fa == fb,
                _ => a == b,
            },
            SlantPolicy::Off => false,
        }
    }
}

/// Which word pairs the internal-rhyme scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternalRhymeScope {
    /// Every pair of occurrences with equal tails, including repeats of one
    /// word and tails anchored on an unstressed vowel.
    AllPairs,
    /// Drop repeats of the same word and unstressed tails ("a" / "the").
    #[default]
    DistinctStressed,
}

/// Rhyme comparison settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RhymeConfig {
    pub slant_policy: SlantPolicy,
    /// Compare spelling tails for words missing from the dictionary.
    pub orthographic_fallback: bool,
    pub internal_scope: InternalRhymeScope,
}

/// How well two words rhyme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RhymeQuality {
    Perfect,
    Slant,
    None,
}

/// The phonetic (or, as a fallback, spelled) tail of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Phonemes from the anchor vowel to the end of the word.
    pub tail: Vec<String>,
    /// Vowel of the word's final syllable.
    pub final_vowel: String,
    /// Whether the anchor syllable carries stress.
    pub stressed: bool,
}

impl Fingerprint {
    /// Fingerprint of a dictionary pronunciation.
    pub fn from_pronunciation(pron: &Pronunciation) -> Option<Fingerprint> {
        let syllables = &pron.syllables;
        let last = syllables.last()?;
        let anchor = syllables
            .iter()
            .rposition(|s| s.stress.is_stressed())
            .unwrap_or(syllables.len() - 1);

        let tail: Vec<String> = syllables[anchor..]
            .iter()
            .enumerate()
            .flat_map(|(i, syl)| {
                let phonemes = syl.phonemes();
                // The anchor syllable contributes from its vowel onward.
                let skip = if i == 0 {
                    syl.phonemes().take_while(|p| !arpabet::is_vowel(p)).count()
                } else {
                    0
                };
                phonemes.skip(skip).map(str::to_string)
            })
            .collect();

        Some(Fingerprint {
            tail,
            final_vowel: last.nucleus()?.to_string(),
            stressed: syllables[anchor].stress.is_stressed(),
        })
    }

    /// Spelling-based fingerprint: letters from the last vowel group,
    /// skipping a final silent `e` ("cake" → "ake").
    pub fn from_spelling(word: &str) -> Option<Fingerprint> {
        let letters: Vec<char> = normalize(word)
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .collect();
        let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

        let n = letters.len();
        let search_end = if n > 3 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) {
            n - 1
        } else {
            n
        };
        let vowel_end = letters[..search_end].iter().rposition(|&c| is_vowel(c))?;
        let vowel_start = letters[..vowel_end]
            .iter()
            .rposition(|&c| !is_vowel(c))
            .map_or(0, |i| i + 1);

        Some(Fingerprint {
            tail: letters[vowel_start..].iter().map(|c| c.to_string()).collect(),
            final_vowel: letters[vowel_start..=vowel_end].iter().collect(),
            stressed: true,
        })
    }

    /// Compare two fingerprints.
    pub fn compare(&self, other: &Fingerprint, policy: SlantPolicy) -> RhymeQuality {
        if self.tail == other.tail {
            RhymeQuality::Perfect
        } else if policy.vowels_match(&self.final_vowel, &other.final_vowel) {
            RhymeQuality::Slant
        } else {
            RhymeQuality::None
        }
    }
}

/// Fingerprint a raw word, or `None` if it cannot be pronounced.
pub fn fingerprint(resolver: &Resolver<'_>, config: &RhymeConfig, word: &str) -> Option<Fingerprint> {
    let resolved = resolver.resolve(word);
    match resolved.source {
        Source::Dictionary => resolved
            .pronunciation()
            .and_then(|p| Fingerprint::from_pronunciation(&p)),
        Source::Heuristic if config.orthographic_fallback => Fingerprint::from_spelling(word),
        Source::Heuristic => None,
    }
}

/// Compare two raw words.
pub fn rhyme_quality(resolver: &Resolver<'_>, config: &RhymeConfig, a: &str, b: &str) -> RhymeQuality {
    match (fingerprint(resolver, config, a), fingerprint(resolver, config, b)) {
        (Some(fa), Some(fb)) => fa.compare(&fb, config.slant_policy),
        _ => RhymeQuality::None,
    }
}

/// A line's rhyme label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Label {
    Letter(String),
    /// The line has no pronounceable final word.
    X,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Letter(s) => f.pad(s),
            Label::X => f.pad("X"),
        }
    }
}

impl From<Label> for String {
    fn from(label: Label) -> String {
        label.to_string()
    }
}

impl From<String> for Label {
    fn from(s: String) -> Label {
        if s == "X" { Label::X } else { Label::Letter(s) }
    }
}

/// The k-th label (0-based): A..Z, then AA, AB, ...
pub fn letter(k: usize) -> String {
    let mut n = k + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    out.iter().rev().collect()
}

/// Rhyme result for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRhyme {
    pub label: Label,
    pub quality: RhymeQuality,
    /// The line's final word, if it has one.
    pub word: Option<String>,
}

/// Rhyme labels for a poem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RhymeScheme {
    pub lines: Vec<LineRhyme>,
    /// Letter → 0-based line numbers carrying it.
    pub label_groups: BTreeMap<String, Vec<usize>>,
}

impl RhymeScheme {
    /// Labels as strings, one per line.
    pub fn labels(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.label.to_string()).collect()
    }

    /// Compact rendering, e.g. "ABAB" (X for unlabelled lines).
    pub fn pattern(&self) -> String {
        self.labels().concat()
    }
}

/// Label every line by its final word's rhyme.
pub fn assign_scheme<S: AsRef<str>>(
    resolver: &Resolver<'_>,
    config: &RhymeConfig,
    lines: &[S],
) -> RhymeScheme {
    let mut scheme = RhymeScheme::default();
    let mut labelled: Vec<(String, Fingerprint)> = Vec::new();
    let mut next_letter = 0;

    for (i, line) in lines.iter().enumerate() {
        let word = text::last_word(line.as_ref());
        let Some(fp) = word.and_then(|w| fingerprint(resolver, config, w)) else {
            scheme.lines.push(LineRhyme {
                label: Label::X,
                quality: RhymeQuality::None,
                word: word.map(str::to_string),
            });
            continue;
        };

        let perfect = labelled
            .iter()
            .find(|(_, other)| fp.compare(other, config.slant_policy) == RhymeQuality::Perfect);
        let slant = || {
            labelled
                .iter()
                .find(|(_, other)| fp.compare(other, config.slant_policy) == RhymeQuality::Slant)
        };

        let (letter_label, quality) = match perfect.or_else(slant) {
            Some((label, other)) => (label.clone(), fp.compare(other, config.slant_policy)),
            None => {
                let fresh = letter(next_letter);
                next_letter += 1;
                (fresh, RhymeQuality::None)
            }
        };

        scheme
            .label_groups
            .entry(letter_label.clone())
            .or_default()
            .push(i);
        scheme.lines.push(LineRhyme {
            label: Label::Letter(letter_label.clone()),
            quality,
            word: word.map(str::to_string),
        });
        labelled.push((letter_label, fp));
    }

    scheme
}

/// How a line measures up against an expected rhyme form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compliance {
    /// Perfect rhyme with a partner line.
    Correct,
    /// Only slant rhymes with partner lines.
    Slant,
    /// Partners are filled but none rhyme.
    Incorrect,
    /// Nothing to compare against yet.
    Pending,
}

/// Parse a form pattern such as "ABAB CDCD EFEF GG".
///
/// Whitespace is ignored, letters are case-insensitive, and `X`, `-`, or `.`
/// mark lines with no rhyme constraint.
pub fn parse_form(pattern: &str) -> Vec<Option<char>> {
    pattern
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            let c = c.to_ascii_uppercase();
            match c {
                'X' | '-' | '.' => None,
                c if c.is_ascii_alphabetic() => Some(c),
                _ => None,
            }
        })
        .collect()
}

/// Check each line against the expected labels.
///
/// The earliest line of a label compares against later filled partners;
/// every other line compares against earlier filled partners. Any perfect
/// partner wins over slant partners, which win over non-rhyming ones.
pub fn check_form_compliance<S: AsRef<str>>(
    resolver: &Resolver<'_>,
    config: &RhymeConfig,
    lines: &[S],
    expected: &[Option<char>],
) -> Vec<Compliance> {
    let words: Vec<Option<&str>> = lines.iter().map(|l| text::last_word(l.as_ref())).collect();
    let prints: Vec<Option<Fingerprint>> = words
        .iter()
        .map(|w| w.and_then(|w| fingerprint(resolver, config, w)))
        .collect();
    let label_of = |i: usize| expected.get(i).copied().flatten();

    (0..lines.len())
        .map(|i| {
            let Some(label) = label_of(i) else {
                return Compliance::Pending;
            };
            if words[i].is_none() {
                return Compliance::Pending;
            }

            let partners: Vec<usize> = (0..lines.len())
                .filter(|&j| j != i && label_of(j) == Some(label))
                .collect();
            let earliest = partners.iter().all(|&j| j > i);
            let filled: Vec<usize> = partners
                .into_iter()
                .filter(|&j| if earliest { j > i } else { j < i })
                .filter(|&j| words[j].is_some())
                .collect();

            let qualities: Vec<RhymeQuality> = filled
                .iter()
                .map(|&j| match (&prints[i], &prints[j]) {
                    (Some(a), Some(b)) => a.compare(b, config.slant_policy),
                    _ => RhymeQuality::None,
                })
                .collect();

            if qualities.contains(&RhymeQuality::Perfect) {
                Compliance::Correct
            } else if qualities.contains(&RhymeQuality::Slant) {
                Compliance::Slant
            } else if !filled.is_empty() {
                Compliance::Incorrect
            } else {
                Compliance::Pending
            }
        })
        .collect()
}

/// A perfect rhyme between two word occurrences anywhere in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalRhyme {
    pub word1: String,
    pub word2: String,
    /// 0-based line of `word1`.
    pub line1: usize,
    /// 0-based line of `word2`.
    pub line2: usize,
}

/// Find perfect rhymes between any two word occurrences.
///
/// Each unordered pair is reported once, in reading order of the first word
/// and then the second. With `InternalRhymeScope::AllPairs` every pair with
/// equal tails counts. The default `DistinctStressed` scope narrows that:
/// repeats of the same word ("day" / "day") and rhymes anchored on an
/// unstressed syllable ("a" / "the") are skipped.
pub fn internal_rhymes(resolver: &Resolver<'_>, config: &RhymeConfig, text: &str) -> Vec<InternalRhyme> {
    let narrow = config.internal_scope == InternalRhymeScope::DistinctStressed;
    let occurrences: Vec<(usize, &str, String, Fingerprint)> = text::lines(text)
        .enumerate()
        .flat_map(|(line_no, line)| {
            text::words(line)
                .into_iter()
                .map(move |w| (line_no, w.text))
        })
        .filter_map(|(line_no, word)| {
            let fp = fingerprint(resolver, config, word)?;
            (fp.stressed || !narrow).then(|| (line_no, word, normalize(word), fp))
        })
        .collect();

    let mut found = Vec::new();
    for (a, (line1, word1, key1, fp1)) in occurrences.iter().enumerate() {
        for (line2, word2, key2, fp2) in &occurrences[a + 1..] {
            if fp1.tail == fp2.tail && (key1 != key2 || !narrow) {
                found.push(InternalRhyme {
                    word1: word1.to_string(),
                    word2: word2.to_string(),
                    line1: *line1,
                    line2: *line2,
                });
            }
        }
    }
    found
}
