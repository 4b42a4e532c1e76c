// Core pronunciation types: stress levels, syllables, pronunciations, and
// dictionary entries.
//
// These types are shared by the store (which builds them from CMU-format
// text), the resolver (which also fabricates them heuristically for unknown
// words), and the prosody crate (meter, rhyme, scansion).
//
// The type hierarchy is:
// - `Stress`: lexical stress of one syllable (0 unstressed, 1 primary, 2 secondary)
// - `Syllable`: a syllable's text plus its stress
// - `Pronunciation`: one ordered, nonempty syllable sequence for a word
// - `PronunciationEntry`: a normalized word with one or more pronunciations
// - `Source` / `Resolved`: what the resolver hands back, tagged by where it came from
//
// Dictionary syllable text is space-joined ARPABET with stress digits
// removed ("S AY"); heuristic syllable text is an orthographic chunk ("si").

use serde::{Deserialize, Serialize};

use crate::arpabet;

/// Lexical stress of a syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stress {
    /// Stress level 0.
    Unstressed,
    /// Stress level 1.
    Primary,
    /// Stress level 2.
    Secondary,
}

impl Stress {
    /// Parse a CMU stress digit.
    pub fn from_digit(digit: char) -> Option<Stress> {
        match digit {
            '0' => Some(Stress::Unstressed),
            '1' => Some(Stress::Primary),
            '2' => Some(Stress::Secondary),
            _ => None,
        }
    }

    /// Numeric level as written in the dictionary (0, 1, 2).
    pub fn level(self) -> u8 {
        match self {
            Stress::Unstressed => 0,
            Stress::Primary => 1,
            Stress::Secondary => 2,
        }
    }

    /// Primary and secondary stress both count as stressed for scansion.
    pub fn is_stressed(self) -> bool {
        !matches!(self, Stress::Unstressed)
    }
}

/// A single syllable of a pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    /// Phoneme text (dictionary) or spelling chunk (heuristic).
    pub text: String,
    /// Stress carried by this syllable.
    pub stress: Stress,
}

impl Syllable {
    pub fn new(text: impl Into<String>, stress: Stress) -> Self {
        Syllable {
            text: text.into(),
            stress,
        }
    }

    /// The ARPABET phonemes of a dictionary syllable, stress digits removed.
    pub fn phonemes(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// The syllable's vowel nucleus, if its text is ARPABET.
    pub fn nucleus(&self) -> Option<&str> {
        self.phonemes().find(|p| arpabet::is_vowel(p))
    }
}

/// One way of pronouncing a word. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub syllables: Vec<Syllable>,
}

impl Pronunciation {
    /// Stress levels in syllable order.
    pub fn stresses(&self) -> Vec<Stress> {
        self.syllables.iter().map(|s| s.stress).collect()
    }

    /// Syllable texts in order.
    pub fn syllable_texts(&self) -> Vec<String> {
        self.syllables.iter().map(|s| s.text.clone()).collect()
    }

    /// All phonemes across syllables, stress digits removed.
    pub fn phonemes(&self) -> impl Iterator<Item = &str> {
        self.syllables.iter().flat_map(|s| s.phonemes())
    }
}

/// A normalized word and its known pronunciations.
///
/// `variants[0]` is the canonical pronunciation. The store guarantees at
/// least one variant and that every variant has at least one syllable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationEntry {
    pub word: String,
    pub variants: Vec<Pronunciation>,
}

impl PronunciationEntry {
    /// The canonical (most common) pronunciation.
    pub fn canonical(&self) -> &Pronunciation {
        &self.variants[0]
    }

    /// A specific variant, or the canonical one when `index` is out of range.
    pub fn variant(&self, index: usize) -> &Pronunciation {
        self.variants.get(index).unwrap_or(&self.variants[0])
    }
}

/// Where a resolved pronunciation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Every part of the word was found in the pronunciation store.
    Dictionary,
    /// At least one part was estimated from spelling.
    Heuristic,
}

impl Source {
    /// Combine the sources of two parts of a compound.
    pub fn merge(self, other: Source) -> Source {
        match (self, other) {
            (Source::Dictionary, Source::Dictionary) => Source::Dictionary,
            _ => Source::Heuristic,
        }
    }
}

/// The result of resolving one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub syllables: Vec<Syllable>,
    pub source: Source,
}

impl Resolved {
    /// A resolution with no syllables (the token had no letters).
    pub fn empty() -> Self {
        Resolved {
            syllables: Vec::new(),
            source: Source::Dictionary,
        }
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    pub fn is_unknown(&self) -> bool {
        self.source == Source::Heuristic
    }

    pub fn stresses(&self) -> Vec<Stress> {
        self.syllables.iter().map(|s| s.stress).collect()
    }

    pub fn syllable_texts(&self) -> Vec<String> {
        self.syllables.iter().map(|s| s.text.clone()).collect()
    }

    /// The dictionary pronunciation, if every syllable came from the store.
    pub fn pronunciation(&self) -> Option<Pronunciation> {
        match self.source {
            Source::Dictionary if !self.syllables.is_empty() => Some(Pronunciation {
                syllables: self.syllables.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_from_digit() {
        assert_eq!(Stress::from_digit('0'), Some(Stress::Unstressed));
        assert_eq!(Stress::from_digit('1'), Some(Stress::Primary));
        assert_eq!(Stress::from_digit('2'), Some(Stress::Secondary));
        assert_eq!(Stress::from_digit('3'), None);
    }

    #[test]
    fn test_stress_is_stressed() {
        assert!(!Stress::Unstressed.is_stressed());
        assert!(Stress::Primary.is_stressed());
        assert!(Stress::Secondary.is_stressed());
    }

    #[test]
    fn test_stress_serde() {
        let json = serde_json::to_string(&Stress::Secondary).unwrap();
        assert_eq!(json, "\"secondary\"");
        let parsed: Stress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Stress::Secondary);
    }

    #[test]
    fn test_syllable_nucleus() {
        let syl = Syllable::new("S AY", Stress::Primary);
        assert_eq!(syl.nucleus(), Some("AY"));
        let chunk = Syllable::new("si", Stress::Primary);
        assert_eq!(chunk.nucleus(), None);
    }

    #[test]
    fn test_entry_variant_falls_back_to_canonical() {
        let entry = PronunciationEntry {
            word: "a".to_string(),
            variants: vec![
                Pronunciation {
                    syllables: vec![Syllable::new("AH", Stress::Unstressed)],
                },
                Pronunciation {
                    syllables: vec![Syllable::new("EY", Stress::Primary)],
                },
            ],
        };
        assert_eq!(entry.variant(1).syllables[0].text, "EY");
        assert_eq!(entry.variant(7), entry.canonical());
    }

    #[test]
    fn test_source_merge() {
        assert_eq!(Source::Dictionary.merge(Source::Dictionary), Source::Dictionary);
        assert_eq!(Source::Dictionary.merge(Source::Heuristic), Source::Heuristic);
        assert_eq!(Source::Heuristic.merge(Source::Dictionary), Source::Heuristic);
    }

    #[test]
    fn test_resolved_pronunciation_only_for_dictionary() {
        let heuristic = Resolved {
            syllables: vec![Syllable::new("ty", Stress::Primary)],
            source: Source::Heuristic,
        };
        assert!(heuristic.pronunciation().is_none());
        assert!(heuristic.is_unknown());
        assert!(Resolved::empty().pronunciation().is_none());
    }
}
