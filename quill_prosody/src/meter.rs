// Meter classification: stress sequences scored against metrical feet.
//
// A line's stress sequence is built by resolving each word and concatenating
// the stresses in reading order. Classification binarizes it (primary and
// secondary both count as stressed), cuts it into non-overlapping windows of
// the foot's length starting at offset 0 (a trailing partial window is
// ignored), and counts exact matches for each of the four feet. The best
// count wins; ties resolve by `Foot` order (iamb, trochee, anapest, dactyl),
// which `outranks` enforces in one place.
//
// A whole text is summarized by tallying the rendered per-line labels. The
// fraction of classifiable lines agreeing with the most common label decides
// the verdict band: >= 0.8 reports the label as is, >= 0.5 qualifies it
// "(with variations)", below that the text is "Mixed or Free Verse".
// Zero-syllable lines never vote.
//
// Without a pronunciation store the stresses are guesses, so classification
// falls back to syllable counts alone (`MeterLabel::Estimated`) with the same
// banding.

use std::fmt;

use quill_lexicon::{Resolved, Resolver, Stress};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::text;

/// Fraction of agreeing lines at or above which the dominant label is
/// reported unqualified.
pub const CONSISTENT: f64 = 0.8;

/// Fraction at or above which the dominant label is reported "(with variations)".
pub const LOOSELY_CONSISTENT: f64 = 0.5;

pub const IRREGULAR: &str = "Free verse or irregular";
pub const MIXED: &str = "Mixed or Free Verse";
pub const NO_METER: &str = "No meter detected";
pub const UNKNOWN_WORDS_SUFFIX: &str = " (some words unknown)";

/// A metrical foot, declared in tie-break priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Foot {
    Iamb,
    Trochee,
    Anapest,
    Dactyl,
}

impl Foot {
    pub const ALL: [Foot; 4] = [Foot::Iamb, Foot::Trochee, Foot::Anapest, Foot::Dactyl];

    /// Stressed (true) / unstressed (false) template of the foot.
    pub fn pattern(self) -> &'static [bool] {
        match self {
            Foot::Iamb => &[false, true],
            Foot::Trochee => &[true, false],
            Foot::Anapest => &[false, false, true],
            Foot::Dactyl => &[true, false, false],
        }
    }

    pub fn syllable_count(self) -> usize {
        self.pattern().len()
    }

    /// Adjective form used in meter names.
    pub fn adjective(self) -> &'static str {
        match self {
            Foot::Iamb => "Iambic",
            Foot::Trochee => "Trochaic",
            Foot::Anapest => "Anapestic",
            Foot::Dactyl => "Dactylic",
        }
    }

    /// Number of windows in `stressed` that match this foot exactly.
    pub fn count_matches(self, stressed: &[bool]) -> usize {
        let pattern = self.pattern();
        stressed
            .chunks_exact(pattern.len())
            .filter(|window| *window == pattern)
            .count()
    }
}

/// Whether `a` beats `b`: more matches, or equal matches and higher priority.
pub fn outranks(a: (Foot, usize), b: (Foot, usize)) -> bool {
    a.1 > b.1 || (a.1 == b.1 && a.0 < b.0)
}

/// The winning foot and its match count.
pub fn best_foot(stressed: &[bool]) -> (Foot, usize) {
    Foot::ALL
        .iter()
        .map(|&foot| (foot, foot.count_matches(stressed)))
        .fold((Foot::Iamb, 0), |best, candidate| {
            if outranks(candidate, best) { candidate } else { best }
        })
}

/// Name for a line length in feet: "Pentameter", or "9-meter" past eight.
pub fn length_name(feet: usize) -> String {
    let name = match feet {
        1 => "Monometer",
        2 => "Dimeter",
        3 => "Trimeter",
        4 => "Tetrameter",
        5 => "Pentameter",
        6 => "Hexameter",
        7 => "Heptameter",
        8 => "Octameter",
        n => return format!("{n}-meter"),
    };
    name.to_string()
}

/// Meter name guessed from a syllable count alone.
pub fn estimated_name(syllables: usize) -> String {
    let name = match syllables {
        10 => "Iambic Pentameter",
        8 => "Iambic Tetrameter",
        6 => "Iambic Trimeter",
        12 => "Anapestic or Dactylic Tetrameter",
        9 => "Anapestic Trimeter",
        14 => "Iambic Heptameter (Fourteener)",
        7 => "Heptasyllabic",
        5 => "Pentasyllabic",
        17 | 18 => "Dactylic Hexameter",
        n => return format!("{n} syllables per line"),
    };
    name.to_string()
}

/// The meter assigned to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeterLabel {
    /// A recognized foot repeated `feet` times.
    Foot { foot: Foot, feet: usize },
    /// No foot matched any window.
    Irregular,
    /// Syllable-count estimate used when no pronunciation store is loaded.
    Estimated { syllables: usize },
}

impl fmt::Display for MeterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MeterLabel::Foot { foot, feet } => {
                write!(f, "{} {}", foot.adjective(), length_name(feet))
            }
            MeterLabel::Irregular => f.write_str(IRREGULAR),
            MeterLabel::Estimated { syllables } => f.write_str(&estimated_name(syllables)),
        }
    }
}

/// Stress levels of one line, with a flag for estimated words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressSequence {
    pub stresses: SmallVec<[Stress; 16]>,
    pub has_unknown_words: bool,
}

impl StressSequence {
    pub fn from_stresses(stresses: impl IntoIterator<Item = Stress>) -> Self {
        StressSequence {
            stresses: stresses.into_iter().collect(),
            has_unknown_words: false,
        }
    }

    /// Build from 0/1/2 levels; any other value counts as unstressed.
    pub fn from_levels(levels: &[u8]) -> Self {
        Self::from_stresses(levels.iter().map(|&l| match l {
            1 => Stress::Primary,
            2 => Stress::Secondary,
            _ => Stress::Unstressed,
        }))
    }

    /// Append one resolved word.
    pub fn push_word(&mut self, word: &Resolved) {
        self.stresses.extend(word.syllables.iter().map(|s| s.stress));
        self.has_unknown_words |= word.is_unknown();
    }

    pub fn len(&self) -> usize {
        self.stresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stresses.is_empty()
    }

    pub fn stressed(&self) -> Vec<bool> {
        self.stresses.iter().map(|s| s.is_stressed()).collect()
    }

    pub fn levels(&self) -> Vec<u8> {
        self.stresses.iter().map(|s| s.level()).collect()
    }
}

/// Resolve every word of a line into one stress sequence.
pub fn line_stresses(resolver: &Resolver<'_>, line: &str) -> StressSequence {
    let mut seq = StressSequence::default();
    for word in text::words(line) {
        seq.push_word(&resolver.resolve(word.text));
    }
    seq
}

/// Classify a single line's stress sequence.
pub fn classify_line(stresses: &StressSequence) -> MeterLabel {
    let (foot, count) = best_foot(&stresses.stressed());
    if count == 0 {
        return MeterLabel::Irregular;
    }
    let feet = (stresses.len() as f64 / foot.syllable_count() as f64).round() as usize;
    MeterLabel::Foot { foot, feet }
}

/// Meter verdict for a whole text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMeter {
    /// One entry per input line; `None` for lines with no syllables.
    pub per_line: Vec<Option<MeterLabel>>,
    /// The banded verdict, e.g. "Iambic Pentameter (with variations)".
    pub overall: String,
    /// The most common per-line label, if any line voted.
    pub dominant: Option<String>,
    /// Share of voting lines that agree with `dominant` (0 when none voted).
    pub consistency: f64,
}

/// Classify every line of `text` and summarize.
pub fn classify_text(resolver: &Resolver<'_>, text: &str) -> TextMeter {
    let sequences: Vec<StressSequence> = text::lines(text)
        .map(|line| line_stresses(resolver, line))
        .collect();
    classify_sequences(&sequences, resolver.is_degraded())
}

/// Classify precomputed line sequences and summarize.
///
/// With `degraded` set, lines are labelled by syllable count only. Every
/// word is estimated then, so the unknown-words qualifier always applies.
pub fn classify_sequences(sequences: &[StressSequence], degraded: bool) -> TextMeter {
    let per_line: Vec<Option<MeterLabel>> = sequences
        .iter()
        .map(|seq| {
            if seq.is_empty() {
                None
            } else if degraded {
                Some(MeterLabel::Estimated {
                    syllables: seq.len(),
                })
            } else {
                Some(classify_line(seq))
            }
        })
        .collect();

    let votes: Vec<String> = per_line.iter().flatten().map(|l| l.to_string()).collect();
    let unknown = sequences
        .iter()
        .any(|seq| !seq.is_empty() && seq.has_unknown_words);

    let (overall, dominant, consistency) = summarize(&votes, unknown);
    TextMeter {
        per_line,
        overall,
        dominant,
        consistency,
    }
}

/// Tally rendered labels into (verdict, dominant, consistency).
///
/// The dominant label is the most frequent one; equal counts go to the label
/// that appeared first.
pub fn summarize(votes: &[String], unknown_words: bool) -> (String, Option<String>, f64) {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for vote in votes {
        match tally.iter_mut().find(|(label, _)| *label == vote.as_str()) {
            Some((_, count)) => *count += 1,
            None => tally.push((vote.as_str(), 1)),
        }
    }

    let Some((dominant, count)) = tally
        .iter()
        .copied()
        .fold(None, |best: Option<(&str, usize)>, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
    else {
        return (NO_METER.to_string(), None, 0.0);
    };

    let consistency = count as f64 / votes.len() as f64;
    let mut overall = if consistency >= CONSISTENT {
        dominant.to_string()
    } else if consistency >= LOOSELY_CONSISTENT {
        format!("{dominant} (with variations)")
    } else {
        MIXED.to_string()
    };
    if unknown_words {
        overall.push_str(UNKNOWN_WORDS_SUFFIX);
    }

    (overall, Some(dominant.to_string()), consistency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_lexicon::PronunciationStore;

    const SAMPLE: &str = "THE  DH AH0
CAT  K AE1 T
A  AH0
DAY  D EY1
AWAY  AH0 W EY1
UPON  AH0 P AA1 N
HAPPY  HH AE1 P IY0
SUMMER  S AH1 M ER0
";

    fn seq(levels: &[u8]) -> StressSequence {
        StressSequence::from_levels(levels)
    }

    #[test]
    fn test_iambic_pentameter() {
        let label = classify_line(&seq(&[0, 1, 0, 1, 0, 1, 0, 1, 0, 1]));
        assert_eq!(label, MeterLabel::Foot { foot: Foot::Iamb, feet: 5 });
        assert_eq!(label.to_string(), "Iambic Pentameter");
    }

    #[test]
    fn test_trochaic_tetrameter() {
        let label = classify_line(&seq(&[1, 0, 1, 0, 1, 0, 1, 0]));
        assert_eq!(label.to_string(), "Trochaic Tetrameter");
    }

    #[test]
    fn test_anapestic_and_dactylic() {
        assert_eq!(
            classify_line(&seq(&[0, 0, 1, 0, 0, 1, 0, 0, 1])).to_string(),
            "Anapestic Trimeter"
        );
        assert_eq!(
            classify_line(&seq(&[1, 0, 0, 1, 0, 0])).to_string(),
            "Dactylic Dimeter"
        );
    }

    #[test]
    fn test_secondary_stress_counts_as_stressed() {
        let label = classify_line(&seq(&[0, 2, 0, 1]));
        assert_eq!(label.to_string(), "Iambic Dimeter");
    }

    #[test]
    fn test_trailing_partial_window_ignored() {
        // Five iambs plus a dangling unstressed syllable: 11 / 2 rounds to 6.
        let label = classify_line(&seq(&[0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0]));
        assert_eq!(label, MeterLabel::Foot { foot: Foot::Iamb, feet: 6 });
    }

    #[test]
    fn test_no_match_is_irregular() {
        assert_eq!(classify_line(&seq(&[1, 1, 1, 1])), MeterLabel::Irregular);
        assert_eq!(classify_line(&seq(&[])), MeterLabel::Irregular);
        assert_eq!(MeterLabel::Irregular.to_string(), "Free verse or irregular");
    }

    #[test]
    fn test_tie_break_order() {
        // [0,1,1,0]: one iamb window and one trochee window.
        assert_eq!(best_foot(&[false, true, true, false]), (Foot::Iamb, 1));
        assert!(outranks((Foot::Trochee, 1), (Foot::Anapest, 1)));
        assert!(outranks((Foot::Dactyl, 2), (Foot::Iamb, 1)));
        assert!(!outranks((Foot::Dactyl, 1), (Foot::Anapest, 1)));
    }

    #[test]
    fn test_length_names() {
        assert_eq!(length_name(1), "Monometer");
        assert_eq!(length_name(8), "Octameter");
        assert_eq!(length_name(9), "9-meter");
        assert_eq!(length_name(0), "0-meter");
    }

    #[test]
    fn test_estimated_names() {
        assert_eq!(estimated_name(10), "Iambic Pentameter");
        assert_eq!(estimated_name(14), "Iambic Heptameter (Fourteener)");
        assert_eq!(estimated_name(17), "Dactylic Hexameter");
        assert_eq!(estimated_name(18), "Dactylic Hexameter");
        assert_eq!(estimated_name(11), "11 syllables per line");
    }

    #[test]
    fn test_summarize_banding() {
        let mut votes = vec!["Iambic Pentameter".to_string(); 8];
        votes.extend(vec!["Trochaic Tetrameter".to_string(); 2]);
        let (overall, dominant, consistency) = summarize(&votes, false);
        assert_eq!(consistency, 0.8);
        assert_eq!(overall, "Iambic Pentameter");
        assert_eq!(dominant.as_deref(), Some("Iambic Pentameter"));

        let mut votes = vec!["Iambic Pentameter".to_string(); 7];
        votes.extend(vec!["Trochaic Tetrameter".to_string(); 3]);
        assert_eq!(summarize(&votes, false).0, "Iambic Pentameter (with variations)");

        let votes = vec![
            "Iambic Pentameter".to_string(),
            "Trochaic Tetrameter".to_string(),
            "Free verse or irregular".to_string(),
        ];
        assert_eq!(summarize(&votes, false).0, "Mixed or Free Verse");
    }

    #[test]
    fn test_summarize_half_is_with_variations() {
        let votes = vec!["Iambic Trimeter".to_string(), "Iambic Dimeter".to_string()];
        let (overall, dominant, _) = summarize(&votes, false);
        // Equal counts: the first label seen is dominant.
        assert_eq!(dominant.as_deref(), Some("Iambic Trimeter"));
        assert_eq!(overall, "Iambic Trimeter (with variations)");
    }

    #[test]
    fn test_summarize_unknown_suffix_and_empty() {
        let votes = vec!["Iambic Dimeter".to_string()];
        assert_eq!(summarize(&votes, true).0, "Iambic Dimeter (some words unknown)");
        assert_eq!(summarize(&[], false), (NO_METER.to_string(), None, 0.0));
    }

    #[test]
    fn test_line_stresses_from_store() {
        let store = PronunciationStore::from_cmu_text(SAMPLE).unwrap();
        let resolver = Resolver::new(&store);
        let seq = line_stresses(&resolver, "The cat, away upon a day!");
        assert_eq!(seq.levels(), vec![0, 1, 0, 1, 0, 1, 0, 1]);
        assert!(!seq.has_unknown_words);
        assert_eq!(classify_line(&seq).to_string(), "Iambic Tetrameter");
    }

    #[test]
    fn test_line_stresses_flags_unknown_words() {
        let store = PronunciationStore::from_cmu_text(SAMPLE).unwrap();
        let resolver = Resolver::new(&store);
        let seq = line_stresses(&resolver, "The tyger");
        assert!(seq.has_unknown_words);
        assert_eq!(seq.levels(), vec![0, 1, 1]);
    }

    #[test]
    fn test_classify_text_skips_blank_lines() {
        let store = PronunciationStore::from_cmu_text(SAMPLE).unwrap();
        let resolver = Resolver::new(&store);
        let meter = classify_text(&resolver, "The cat away\n\n  \nA day upon the cat");
        assert_eq!(meter.per_line.len(), 4);
        assert!(meter.per_line[1].is_none());
        assert!(meter.per_line[2].is_none());
        assert_eq!(meter.consistency, 0.5);
        assert_eq!(meter.overall, "Iambic Dimeter (with variations)");
    }

    #[test]
    fn test_classify_text_unknown_words_suffix() {
        let store = PronunciationStore::from_cmu_text(SAMPLE).unwrap();
        let resolver = Resolver::new(&store);
        let meter = classify_text(&resolver, "The cat away the tyger");
        assert!(meter.overall.ends_with(" (some words unknown)"));
    }

    #[test]
    fn test_classify_text_degraded_mode() {
        let resolver = Resolver::heuristic();
        let text = "happy happy happy happy happy\nhappy happy happy happy happy\ncat";
        let meter = classify_text(&resolver, text);
        assert_eq!(meter.per_line[0], Some(MeterLabel::Estimated { syllables: 10 }));
        assert_eq!(meter.per_line[2], Some(MeterLabel::Estimated { syllables: 1 }));
        assert_eq!(
            meter.overall,
            "Iambic Pentameter (with variations) (some words unknown)"
        );
    }

    #[test]
    fn test_degraded_verdict_keeps_banding_and_unknown_suffix() {
        let estimated = |n: usize| {
            let mut seq = StressSequence::from_levels(&vec![1; n]);
            seq.has_unknown_words = true;
            seq
        };
        let ten = estimated(10);
        let eight = estimated(8);

        let mut lines = vec![ten.clone(); 4];
        lines.push(eight.clone());
        let meter = classify_sequences(&lines, true);
        assert_eq!(meter.consistency, 0.8);
        assert_eq!(meter.overall, "Iambic Pentameter (some words unknown)");

        let mixed = vec![ten, eight, estimated(5)];
        let meter = classify_sequences(&mixed, true);
        assert_eq!(meter.overall, "Mixed or Free Verse (some words unknown)");

        // The same lines from a dictionary carry no qualifier.
        let known = vec![StressSequence::from_levels(&[0, 1, 0, 1, 0, 1, 0, 1, 0, 1]); 2];
        assert_eq!(classify_sequences(&known, false).overall, "Iambic Pentameter");
    }

    #[test]
    fn test_classify_text_empty() {
        let meter = classify_text(&Resolver::heuristic(), "\n \n");
        assert_eq!(meter.overall, NO_METER);
        assert!(meter.dominant.is_none());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let store = PronunciationStore::from_cmu_text(SAMPLE).unwrap();
        let resolver = Resolver::new(&store);
        let text = "The summer day\nA happy cat upon the day";
        let a = serde_json::to_string(&classify_text(&resolver, text)).unwrap();
        let b = serde_json::to_string(&classify_text(&resolver, text)).unwrap();
        assert_eq!(a, b);
    }
}
