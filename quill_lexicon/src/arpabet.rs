// ARPABET phoneme classes and syllabification.
//
// The pronunciation dataset is written in ARPABET (the CMU dictionary
// alphabet): consonants are bare symbols, vowels carry a stress digit
// (`AY1`, `AH0`, `EY2`). This module provides the phoneme tables, the vowel
// family grouping used for loose slant rhymes, and the syllabifier that turns
// a flat phoneme list into stressed syllables.
//
// Syllabification uses sonority sequencing with the Maximum Onset Principle:
// every vowel is a nucleus, and each consonant cluster between two nuclei
// gives the following syllable the longest legal onset. Legal onsets rise
// strictly in sonority toward the vowel, except that `S` may precede a
// stop-initial onset ("str", "sp", "sk"). `NG` and `ZH` never begin a
// syllable.

use crate::types::{Stress, Syllable};

/// Vowel phonemes (without stress digits).
pub const VOWELS: &[&str] = &[
    "AA", "AE", "AH", "AO", "AW", "AY", "EH", "ER", "EY", "IH", "IY", "OW", "OY", "UH", "UW",
];

/// Consonant phonemes.
pub const CONSONANTS: &[&str] = &[
    "B", "CH", "D", "DH", "F", "G", "HH", "JH", "K", "L", "M", "N", "NG", "P", "R", "S", "SH",
    "T", "TH", "V", "W", "Y", "Z", "ZH",
];

/// Onsets that never start an English syllable.
const ILLEGAL_ONSETS: &[&str] = &["NG", "ZH"];

/// Longest onset the syllabifier will build ("S T R").
const MAX_ONSET: usize = 3;

/// Coarse grouping of vowels by tongue position, used by the loose slant
/// policy in the prosody crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VowelFamily {
    /// IY, IH, EY, EH, AE.
    Front,
    /// AH, ER.
    Central,
    /// AA, AO, OW, UH, UW.
    Back,
    /// AY, AW, OY.
    Diphthong,
}

/// Split a dictionary phoneme into its base symbol and stress digit.
pub fn split_stress(phoneme: &str) -> (&str, Option<Stress>) {
    match phoneme.char_indices().last() {
        Some((idx, c)) if c.is_ascii_digit() => (&phoneme[..idx], Stress::from_digit(c)),
        _ => (phoneme, None),
    }
}

pub fn is_vowel(base: &str) -> bool {
    VOWELS.contains(&base)
}

pub fn is_consonant(base: &str) -> bool {
    CONSONANTS.contains(&base)
}

/// Whether `base` is any known ARPABET symbol.
pub fn is_phoneme(base: &str) -> bool {
    is_vowel(base) || is_consonant(base)
}

/// Sonority rank of a consonant. Higher is more vowel-like.
pub fn sonority(base: &str) -> u8 {
    match base {
        "P" | "B" | "T" | "D" | "K" | "G" => 1,
        "CH" | "JH" => 2,
        "F" | "V" | "TH" | "DH" | "S" | "Z" | "SH" | "ZH" | "HH" => 3,
        "M" | "N" | "NG" => 4,
        "L" | "R" => 5,
        "W" | "Y" => 6,
        _ => 7,
    }
}

/// The family a vowel belongs to, `None` for consonants.
pub fn vowel_family(base: &str) -> Option<VowelFamily> {
    match base {
        "IY" | "IH" | "EY" | "EH" | "AE" => Some(VowelFamily::Front),
        "AH" | "ER" => Some(VowelFamily::Central),
        "AA" | "AO" | "OW" | "UH" | "UW" => Some(VowelFamily::Back),
        "AY" | "AW" | "OY" => Some(VowelFamily::Diphthong),
        _ => None,
    }
}

/// Whether a consonant sequence can open a syllable.
pub fn valid_onset(onset: &[&str]) -> bool {
    match onset {
        [] => true,
        [single] => !ILLEGAL_ONSETS.contains(single),
        _ if onset.len() > MAX_ONSET => false,
        ["S", rest @ ..] if sonority(rest[0]) == 1 => valid_onset(rest),
        _ => {
            !ILLEGAL_ONSETS.contains(&onset[0])
                && onset
                    .windows(2)
                    .all(|pair| sonority(pair[0]) < sonority(pair[1]))
        }
    }
}

/// Split a stress-marked phoneme sequence into syllables.
///
/// Returns `None` when the sequence has no vowel (the dataset rejects such
/// entries). Syllable text is the space-joined phonemes with stress digits
/// removed.
pub fn syllabify(phonemes: &[&str]) -> Option<Vec<Syllable>> {
    let split: Vec<(&str, Option<Stress>)> = phonemes.iter().map(|p| split_stress(p)).collect();
    let nuclei: Vec<usize> = split
        .iter()
        .enumerate()
        .filter(|(_, (base, _))| is_vowel(base))
        .map(|(i, _)| i)
        .collect();

    if nuclei.is_empty() {
        return None;
    }

    let mut syllables = Vec::with_capacity(nuclei.len());
    let mut start = 0;
    for (n, &nucleus) in nuclei.iter().enumerate() {
        let end = match nuclei.get(n + 1) {
            Some(&next) => onset_start(&split, nucleus + 1, next),
            None => split.len(),
        };
        let text = split[start..end]
            .iter()
            .map(|(base, _)| *base)
            .collect::<Vec<_>>()
            .join(" ");
        let stress = split[nucleus].1.unwrap_or(Stress::Unstressed);
        syllables.push(Syllable::new(text, stress));
        start = end;
    }

    Some(syllables)
}

/// Index where the next syllable begins within the cluster `[from, to)`.
fn onset_start(split: &[(&str, Option<Stress>)], from: usize, to: usize) -> usize {
    let cluster: Vec<&str> = split[from..to].iter().map(|(base, _)| *base).collect();
    (0..=cluster.len())
        .find(|&i| valid_onset(&cluster[i..]))
        .map(|i| from + i)
        .unwrap_or(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(phonemes: &[&str]) -> Vec<String> {
        syllabify(phonemes)
            .unwrap()
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_split_stress() {
        assert_eq!(split_stress("AY1"), ("AY", Some(Stress::Primary)));
        assert_eq!(split_stress("AH0"), ("AH", Some(Stress::Unstressed)));
        assert_eq!(split_stress("NG"), ("NG", None));
    }

    #[test]
    fn test_phoneme_tables_are_disjoint() {
        for v in VOWELS {
            assert!(!is_consonant(v), "{v} listed as both vowel and consonant");
        }
        assert!(is_phoneme("ZH"));
        assert!(!is_phoneme("Q"));
    }

    #[test]
    fn test_sonority_ordering() {
        assert!(sonority("W") > sonority("L"));
        assert!(sonority("L") > sonority("N"));
        assert!(sonority("N") > sonority("S"));
        assert!(sonority("S") > sonority("CH"));
        assert!(sonority("CH") > sonority("T"));
    }

    #[test]
    fn test_valid_onsets() {
        assert!(valid_onset(&["T", "R"]));
        assert!(valid_onset(&["S", "T", "R"]));
        assert!(valid_onset(&["S", "P", "L"]));
        assert!(!valid_onset(&["M", "P"]));
        assert!(!valid_onset(&["NG"]));
        assert!(!valid_onset(&["R", "T"]));
    }

    #[test]
    fn test_syllabify_single_syllable() {
        assert_eq!(texts(&["D", "EY1"]), vec!["D EY"]);
    }

    #[test]
    fn test_syllabify_silent() {
        let syllables = syllabify(&["S", "AY1", "L", "AH0", "N", "T"]).unwrap();
        assert_eq!(syllables.len(), 2);
        assert_eq!(syllables[0], Syllable::new("S AY", Stress::Primary));
        assert_eq!(syllables[1], Syllable::new("L AH N T", Stress::Unstressed));
    }

    #[test]
    fn test_syllabify_breaks_falling_cluster() {
        assert_eq!(
            texts(&["T", "EH1", "M", "P", "ER0", "AH0", "T"]),
            vec!["T EH M", "P ER", "AH T"]
        );
    }

    #[test]
    fn test_syllabify_keeps_s_cluster_onset() {
        assert_eq!(
            texts(&["M", "IH1", "S", "T", "R", "AH0", "L"]),
            vec!["M IH", "S T R AH L"]
        );
    }

    #[test]
    fn test_syllabify_ng_stays_in_coda() {
        assert_eq!(
            texts(&["S", "IH1", "NG", "ER0"]),
            vec!["S IH NG", "ER"]
        );
    }

    #[test]
    fn test_syllabify_no_vowel() {
        assert!(syllabify(&["S", "T"]).is_none());
        assert!(syllabify(&[]).is_none());
    }

    #[test]
    fn test_vowel_family() {
        assert_eq!(vowel_family("IY"), Some(VowelFamily::Front));
        assert_eq!(vowel_family("ER"), Some(VowelFamily::Central));
        assert_eq!(vowel_family("OW"), Some(VowelFamily::Back));
        assert_eq!(vowel_family("AY"), Some(VowelFamily::Diphthong));
        assert_eq!(vowel_family("T"), None);
    }
}
