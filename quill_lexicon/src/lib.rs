// English pronunciation crate for the Quill prosody engine.
//
// Provides pronunciations (syllables with stress) for English words, both
// from a CMU-format dictionary and, for words the dictionary lacks, from a
// spelling heuristic. Consumed by `quill_prosody` for meter, rhyme, and
// scansion. No I/O happens outside of dataset loading.
//
// Architecture:
// - `types.rs`: Core types: `Stress`, `Syllable`, `Pronunciation`, `PronunciationEntry`, `Resolved`
// - `arpabet.rs`: Phoneme tables, vowel families, sonority-based syllabifier
// - `resolver.rs`: Token normalization, dictionary lookup, heuristic fallback
// - `shared.rs`: The process-wide store, loaded at most once
// - `error.rs`: `StoreError` for dataset parsing/loading
// - `lib.rs` (this file): `PronunciationStore`, parses and queries the dictionary
//
// The store is built from CMU-format text via `PronunciationStore::from_cmu_text()`
// and is immutable afterwards. `default_store()` parses the dataset embedded
// at compile time from `data/pronunciations.dict`.

pub mod arpabet;
pub mod error;
pub mod resolver;
pub mod shared;
pub mod types;

// Re-export key types at crate root for convenience.
pub use error::StoreError;
pub use resolver::{Resolver, normalize};
pub use types::{Pronunciation, PronunciationEntry, Resolved, Source, Stress, Syllable};

use std::path::Path;

use rustc_hash::FxHashMap;

/// The dataset compiled into the crate.
pub const EMBEDDED_DATASET: &str = include_str!("../../data/pronunciations.dict");

/// An immutable map from normalized word to its pronunciations.
///
/// Lookups are by the same normalization the resolver applies to raw
/// tokens, so `lookup("Night,")` and `lookup("night")` agree.
#[derive(Debug, Clone, Default)]
pub struct PronunciationStore {
    entries: FxHashMap<String, PronunciationEntry>,
}

impl PronunciationStore {
    /// Parse CMU-format dictionary text.
    ///
    /// Each non-comment line is `WORD  PH1 PH2 ...`; alternates are written
    /// `WORD(2)` and appended after the canonical variant in file order.
    /// Lines starting with `;;;` and blank lines are skipped.
    pub fn from_cmu_text(text: &str) -> Result<Self, StoreError> {
        let mut entries: FxHashMap<String, PronunciationEntry> = FxHashMap::default();

        for (idx, raw_line) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() || trimmed.starts_with(";;;") {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            // A non-blank line always has a first field.
            let raw_word = parts.next().unwrap_or_default();
            let key = normalize(trim_variant(raw_word));
            if key.is_empty() {
                return Err(StoreError::EmptyKey {
                    line,
                    word: raw_word.to_string(),
                });
            }

            let phonemes: Vec<&str> = parts.collect();
            if phonemes.is_empty() {
                return Err(StoreError::MissingPhonemes {
                    line,
                    word: raw_word.to_string(),
                });
            }
            if let Some(bad) = phonemes.iter().find(|p| !well_formed(p)) {
                return Err(StoreError::UnknownPhoneme {
                    line,
                    word: raw_word.to_string(),
                    phoneme: bad.to_string(),
                });
            }

            let syllables = arpabet::syllabify(&phonemes).ok_or_else(|| StoreError::NoVowel {
                line,
                word: raw_word.to_string(),
            })?;

            entries
                .entry(key.clone())
                .or_insert_with(|| PronunciationEntry {
                    word: key,
                    variants: Vec::new(),
                })
                .variants
                .push(Pronunciation { syllables });
        }

        if entries.is_empty() {
            return Err(StoreError::Empty);
        }

        log::debug!("parsed pronunciation dataset: {} words", entries.len());
        Ok(PronunciationStore { entries })
    }

    /// Read and parse a CMU-format dictionary file.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_cmu_text(&text)
    }

    /// Look up a word. The word is normalized first.
    pub fn lookup(&self, word: &str) -> Option<&PronunciationEntry> {
        self.entries.get(&normalize(word))
    }

    /// Look up an already-normalized key without re-normalizing.
    pub(crate) fn lookup_normalized(&self, key: &str) -> Option<&PronunciationEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &PronunciationEntry> {
        self.entries.values()
    }
}

/// Parse the dataset embedded at compile time.
///
/// Panics if the embedded dictionary is malformed (should never happen in a
/// released build; the test suite parses it).
pub fn default_store() -> PronunciationStore {
    PronunciationStore::from_cmu_text(EMBEDDED_DATASET)
        .expect("embedded pronunciations.dict is malformed")
}

/// Strip a CMU alternate marker: `"READ(2)"` → `"READ"`.
fn trim_variant(raw_word: &str) -> &str {
    raw_word
        .split_once('(')
        .map(|(base, _)| base)
        .unwrap_or(raw_word)
}

/// Vowels must carry a stress digit; consonants must not.
fn well_formed(phoneme: &str) -> bool {
    match arpabet::split_stress(phoneme) {
        (base, Some(_)) => arpabet::is_vowel(base),
        (base, None) => arpabet::is_consonant(base),
    }
}
