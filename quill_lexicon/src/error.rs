// Errors raised while loading a pronunciation dataset.
//
// Resolution itself never fails; these only surface at the I/O edge when a
// dataset file is read or parsed. Line numbers are 1-based.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read pronunciation dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: entry {word:?} has no phonemes")]
    MissingPhonemes { line: usize, word: String },

    #[error("line {line}: {phoneme:?} in {word:?} is not an ARPABET phoneme")]
    UnknownPhoneme {
        line: usize,
        word: String,
        phoneme: String,
    },

    #[error("line {line}: entry {word:?} has no vowel")]
    NoVowel { line: usize, word: String },

    #[error("line {line}: {word:?} normalizes to an empty key")]
    EmptyKey { line: usize, word: String },

    #[error("pronunciation dataset contained no entries")]
    Empty,
}
