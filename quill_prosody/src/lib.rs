// quill_prosody: meter, rhyme, and scansion analysis for English verse.
//
// Builds on `quill_lexicon` (word → stressed syllables) to answer the
// questions an editor asks on every keystroke: how many syllables does this
// line have, is it iambic pentameter, what is the rhyme scheme, is this a
// haiku. Every analysis function is pure and synchronous over a `&Resolver`
// and the input text, so any number of analyses can run concurrently.
//
// Module overview:
// - `text.rs`:      Line splitting and word spans (byte and char offsets).
// - `meter.rs`:     Foot scoring, per-line meter labels, consistency banding.
// - `rhyme.rs`:     Rhyme fingerprints, scheme assignment, form compliance, internal rhymes.
// - `scansion.rs`:  Syllable counts, haiku check, aligned stress marks.
// - `config.rs`:    AnalysisConfig (JSON) and ConfigError.
// - `analysis.rs`:  Analyzer, runs every view over a text into one Report.
//
// The binary `quill` (`main.rs`) wraps `Analyzer` for the command line.
//
// Meter and rhyme never depend on each other: both start from the same line
// split and the same resolver, so either can be computed alone.

pub mod analysis;
pub mod config;
pub mod meter;
pub mod rhyme;
pub mod scansion;
pub mod text;

pub use analysis::{Analyzer, LineReport, Report};
pub use config::{AnalysisConfig, ConfigError};
