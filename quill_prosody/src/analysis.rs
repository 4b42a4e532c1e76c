// Whole-poem analysis.
//
// `Analyzer` bundles a resolver and an `AnalysisConfig` and produces one
// serializable `Report` per text: per-line syllables, stresses, meter,
// scansion, and rhyme label, plus the text-level meter verdict, rhyme
// scheme, haiku flag, internal rhymes, and (when a form is configured)
// per-line form compliance.
//
// Per-line resolution is the expensive part and is independent across
// lines, so it runs on rayon; results are collected in input order and the
// report is identical to a sequential run. Meter and rhyme are computed from
// the same line split and never feed into each other.

use quill_lexicon::Resolver;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::meter::{self, MeterLabel, StressSequence, TextMeter};
use crate::rhyme::{self, Compliance, InternalRhyme, LineRhyme, RhymeScheme};
use crate::scansion;
use crate::text;

/// Everything known about one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineReport {
    pub text: String,
    pub syllables: usize,
    /// Stress levels 0/1/2, one per syllable.
    pub stresses: Vec<u8>,
    pub has_unknown_words: bool,
    /// `None` for lines without syllables.
    pub meter: Option<MeterLabel>,
    pub scansion: String,
    pub rhyme: LineRhyme,
}

/// The analysis of a whole text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub lines: Vec<LineReport>,
    pub meter: TextMeter,
    pub rhyme: RhymeScheme,
    pub haiku: bool,
    pub internal_rhymes: Vec<InternalRhyme>,
    /// Per-line compliance with the configured form, if one is set.
    pub compliance: Option<Vec<Compliance>>,
    /// True when no pronunciation store was available.
    pub degraded: bool,
}

#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    resolver: Resolver<'a>,
    config: AnalysisConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(resolver: Resolver<'a>, config: AnalysisConfig) -> Self {
        Analyzer { resolver, config }
    }

    pub fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, input: &str) -> Report {
        let resolver = &self.resolver;
        let degraded = resolver.is_degraded();
        let lines: Vec<&str> = text::lines(input).collect();

        let per_line: Vec<(StressSequence, String)> = lines
            .par_iter()
            .map(|line| {
                (
                    meter::line_stresses(resolver, line),
                    scansion::scansion(resolver, line),
                )
            })
            .collect();
        let (sequences, marks): (Vec<StressSequence>, Vec<String>) = per_line.into_iter().unzip();

        let text_meter = meter::classify_sequences(&sequences, degraded);
        let scheme = rhyme::assign_scheme(resolver, &self.config.rhyme, &lines);

        let haiku = scansion::is_haiku_counts(
            lines.iter().zip(&sequences).map(|(line, seq)| (*line, seq.len())),
        );

        let internal_rhymes = if self.config.internal_rhymes {
            rhyme::internal_rhymes(resolver, &self.config.rhyme, input)
        } else {
            Vec::new()
        };

        let compliance = self.config.form.as_deref().map(|form| {
            let expected = rhyme::parse_form(form);
            rhyme::check_form_compliance(resolver, &self.config.rhyme, &lines, &expected)
        });

        let line_reports = lines
            .iter()
            .zip(sequences)
            .zip(marks)
            .zip(text_meter.per_line.iter().copied())
            .zip(scheme.lines.iter().cloned())
            .map(|((((line, seq), marks), meter), rhyme)| LineReport {
                text: line.to_string(),
                syllables: seq.len(),
                stresses: seq.levels(),
                has_unknown_words: seq.has_unknown_words,
                meter,
                scansion: marks,
                rhyme,
            })
            .collect();

        log::debug!(
            "analyzed {} lines: {} / {}",
            lines.len(),
            text_meter.overall,
            scheme.pattern()
        );

        Report {
            lines: line_reports,
            meter: text_meter,
            rhyme: scheme,
            haiku,
            internal_rhymes,
            compliance,
            degraded,
        }
    }
}
