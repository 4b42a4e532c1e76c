// Benchmarks for whole-poem analysis and its two heaviest views.
//
// Uses the embedded dataset. The sonnet is repeated to approximate a long
// poem; a single sonnet is the typical per-keystroke workload.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quill_lexicon::{Resolver, default_store};
use quill_prosody::rhyme::{RhymeConfig, assign_scheme, internal_rhymes};
use quill_prosody::{AnalysisConfig, Analyzer, meter};

const SONNET: &str = "Shall I compare thee to a summer's day?
Thou art more lovely and more temperate:
Rough winds do shake the darling buds of May,
And summer's lease hath all too short a date;
Sometime too hot the eye of heaven shines,
And often is his gold complexion dimm'd;
And every fair from fair sometime declines,
By chance or nature's changing course untrimm'd;
But thy eternal summer shall not fade,
Nor lose possession of that fair thou ow'st;
Nor shall Death brag thou wander'st in his shade,
When in eternal lines to time thou grow'st:
So long as men can breathe or eyes can see,
So long lives this, and this gives life to thee.";

fn bench_analysis(c: &mut Criterion) {
    let store = default_store();
    let resolver = Resolver::new(&store);
    let analyzer = Analyzer::new(resolver, AnalysisConfig::default());
    let long_poem = [SONNET; 20].join("\n\n");
    let lines: Vec<&str> = SONNET.lines().collect();
    let rhyme = RhymeConfig::default();

    c.bench_function("analyze_sonnet", |b| b.iter(|| analyzer.analyze(black_box(SONNET))));
    c.bench_function("analyze_280_lines", |b| {
        b.iter(|| analyzer.analyze(black_box(&long_poem)))
    });
    c.bench_function("classify_text_sonnet", |b| {
        b.iter(|| meter::classify_text(&resolver, black_box(SONNET)))
    });
    c.bench_function("assign_scheme_sonnet", |b| {
        b.iter(|| assign_scheme(&resolver, &rhyme, black_box(&lines)))
    });
    c.bench_function("internal_rhymes_sonnet", |b| {
        b.iter(|| internal_rhymes(&resolver, &rhyme, black_box(SONNET)))
    });
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
