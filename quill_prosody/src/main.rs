// CLI entry point for the Quill prosody engine.
//
// Reads a poem from a file (or stdin), analyzes it, and prints a report:
// the overall meter verdict, then one row per line with its syllable count,
// meter, rhyme label, and scansion marks, followed by the haiku flag,
// internal rhymes, and form compliance when a form is given.
//
// Usage:
//   quill [FILE] [OPTIONS]
//     --config <PATH>     JSON AnalysisConfig (see config.rs)
//     --form <PATTERN>    Expected rhyme form, e.g. "ABAB CDCD EFEF GG"
//     --json              Print the Report as JSON
//     --heuristic         Skip the dictionary; estimate from spelling only
//
// Logging goes through env_logger; set RUST_LOG=debug for store timings.

use std::io::Read;
use std::path::PathBuf;

use env_logger::Env;
use quill_lexicon::{Resolver, shared};
use quill_prosody::rhyme::Compliance;
use quill_prosody::{AnalysisConfig, Analyzer, Report};

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    form: Option<String>,
    json: bool,
    heuristic: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = parse_args();

    let mut config = match &args.config {
        Some(path) => match AnalysisConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => AnalysisConfig::default(),
    };
    if args.form.is_some() {
        config.form = args.form.clone();
    }

    let text = match read_input(args.input.as_ref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            std::process::exit(1);
        }
    };

    let resolver = if args.heuristic {
        Resolver::heuristic()
    } else {
        let store = match &config.dataset_path {
            Some(path) => shared::load_from(path),
            None => shared::load(),
        };
        Resolver::new(store)
    };

    let report = Analyzer::new(resolver, config).analyze(&text);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> Args {
    let mut parsed = Args::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                parsed.config = Some(required_value(&args, i, "--config").into());
            }
            "--form" => {
                i += 1;
                parsed.form = Some(required_value(&args, i, "--form"));
            }
            "--json" => parsed.json = true,
            "--heuristic" => parsed.heuristic = true,
            "--help" | "-h" => {
                println!("Usage: quill [FILE] [--config PATH] [--form PATTERN] [--json] [--heuristic]");
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {other}");
                std::process::exit(1);
            }
            path => {
                if parsed.input.is_some() {
                    eprintln!("Only one input file may be given");
                    std::process::exit(1);
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    parsed
}

fn required_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("{flag} requires a value");
            std::process::exit(1);
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_report(report: &Report) {
    println!("Meter: {}", report.meter.overall);
    if report.degraded {
        println!("  (dictionary unavailable; syllables estimated from spelling)");
    }
    println!("Rhyme scheme: {}", report.rhyme.pattern());
    println!();

    let width = report
        .lines
        .iter()
        .map(|l| l.text.chars().count())
        .max()
        .unwrap_or(0);

    for (i, line) in report.lines.iter().enumerate() {
        if line.syllables == 0 {
            println!();
            continue;
        }
        let meter = line.meter.map(|m| m.to_string()).unwrap_or_default();
        let compliance = report
            .compliance
            .as_ref()
            .and_then(|c| c.get(i))
            .map(|c| format!("  [{}]", compliance_name(*c)))
            .unwrap_or_default();
        println!(
            "{:<width$}  {:>2}  {:<3} {}{}",
            line.text,
            line.syllables,
            line.rhyme.label,
            meter,
            compliance
        );
        if !line.scansion.is_empty() {
            println!("{}", line.scansion);
        }
    }

    println!();
    if report.haiku {
        println!("Haiku: yes (5-7-5)");
    }
    if !report.internal_rhymes.is_empty() {
        println!("Internal rhymes:");
        for r in &report.internal_rhymes {
            println!(
                "  {} (line {}) / {} (line {})",
                r.word1,
                r.line1 + 1,
                r.word2,
                r.line2 + 1
            );
        }
    }
}

fn compliance_name(c: Compliance) -> &'static str {
    match c {
        Compliance::Correct => "rhymes",
        Compliance::Slant => "slant",
        Compliance::Incorrect => "no rhyme",
        Compliance::Pending => "pending",
    }
}
