// Word resolution: raw token in, stressed syllables out.
//
// Resolution is total. A token is normalized (lowercase, only `[a-z'-]`
// kept), looked up in the pronunciation store, and on a miss either split at
// hyphens (compounds resolve part by part) or estimated from its spelling.
// Every result is tagged with a `Source` so callers can flag uncertainty
// instead of handling errors.
//
// The spelling estimator counts vowel-letter groups (`y` included), drops a
// trailing silent `e` for words longer than three letters, drops one for an
// `-ed`/`-es` ending after a non-vowel, adds one for `-le` after a consonant,
// and never returns fewer than one syllable. Estimated syllables all carry
// primary stress; no attempt is made to place the stress.
//
// A `Resolver` is a `Copy` handle around an optional store reference. With
// no store it runs purely on the estimator, which is the normal state of the
// engine before the shared store has finished loading (see `shared.rs`).

use crate::PronunciationStore;
use crate::shared;
use crate::types::{Resolved, Source, Stress, Syllable};

/// Normalize a raw token into a store key.
///
/// Lowercases, maps typographic apostrophes to `'`, drops every character
/// outside `[a-z'-]`, and trims hyphens from both ends and apostrophes from
/// the end.
pub fn normalize(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.chars().flat_map(char::to_lowercase) {
        match c {
            'a'..='z' | '\'' | '-' => out.push(c),
            '\u{2019}' | '\u{2018}' => out.push('\''),
            _ => {}
        }
    }
    let trimmed = out.trim_matches('-').trim_end_matches('\'');
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

/// Resolves words against an optional pronunciation store.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver<'a> {
    store: Option<&'a PronunciationStore>,
}

impl<'a> Resolver<'a> {
    /// A resolver backed by `store`.
    pub fn new(store: &'a PronunciationStore) -> Self {
        Resolver { store: Some(store) }
    }

    /// A resolver that only uses the spelling estimator.
    pub fn heuristic() -> Self {
        Resolver { store: None }
    }

    pub fn store(&self) -> Option<&'a PronunciationStore> {
        self.store
    }

    /// True when no store is attached and every word is estimated.
    pub fn is_degraded(&self) -> bool {
        self.store.is_none()
    }

    /// Resolve a raw token using canonical pronunciations.
    pub fn resolve(&self, word: &str) -> Resolved {
        self.resolve_key(&normalize(word), 0)
    }

    /// Resolve a raw token using pronunciation `variant` where one exists.
    pub fn resolve_variant(&self, word: &str, variant: usize) -> Resolved {
        self.resolve_key(&normalize(word), variant)
    }

    /// Stress levels of a word, one per syllable.
    pub fn stresses(&self, word: &str) -> Vec<Stress> {
        self.resolve(word).stresses()
    }

    /// Syllable texts of a word.
    pub fn syllables(&self, word: &str) -> Vec<String> {
        self.resolve(word).syllable_texts()
    }

    fn resolve_key(&self, key: &str, variant: usize) -> Resolved {
        if key.is_empty() {
            return Resolved::empty();
        }

        if let Some(entry) = self.store.and_then(|s| s.lookup_normalized(key)) {
            return Resolved {
                syllables: entry.variant(variant).syllables.clone(),
                source: Source::Dictionary,
            };
        }

        if key.contains('-') {
            return key
                .split('-')
                .filter(|part| !part.is_empty())
                .map(|part| self.resolve_key(part.trim_end_matches('\''), 0))
                .fold(Resolved::empty(), |mut acc, part| {
                    acc.syllables.extend(part.syllables);
                    acc.source = acc.source.merge(part.source);
                    acc
                });
        }

        estimate(key)
    }
}

impl Resolver<'static> {
    /// Use the shared store if it has finished loading, else the estimator.
    pub fn current() -> Self {
        Resolver {
            store: shared::get(),
        }
    }
}

/// Estimate a normalized word from its spelling.
fn estimate(key: &str) -> Resolved {
    let letters: String = key.chars().filter(|c| c.is_ascii_lowercase()).collect();
    if letters.is_empty() {
        return Resolved::empty();
    }

    let count = estimate_syllable_count(&letters);
    let syllables = split_chunks(&letters, count)
        .into_iter()
        .map(|chunk| Syllable::new(chunk, Stress::Primary))
        .collect();

    Resolved {
        syllables,
        source: Source::Heuristic,
    }
}

fn is_vowel_letter(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Syllable count from spelling alone. Always at least 1.
pub fn estimate_syllable_count(word: &str) -> usize {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();

    let mut count: i64 = 0;
    let mut in_group = false;
    for &c in &chars {
        let vowel = is_vowel_letter(c);
        if vowel && !in_group {
            count += 1;
        }
        in_group = vowel;
    }

    if n > 3 && word.ends_with('e') {
        count -= 1;
    }
    if n >= 3 && (word.ends_with("ed") || word.ends_with("es")) && !is_vowel_letter(chars[n - 3]) {
        count -= 1;
    }
    if n >= 3 && word.ends_with("le") && !is_vowel_letter(chars[n - 3]) {
        count += 1;
    }

    count.max(1) as usize
}

/// Split a word's spelling into `count` display chunks, keeping its case.
///
/// Anything that is not plain ASCII letters (apostrophes, hyphens, accented
/// letters) comes back as one chunk.
pub fn spell_syllables(word: &str, count: usize) -> Vec<String> {
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return vec![word.to_string()];
    }
    let mut rest = word;
    split_chunks(&word.to_ascii_lowercase(), count)
        .iter()
        .map(|chunk| {
            let (head, tail) = rest.split_at(chunk.len());
            rest = tail;
            head.to_string()
        })
        .collect()
}

/// Split a word into exactly `count` spelling chunks.
///
/// Chunks start one consonant before each vowel group (two before a final
/// consonant + `le`). Surplus chunks are merged from the end, and missing
/// ones are split off the last chunk that can spare a letter.
fn split_chunks(word: &str, count: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();

    let mut group_starts = Vec::new();
    let mut group_ends = Vec::new();
    let mut in_group = false;
    for (i, &c) in chars.iter().enumerate() {
        let vowel = is_vowel_letter(c);
        if vowel && !in_group {
            group_starts.push(i);
        }
        if !vowel && in_group {
            group_ends.push(i);
        }
        in_group = vowel;
    }

    let n = chars.len();
    let final_le = n >= 3 && word.ends_with("le") && !is_vowel_letter(chars[n - 3]);

    let mut bounds = vec![0];
    for k in 1..group_starts.len() {
        let start = group_starts[k];
        let prev_end = group_ends[k - 1];
        let bound = if final_le && start == n - 1 && start >= prev_end + 2 {
            // "ta-ble", "can-dle": the consonant before `le` opens the syllable.
            start - 2
        } else if start > prev_end {
            start - 1
        } else {
            start
        };
        bounds.push(bound);
    }
    bounds.push(n);

    let mut chunks: Vec<String> = bounds
        .windows(2)
        .map(|w| chars[w[0]..w[1]].iter().collect())
        .collect();

    while chunks.len() > count.max(1) {
        let last = chunks.pop().unwrap_or_default();
        if let Some(prev) = chunks.last_mut() {
            prev.push_str(&last);
        }
    }

    while chunks.len() < count {
        let Some(idx) = chunks.iter().rposition(|c| c.len() >= 2) else {
            break;
        };
        let chunk = chunks.remove(idx);
        let cut = if chunk.len() > 2 { chunk.len() - 2 } else { 1 };
        chunks.insert(idx, chunk[cut..].to_string());
        chunks.insert(idx, chunk[..cut].to_string());
    }

    chunks
}
