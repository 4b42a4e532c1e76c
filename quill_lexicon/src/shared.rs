// Process-wide pronunciation store.
//
// The store is the engine's only shared state and its only slow step (a
// bulk parse of the dictionary). It lives in a `OnceCell`: the first caller
// of `load()`/`load_from()` parses, every concurrent caller blocks on that
// same initialization, and every later caller gets the same `&'static`
// reference. Nothing mutates the store after it is set, so no locking is
// needed anywhere downstream.
//
// Callers that must not block use `load_in_background()` and meanwhile
// analyze with `Resolver::current()`, which falls back to the spelling
// estimator until `is_loaded()` turns true.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use once_cell::sync::OnceCell;

use crate::{PronunciationStore, default_store};

static STORE: OnceCell<PronunciationStore> = OnceCell::new();
static BACKGROUND: OnceCell<()> = OnceCell::new();

/// Load the embedded dataset, or return the store already loaded.
pub fn load() -> &'static PronunciationStore {
    STORE.get_or_init(|| timed(default_store))
}

/// Load a dataset from `path`, or return the store already loaded.
///
/// If the file cannot be read or parsed the embedded dataset is used and a
/// warning is logged; a missing dataset is never fatal.
pub fn load_from(path: &Path) -> &'static PronunciationStore {
    STORE.get_or_init(|| timed(|| load_or_fallback(path)))
}

/// Parse the dataset at `path`, or the embedded one if that fails.
fn load_or_fallback(path: &Path) -> PronunciationStore {
    match PronunciationStore::from_path(path) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("{err}; falling back to the embedded dataset");
            default_store()
        }
    }
}

/// Start loading on a background thread. Only the first call spawns.
pub fn load_in_background(path: Option<PathBuf>) {
    BACKGROUND.get_or_init(|| {
        let spawned = thread::Builder::new()
            .name("quill-store-load".to_string())
            .spawn(move || match path {
                Some(p) => {
                    load_from(&p);
                }
                None => {
                    load();
                }
            });
        if let Err(err) = spawned {
            log::warn!("could not spawn store loader ({err}); loading inline");
            load();
        }
    });
}

/// Install a caller-built store. Fails, returning the store, if one is
/// already loaded.
pub fn install(store: PronunciationStore) -> Result<(), PronunciationStore> {
    STORE.set(store)
}

pub fn is_loaded() -> bool {
    STORE.get().is_some()
}

/// The loaded store, without waiting for or triggering a load.
pub fn get() -> Option<&'static PronunciationStore> {
    STORE.get()
}

fn timed(build: impl FnOnce() -> PronunciationStore) -> PronunciationStore {
    let start = Instant::now();
    let store = build();
    log::debug!(
        "pronunciation store ready: {} words in {:?}",
        store.len(),
        start.elapsed()
    );
    store
}
