//! Compile-once pattern cache.
//!
//! `FrozenDfa` construction is the expensive half of the engine, so hosts
//! that match the same patterns repeatedly compile them once, eagerly or
//! on first use, and share the artifacts. Reads go through an `ArcSwap`
//! snapshot and are lock-free; compilation is serialized behind a mutex
//! and publishes a fresh snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::dfa::{CompileOptions, FrozenDfa};
use crate::{compile_with, CompileError};

type Snapshot = FxHashMap<String, Arc<FrozenDfa>>;

/// Thread-safe cache of compiled patterns.
///
/// ```
/// use frozen_regexp::PatternCache;
///
/// let cache = PatternCache::new();
/// let dfa = cache.get_or_compile("(a|b)*ab").unwrap();
/// assert!(dfa.is_match(b"ababab"));
/// ```
pub struct PatternCache {
    snapshot: ArcSwap<Snapshot>,
    build_lock: Mutex<()>,
    options: CompileOptions,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    /// A cache whose entries are all frozen with the given options.
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::default()),
            build_lock: Mutex::new(()),
            options,
        }
    }

    /// Fetch the compiled form of `pattern`, compiling and publishing it
    /// on first sight. Repeated calls return the same artifact.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<FrozenDfa>, CompileError> {
        if let Some(dfa) = self.snapshot.load().get(pattern) {
            return Ok(dfa.clone());
        }

        let _guard = self.build_lock.lock();
        // another writer may have published it while we waited
        if let Some(dfa) = self.snapshot.load().get(pattern) {
            return Ok(dfa.clone());
        }

        let dfa = Arc::new(compile_with(pattern, &self.options)?);
        let mut next: Snapshot = (**self.snapshot.load()).clone();
        next.insert(pattern.to_string(), dfa.clone());
        self.snapshot.store(Arc::new(next));
        Ok(dfa)
    }

    /// A previously compiled pattern, if present.
    pub fn get(&self, pattern: &str) -> Option<Arc<FrozenDfa>> {
        self.snapshot.load().get(pattern).cloned()
    }

    /// Compile-or-fetch, then match.
    pub fn is_match(&self, pattern: &str, input: &[u8]) -> Result<bool, CompileError> {
        Ok(self.get_or_compile(pattern)?.is_match(input))
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.load().is_empty()
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}
