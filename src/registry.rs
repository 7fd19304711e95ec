// src/registry.rs
//! Reverse-lookup hash registry.
//!
//! Hashes are handed out as compact identifiers all over the host system; this
//! registry keeps the original strings around so tooling and logs can turn a
//! hash back into something human-readable. Entries are append-only for the
//! process lifetime and the reverse query is total: unknown hashes resolve to
//! the [`UNKNOWN`] sentinel, never to an error.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::hash::fnv1a;

/// Sentinel returned by [`HashRegistry::reverse`] for unregistered hashes.
pub const UNKNOWN: &str = "<unknown>";

static GLOBAL: Lazy<HashRegistry> = Lazy::new(HashRegistry::new);
static UNKNOWN_SHARED: Lazy<Arc<str>> = Lazy::new(|| Arc::from(UNKNOWN));

pub struct HashRegistry {
    /// Mapping of hash values to the first original registered for each.
    entries: DashMap<u64, Arc<str>>,
}

impl HashRegistry {
    /// Create a new, empty registry.
    ///
    /// Most callers want [`HashRegistry::global`]; a dedicated instance is
    /// useful for hosts that inject the registry as an owned service.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// The process-wide registry instance, initialized lazily on first use.
    pub fn global() -> &'static HashRegistry {
        &GLOBAL
    }

    /// Hash a string and register it for reverse lookup.
    ///
    /// Safe to call from any number of threads concurrently; the returned
    /// hash is already resolvable via [`reverse`](Self::reverse) by the time
    /// this returns.
    pub fn hash_str(&self, input: &str) -> u64 {
        let h = fnv1a(input.as_bytes());
        self.register(h, || Arc::from(input));
        h
    }

    /// Hash an arbitrary byte sequence and register it for reverse lookup.
    ///
    /// The hash is computed over the exact bytes; the registered original is
    /// the lossy UTF-8 rendering of them, which is all a debugging aid needs.
    pub fn hash_bytes(&self, input: &[u8]) -> u64 {
        let h = fnv1a(input);
        self.register(h, || Arc::from(String::from_utf8_lossy(input).into_owned()));
        h
    }

    /// Resolve a hash back to its registered original.
    ///
    /// Total: any 64-bit value is a valid query. Unregistered hashes resolve
    /// to the shared [`UNKNOWN`] sentinel. Never mutates the registry.
    pub fn reverse(&self, hash: u64) -> Arc<str> {
        match self.entries.get(&hash) {
            Some(entry) => entry.clone(),
            None => UNKNOWN_SHARED.clone(),
        }
    }

    /// Number of distinct hash values registered so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert-or-get on one hash value. First writer wins: a colliding input
    /// that arrives after an entry exists leaves the stored original
    /// untouched. The entry guard makes the check-and-insert atomic with
    /// respect to concurrent registrations of the same value.
    fn register<F>(&self, hash: u64, original: F)
    where
        F: FnOnce() -> Arc<str>,
    {
        if let Entry::Vacant(slot) = self.entries.entry(hash) {
            let original = original();
            tracing::debug!(hash, original = original.as_ref(), "registered reverse entry");
            slot.insert(original);
        }
    }
}

impl Default for HashRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a string through the process-wide registry.
pub fn hash_str(input: &str) -> u64 {
    HashRegistry::global().hash_str(input)
}

/// Hash a byte sequence through the process-wide registry.
pub fn hash_bytes(input: &[u8]) -> u64 {
    HashRegistry::global().hash_bytes(input)
}

/// Reverse a hash through the process-wide registry.
pub fn reverse(hash: u64) -> Arc<str> {
    HashRegistry::global().reverse(hash)
}
