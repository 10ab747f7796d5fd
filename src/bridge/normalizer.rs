//! Key Normalizer Module
//!
//! Strips the upstream namespace segment from cache keys.

// == Key Normalizer ==
/// Maps upstream cache keys onto the local cache's addressing scheme.
///
/// Namespace-aware upstream revisions emit keys as `"<namespace>:<localKey>"`,
/// while the local cache is keyed by `localKey` alone. Older revisions never
/// emit a namespace, so stripping is only done when the capability is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyNormalizer {
    namespace_aware: bool,
}

impl KeyNormalizer {
    // == Constructor ==
    /// Creates a normalizer for an upstream with or without namespaced keys.
    pub fn new(namespace_aware: bool) -> Self {
        Self { namespace_aware }
    }

    /// Returns true if namespace prefixes are stripped.
    pub fn is_namespace_aware(&self) -> bool {
        self.namespace_aware
    }

    // == Normalize ==
    /// Returns the part of `key` after the first `:`.
    ///
    /// The key is returned unchanged when the upstream is not namespace
    /// aware, when it has no `:`, or when the first `:` is at index 0.
    pub fn normalize<'a>(&self, key: &'a str) -> &'a str {
        if !self.namespace_aware {
            return key;
        }
        match key.find(':') {
            Some(idx) if idx > 0 => &key[idx + 1..],
            _ => key,
        }
    }
}
