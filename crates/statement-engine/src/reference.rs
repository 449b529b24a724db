//! Do-not-mail reference list
//!
//! Loads the canonical company list once per run and pre-computes a
//! normalized lookup map for O(1) matching.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::EngineError;
use crate::patterns::normalize_company_name;

/// Canonical reference names plus a normalized-name lookup map.
///
/// Immutable after load; one instance is scoped to a single pipeline run so
/// multiple documents can be processed without cross-talk.
#[derive(Debug, Clone)]
pub struct ReferenceList {
    canonical: Vec<String>,
    canonical_set: HashSet<String>,
    normalized: HashMap<String, String>,
}

impl ReferenceList {
    /// Build the list from an ordered sequence of candidate names, skipping
    /// blank entries and header rows (entries starting with "name").
    ///
    /// Two distinct companies that normalize identically collapse to one
    /// normalized entry, last write wins. That shadows the earlier company
    /// from normalized lookups; it is logged rather than fixed because the
    /// intended behavior is unspecified upstream.
    pub fn from_names<I>(names: I) -> Result<Self, EngineError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut canonical = Vec::new();
        let mut normalized: HashMap<String, String> = HashMap::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || name.to_lowercase().starts_with("name") {
                continue;
            }
            canonical.push(name.to_string());

            let key = normalize_company_name(name);
            if key.is_empty() {
                continue;
            }
            if let Some(previous) = normalized.insert(key.clone(), name.to_string()) {
                if previous != name {
                    warn!(
                        key = %key,
                        shadowed = %previous,
                        kept = %name,
                        "normalized reference names collide, keeping the later entry"
                    );
                }
            }
        }

        if canonical.is_empty() {
            return Err(EngineError::ReferenceLoad(
                "no usable entries after filtering header and blank rows".into(),
            ));
        }

        let canonical_set = canonical.iter().cloned().collect();
        Ok(Self {
            canonical,
            canonical_set,
            normalized,
        })
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// O(1) exact-string membership against the canonical names.
    pub fn contains_exact(&self, name: &str) -> bool {
        self.canonical_set.contains(name)
    }

    /// O(1) lookup of the canonical name behind a normalized key.
    pub fn lookup_normalized(&self, key: &str) -> Option<&str> {
        self.normalized.get(key).map(String::as_str)
    }

    /// All `(normalized_key, canonical_name)` pairs, for the fuzzy scan.
    pub fn normalized_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.normalized
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical names in load order.
    pub fn canonical_names(&self) -> &[String] {
        &self.canonical
    }
}
