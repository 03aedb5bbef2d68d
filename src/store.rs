//! Per-book alias bookkeeping.
//!
//! The store owns the label → aliases mapping of one book. It never removes an
//! alias on its own: a roster merge only adds labels and aliases that are not
//! already recorded, unless the caller asks for a full overwrite. Cross-label
//! collisions are filtered upstream by the deduplicator, not here.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::roster::RosterAliases;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasStore {
    kept: BTreeMap<String, Vec<String>>,
}

/// What a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub labels_added: usize,
    pub aliases_added: usize,
    pub cleared: bool,
}

impl MergeReport {
    pub fn is_unchanged(&self) -> bool {
        self.labels_added == 0 && self.aliases_added == 0 && !self.cleared
    }
}

impl AliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aliases of `label`, empty when the label is unknown.
    pub fn get(&self, label: &str) -> &[String] {
        self.kept.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.kept.contains_key(label)
    }

    /// Returns true when the label was not known before.
    pub fn ensure_label(&mut self, label: &str) -> bool {
        if self.kept.contains_key(label) {
            return false;
        }
        self.kept.insert(label.to_owned(), Vec::new());
        true
    }

    /// Append `alias` to `label` unless it is already recorded there.
    pub fn add_alias(&mut self, label: &str, alias: &str) -> bool {
        let aliases = self.kept.entry(label.to_owned()).or_default();
        if aliases.iter().any(|kept| kept == alias) {
            return false;
        }
        aliases.push(alias.to_owned());
        true
    }

    /// Replace the aliases of one label from an editor string such as
    /// `" foo ,  bar,,baz"`: entries are trimmed, empty ones dropped.
    pub fn set_aliases_from_text(&mut self, label: &str, text: &str) {
        let mut aliases: Vec<String> = Vec::new();
        for alias in text.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            if !aliases.iter().any(|kept| kept == alias) {
                aliases.push(alias.to_owned());
            }
        }
        self.kept.insert(label.to_owned(), aliases);
    }

    pub fn clear(&mut self) {
        self.kept.clear();
    }

    /// Merge the outcome of one roster pass. With `overwrite` the store is cleared
    /// first and rebuilt from `roster` alone.
    pub fn merge_roster(&mut self, roster: &RosterAliases, overwrite: bool) -> MergeReport {
        let mut report = MergeReport::default();
        if overwrite {
            self.clear();
            report.cleared = true;
        }
        for entry in roster.iter() {
            // seeds only apply to labels seen for the first time
            if self.ensure_label(&entry.label) {
                report.labels_added += 1;
                for seed in &entry.seeds {
                    if self.add_alias(&entry.label, seed) {
                        report.aliases_added += 1;
                    }
                }
            }
            for alias in &entry.aliases {
                if self.add_alias(&entry.label, alias) {
                    report.aliases_added += 1;
                }
            }
        }
        report
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.kept.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.kept.iter()
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl<'s> IntoIterator for &'s AliasStore {
    type Item = (&'s String, &'s Vec<String>);
    type IntoIter = btree_map::Iter<'s, String, Vec<String>>;
    fn into_iter(self) -> Self::IntoIter {
        self.kept.iter()
    }
}

/// Everything persisted for one book, in the exact shape it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAliasState {
    /// Empty while the book has not been resolved.
    #[serde(default)]
    pub goodreads_url: String,
    #[serde(default)]
    pub aliases: AliasStore,
}

impl BookAliasState {
    pub fn is_resolved(&self) -> bool {
        !self.goodreads_url.is_empty()
    }
}
