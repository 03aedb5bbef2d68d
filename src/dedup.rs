//! Cross-roster reconciliation of candidate aliases.
//!
//! A candidate is only useful if it points at exactly one canonical identity. The
//! deduplicator runs in two separate passes:
//!
//! 1. [`RosterDeduplicator::push`] collects every roster name together with its
//!    owner and the candidates generated for it. Every full name is also put in
//!    the duplicates set, so a candidate that *is* some roster member's full name
//!    can never become an alias.
//! 2. [`RosterDeduplicator::reconcile`] walks the collected candidates in roster
//!    order. A candidate that was already accepted for a different owner is
//!    evicted and flagged; once flagged it stays excluded for the rest of the pass.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::candidate::generate;
use crate::honorific::AliasHasher;

/// Words that are never accepted as an alias on their own.
pub const COMMON_WORDS: [&str; 3] = ["the", "of", "de"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedAlias {
    /// First accepted spelling of the alias.
    pub alias: String,
    /// The roster name the alias was generated from.
    pub full_name: String,
    /// Canonical identity owning `full_name`.
    pub owner: String,
}

#[derive(Debug)]
struct RosterName {
    full_name: String,
    owner: String,
    candidates: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RosterDeduplicator {
    names: Vec<RosterName>,
    duplicates: HashSet<String, AliasHasher>,
}

impl RosterDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one roster name. Names sharing an `owner` are the same identity, so
    /// candidates they have in common do not collide with each other.
    pub fn push(&mut self, full_name: impl Into<String>, owner: impl Into<String>) {
        let full_name = full_name.into();
        self.duplicates.insert(full_name.to_lowercase());
        let candidates = generate(&full_name);
        self.names.push(RosterName {
            full_name,
            owner: owner.into(),
            candidates,
        });
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn reconcile(self) -> Reconciliation {
        let RosterDeduplicator { names, mut duplicates } = self;
        let mut accepted: HashMap<String, (usize, AcceptedAlias), AliasHasher> = HashMap::default();
        let mut sequence = 0;
        for name in names {
            for candidate in name.candidates {
                let key = candidate.to_lowercase();
                if duplicates.contains(&key) || COMMON_WORDS.contains(&key.as_str()) {
                    continue;
                }
                let collides = accepted
                    .get(&key)
                    .map(|(_, existing)| existing.owner != name.owner);
                match collides {
                    Some(true) => {
                        if let Some((_, evicted)) = accepted.remove(&key) {
                            debug!(alias = %candidate, first = %evicted.owner, second = %name.owner, "ambiguous alias evicted");
                        }
                        duplicates.insert(key);
                    }
                    Some(false) => {}
                    None => {
                        accepted.insert(
                            key,
                            (
                                sequence,
                                AcceptedAlias {
                                    alias: candidate,
                                    full_name: name.full_name.clone(),
                                    owner: name.owner.clone(),
                                },
                            ),
                        );
                        sequence += 1;
                    }
                }
            }
        }
        let mut entries: Vec<(usize, AcceptedAlias)> = accepted.into_values().collect();
        entries.sort_by_key(|(sequence, _)| *sequence);
        Reconciliation::new(entries.into_iter().map(|(_, alias)| alias).collect())
    }
}

/// Reconcile a roster where every full name is its own identity.
pub fn reconcile<S: AsRef<str>>(full_names: &[S]) -> Reconciliation {
    let mut deduplicator = RosterDeduplicator::new();
    for full_name in full_names {
        deduplicator.push(full_name.as_ref(), full_name.as_ref());
    }
    deduplicator.reconcile()
}

/// Unambiguous aliases in the order they were accepted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Reconciliation {
    entries: Vec<AcceptedAlias>,
    #[serde(skip)]
    index: HashMap<String, usize, AliasHasher>,
}

impl Reconciliation {
    fn new(entries: Vec<AcceptedAlias>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.alias.to_lowercase(), i))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, alias: &str) -> Option<&AcceptedAlias> {
        self.index
            .get(&alias.to_lowercase())
            .map(|&i| &self.entries[i])
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.index.contains_key(&alias.to_lowercase())
    }

    pub fn owner_of(&self, alias: &str) -> Option<&str> {
        self.get(alias).map(|entry| entry.owner.as_str())
    }

    pub fn aliases_for<'r>(&'r self, owner: &'r str) -> impl Iterator<Item = &'r str> + 'r {
        self.entries
            .iter()
            .filter(move |entry| entry.owner == owner)
            .map(|entry| entry.alias.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AcceptedAlias> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowercase alias to owning full name.
    pub fn full_name_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|entry| (entry.alias.to_lowercase(), entry.full_name.clone()))
            .collect()
    }

    /// Owners in order of their first accepted alias, each with its aliases.
    pub fn into_owner_map(self) -> Vec<(String, Vec<String>)> {
        let mut positions: HashMap<String, usize, AliasHasher> = HashMap::default();
        let mut owners: Vec<(String, Vec<String>)> = Vec::new();
        for entry in self.entries {
            let position = *positions.entry(entry.owner.clone()).or_insert_with(|| {
                owners.push((entry.owner.clone(), Vec::new()));
                owners.len() - 1
            });
            owners[position].1.push(entry.alias);
        }
        owners
    }
}

impl<'r> IntoIterator for &'r Reconciliation {
    type Item = &'r AcceptedAlias;
    type IntoIter = std::slice::Iter<'r, AcceptedAlias>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
