//! Roster records supplied for a book and the roster pass that turns them into
//! per-label alias lists.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dedup::RosterDeduplicator;
use crate::error::{AliasError, Result};
use crate::honorific::AliasHasher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub label: String,
    /// Aliases already declared by the roster source.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingRecord {
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
    #[serde(default)]
    pub settings: Vec<SettingRecord>,
}

impl Roster {
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.settings.is_empty()
    }
}

/// Supplies the roster of a book. `Ok(None)` means the source had nothing to offer.
pub trait RosterSource {
    fn fetch_roster(&mut self, url: &str) -> Result<Option<Roster>>;
}

impl<F> RosterSource for F
where
    F: FnMut(&str) -> Result<Option<Roster>>,
{
    fn fetch_roster(&mut self, url: &str) -> Result<Option<Roster>> {
        self(url)
    }
}

/// A roster kept as a JSON file, whatever the book url.
#[derive(Debug, Clone)]
pub struct JsonRosterFile {
    path: PathBuf,
}

impl JsonRosterFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn read(&self) -> Result<Roster> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| AliasError::Roster(format!("{}: {}", self.path.display(), e)))?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl RosterSource for JsonRosterFile {
    fn fetch_roster(&mut self, _url: &str) -> Result<Option<Roster>> {
        let roster = self.read()?;
        Ok(if roster.is_empty() { None } else { Some(roster) })
    }
}

/// Aliases one label receives from a roster pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAliases {
    pub label: String,
    /// Declared aliases, recorded only when the label is new to the store.
    #[serde(default)]
    pub seeds: Vec<String>,
    /// Reconciled aliases, in acceptance order.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterAliases {
    entries: Vec<LabelAliases>,
}

impl RosterAliases {
    /// Run candidate generation and reconciliation over a whole roster. Each
    /// character's label and its declared aliases are reconciled as names of the
    /// same identity; settings only get their label recorded.
    ///
    /// A declared alias only becomes a seed when it names a single character: one
    /// declared by several labels, or spelling another character's label, is dropped.
    pub fn from_roster(roster: &Roster) -> Self {
        let mut declared_by: HashMap<String, HashSet<&str, AliasHasher>, AliasHasher> = HashMap::default();
        for character in &roster.characters {
            for alias in &character.aliases {
                declared_by
                    .entry(alias.to_lowercase())
                    .or_default()
                    .insert(character.label.as_str());
            }
        }
        let labels: HashSet<String, AliasHasher> = roster
            .characters
            .iter()
            .map(|character| character.label.to_lowercase())
            .collect();

        let mut deduplicator = RosterDeduplicator::new();
        let mut entries: Vec<LabelAliases> = Vec::with_capacity(roster.characters.len() + roster.settings.len());
        for character in &roster.characters {
            deduplicator.push(character.label.as_str(), character.label.as_str());
            let own = character.label.to_lowercase();
            let mut seeds = Vec::with_capacity(character.aliases.len());
            for alias in &character.aliases {
                deduplicator.push(alias.as_str(), character.label.as_str());
                let key = alias.to_lowercase();
                let shared = declared_by.get(&key).is_some_and(|owners| owners.len() > 1);
                if shared || (key != own && labels.contains(&key)) {
                    debug!(alias = %alias, label = %character.label, "ambiguous seed alias dropped");
                } else if !seeds.contains(alias) {
                    seeds.push(alias.clone());
                }
            }
            entries.push(LabelAliases {
                label: character.label.clone(),
                seeds,
                aliases: Vec::new(),
            });
        }
        let names = deduplicator.len();
        let reconciliation = deduplicator.reconcile();
        debug!(names, accepted = reconciliation.len(), "roster reconciled");
        for (owner, aliases) in reconciliation.into_owner_map() {
            if let Some(entry) = entries.iter_mut().find(|entry| entry.label == owner) {
                entry.aliases.extend(aliases);
            }
        }
        for setting in &roster.settings {
            entries.push(LabelAliases {
                label: setting.label.clone(),
                ..LabelAliases::default()
            });
        }
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<&LabelAliases> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelAliases> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<LabelAliases> for RosterAliases {
    fn from_iter<I: IntoIterator<Item = LabelAliases>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
