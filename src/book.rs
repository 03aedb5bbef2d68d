//! Alias state of a single book: resolving it, running the roster pass and saving.

use tracing::{info, warn};

use crate::error::Result;
use crate::persist::{BookId, Persistor};
use crate::resolve::{title_and_author, IdentityResolver};
use crate::roster::{RosterAliases, RosterSource};
use crate::store::{AliasStore, BookAliasState, MergeReport};

/// Placeholder the host library uses for a missing title or author.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: String,
    pub authors: Vec<String>,
}

impl BookMetadata {
    pub fn new(title: impl Into<String>, authors: Vec<String>) -> Self {
        Self { title: title.into(), authors }
    }

    pub fn author(&self) -> String {
        if self.authors.is_empty() {
            return UNKNOWN.to_owned();
        }
        self.authors.join(" & ")
    }

    /// Only books with a known title and author are worth a remote search.
    pub fn is_searchable(&self) -> bool {
        self.title != UNKNOWN && self.author() != UNKNOWN
    }

    pub fn title_and_author(&self) -> String {
        title_and_author(&self.title, &self.authors)
    }
}

pub struct BookSettings<'p> {
    persistor: &'p mut Persistor,
    book: BookId,
    metadata: BookMetadata,
    state: BookAliasState,
}

impl<'p> BookSettings<'p> {
    /// Load the stored state of `book`, resolve its url if still unknown, run a
    /// first roster pass when no aliases are recorded yet, and save.
    pub fn open(
        persistor: &'p mut Persistor,
        book: BookId,
        metadata: BookMetadata,
        resolver: &mut dyn IdentityResolver,
        source: &mut dyn RosterSource,
    ) -> Result<BookSettings<'p>> {
        let state = persistor.load(book)?;
        let mut settings = BookSettings { persistor, book, metadata, state };
        if !settings.state.is_resolved() && settings.metadata.is_searchable() {
            if let Some(url) = resolver.resolve(&settings.metadata.title_and_author()) {
                settings.state.goodreads_url = url;
            }
        }
        if settings.state.aliases.is_empty() && settings.state.is_resolved() {
            settings.update_aliases(source, false)?;
        }
        settings.save()?;
        Ok(settings)
    }

    /// Run one roster pass. When the source yields nothing, an empty roster, or
    /// fails, the current aliases are kept as they are.
    pub fn update_aliases(&mut self, source: &mut dyn RosterSource, overwrite: bool) -> Result<MergeReport> {
        let url = self.state.goodreads_url.clone();
        let roster = match source.fetch_roster(&url) {
            Ok(Some(roster)) if !roster.is_empty() => roster,
            Ok(_) => {
                warn!(book = self.book, %url, "no roster data, aliases left untouched");
                return Ok(MergeReport::default());
            }
            Err(e) => {
                warn!(book = self.book, %url, error = %e, "roster retrieval failed, aliases left untouched");
                return Ok(MergeReport::default());
            }
        };
        let report = self.merge(&RosterAliases::from_roster(&roster), overwrite);
        Ok(report)
    }

    pub fn merge(&mut self, roster: &RosterAliases, overwrite: bool) -> MergeReport {
        let report = self.state.aliases.merge_roster(roster, overwrite);
        info!(
            book = self.book,
            labels_added = report.labels_added,
            aliases_added = report.aliases_added,
            overwrite,
            "aliases merged"
        );
        report
    }

    pub fn save(&mut self) -> Result<()> {
        self.persistor.save(self.book, &self.state)
    }

    pub fn book(&self) -> BookId {
        self.book
    }

    pub fn metadata(&self) -> &BookMetadata {
        &self.metadata
    }

    pub fn goodreads_url(&self) -> &str {
        &self.state.goodreads_url
    }

    pub fn set_goodreads_url(&mut self, url: impl Into<String>) {
        self.state.goodreads_url = url.into();
    }

    pub fn aliases(&self) -> &AliasStore {
        &self.state.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut AliasStore {
        &mut self.state.aliases
    }

    pub fn state(&self) -> &BookAliasState {
        &self.state
    }
}
