// used for persistence
use rusqlite::{params, Connection, OptionalExtension};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::store::{AliasStore, BookAliasState};

pub type BookId = i64;

const GOODREADS_URL: &str = "goodreads_url";
const ALIASES: &str = "aliases";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

impl PersistenceMode {
    /// An empty path means nothing is written to disk.
    pub fn from_path(path: &str) -> Self {
        if path.is_empty() {
            PersistenceMode::InMemory
        } else {
            PersistenceMode::File(path.to_owned())
        }
    }
}

// ------------- Persistence -------------
pub struct Persistor {
    db: Connection,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Result<Persistor> {
        let db = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        // The "STRICT" keyword introduced in 3.37.0 breaks JDBC connections, which makes
        // debugging using an external tool like DBeaver impossible
        db.execute_batch(
            "
            create table if not exists BookSetting (
                Book_Identity integer not null,
                Setting text not null,
                Value text not null,
                UpdatedAt text not null,
                constraint unique_and_referenceable_BookSetting primary key (
                    Book_Identity,
                    Setting
                )
            );-- STRICT;
            ",
        )?;
        Ok(Persistor { db })
    }

    fn read_setting<T: DeserializeOwned>(&self, book: BookId, setting: &str) -> Result<Option<T>> {
        let value: Option<String> = self
            .db
            .prepare_cached(
                "
                select Value
                    from BookSetting
                    where Book_Identity = ?
                    and Setting = ?
            ",
            )?
            .query_row(params![book, setting], |r| r.get(0))
            .optional()?;
        match value {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn write_setting<T: Serialize>(
        db: &Connection,
        book: BookId,
        setting: &str,
        value: &T,
        at: &DateTime<Utc>,
    ) -> Result<()> {
        let text = serde_json::to_string(value)?;
        db.prepare_cached(
            "
            insert into BookSetting (
                Book_Identity,
                Setting,
                Value,
                UpdatedAt
            ) values (?, ?, ?, ?)
            on conflict (Book_Identity, Setting) do update set
                Value = excluded.Value,
                UpdatedAt = excluded.UpdatedAt
        ",
        )?
        .execute(params![book, setting, text, at])?;
        Ok(())
    }

    /// Missing settings come back as their defaults: an empty url and no aliases.
    pub fn load(&self, book: BookId) -> Result<BookAliasState> {
        let goodreads_url: Option<String> = self.read_setting(book, GOODREADS_URL)?;
        let aliases: Option<AliasStore> = self.read_setting(book, ALIASES)?;
        Ok(BookAliasState {
            goodreads_url: goodreads_url.unwrap_or_default(),
            aliases: aliases.unwrap_or_default(),
        })
    }

    pub fn save(&mut self, book: BookId, state: &BookAliasState) -> Result<()> {
        let now = Utc::now();
        let tx = self.db.transaction()?;
        Self::write_setting(&tx, book, GOODREADS_URL, &state.goodreads_url, &now)?;
        Self::write_setting(&tx, book, ALIASES, &state.aliases, &now)?;
        tx.commit()?;
        debug!(book, labels = state.aliases.len(), "book settings saved");
        Ok(())
    }

    pub fn last_updated(&self, book: BookId) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .db
            .prepare_cached(
                "
                select max(UpdatedAt)
                    from BookSetting
                    where Book_Identity = ?
            ",
            )?
            .query_row(params![book], |r| r.get::<_, Option<DateTime<Utc>>>(0))?)
    }

    pub fn books(&self) -> Result<Vec<BookId>> {
        let mut statement = self.db.prepare_cached(
            "
            select distinct Book_Identity
                from BookSetting
                order by Book_Identity
        ",
        )?;
        let books = statement
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<BookId>, _>>()?;
        Ok(books)
    }
}
