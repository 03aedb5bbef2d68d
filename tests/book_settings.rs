use std::cell::Cell;

use xray_aliases::book::{BookMetadata, BookSettings, UNKNOWN};
use xray_aliases::persist::{PersistenceMode, Persistor};
use xray_aliases::roster::{CharacterRecord, Roster, SettingRecord};
use xray_aliases::{AliasError, Result};

const URL: &str = "https://www.goodreads.com/book/show/1.Example";

fn roster() -> Roster {
    Roster {
        characters: vec![
            CharacterRecord { label: "John Smith".into(), aliases: vec![] },
            CharacterRecord { label: "Jane Smith".into(), aliases: vec![] },
        ],
        settings: vec![SettingRecord { label: "London".into() }],
    }
}

fn metadata() -> BookMetadata {
    BookMetadata::new("Example", vec!["A. Writer".to_string()])
}

#[test]
fn first_open_resolves_and_populates() {
    let mut persistor = Persistor::new(PersistenceMode::InMemory).expect("db");
    let queries = Cell::new(0);
    let mut resolver = |query: &str| {
        queries.set(queries.get() + 1);
        assert_eq!(query, "Example - A. Writer");
        Some(URL.to_string())
    };
    let mut source = |url: &str| -> Result<Option<Roster>> {
        assert_eq!(url, URL);
        Ok(Some(roster()))
    };
    let settings = BookSettings::open(&mut persistor, 7, metadata(), &mut resolver, &mut source).expect("open");
    assert_eq!(settings.goodreads_url(), URL);
    assert_eq!(settings.aliases().get("John Smith"), ["John"]);
    assert_eq!(settings.aliases().get("Jane Smith"), ["Jane"]);
    assert!(settings.aliases().contains_label("London"));
    assert_eq!(queries.get(), 1);

    let stored = persistor.load(7).expect("load");
    assert_eq!(stored.goodreads_url, URL);
    assert_eq!(stored.aliases.get("John Smith"), ["John"]);
    assert_eq!(persistor.books().expect("books"), vec![7]);
    assert!(persistor.last_updated(7).expect("updated").is_some());
}

#[test]
fn reopening_does_not_search_or_refetch() {
    let mut persistor = Persistor::new(PersistenceMode::InMemory).expect("db");
    let mut resolver = |_: &str| Some(URL.to_string());
    let mut source = |_: &str| -> Result<Option<Roster>> { Ok(Some(roster())) };
    BookSettings::open(&mut persistor, 1, metadata(), &mut resolver, &mut source).expect("open");

    let mut unexpected_resolver = |_: &str| -> Option<String> { panic!("already resolved") };
    let mut unexpected_source = |_: &str| -> Result<Option<Roster>> { panic!("aliases already present") };
    let settings = BookSettings::open(&mut persistor, 1, metadata(), &mut unexpected_resolver, &mut unexpected_source)
        .expect("reopen");
    assert_eq!(settings.aliases().get("John Smith"), ["John"]);
}

#[test]
fn unknown_metadata_skips_resolution() {
    let mut persistor = Persistor::new(PersistenceMode::InMemory).expect("db");
    let mut resolver = |_: &str| -> Option<String> { panic!("must not search") };
    let mut source = |_: &str| -> Result<Option<Roster>> { panic!("nothing to fetch") };
    let unknown = BookMetadata::new(UNKNOWN, vec!["A. Writer".to_string()]);
    let settings = BookSettings::open(&mut persistor, 2, unknown, &mut resolver, &mut source).expect("open");
    assert_eq!(settings.goodreads_url(), "");
    assert!(settings.aliases().is_empty());

    let anonymous = BookMetadata::new("Example", Vec::new());
    assert!(!anonymous.is_searchable());
    assert_eq!(anonymous.author(), UNKNOWN);
}

#[test]
fn unresolved_book_stays_unresolved() {
    let mut persistor = Persistor::new(PersistenceMode::InMemory).expect("db");
    let mut resolver = |_: &str| -> Option<String> { None };
    let mut source = |_: &str| -> Result<Option<Roster>> { panic!("no url to fetch from") };
    let settings = BookSettings::open(&mut persistor, 3, metadata(), &mut resolver, &mut source).expect("open");
    assert_eq!(settings.goodreads_url(), "");
    assert!(!settings.state().is_resolved());
}

#[test]
fn missing_roster_leaves_aliases_untouched() {
    let mut persistor = Persistor::new(PersistenceMode::InMemory).expect("db");
    let mut resolver = |_: &str| Some(URL.to_string());
    let mut source = |_: &str| -> Result<Option<Roster>> { Ok(Some(roster())) };
    let mut settings = BookSettings::open(&mut persistor, 4, metadata(), &mut resolver, &mut source).expect("open");
    let before = settings.aliases().clone();

    let mut empty = |_: &str| -> Result<Option<Roster>> { Ok(None) };
    let report = settings.update_aliases(&mut empty, true).expect("update");
    assert!(report.is_unchanged());
    assert_eq!(settings.aliases(), &before);

    let mut failing = |_: &str| -> Result<Option<Roster>> { Err(AliasError::Roster("connection reset".into())) };
    let report = settings.update_aliases(&mut failing, true).expect("update");
    assert!(report.is_unchanged());
    assert_eq!(settings.aliases(), &before);
}

#[test]
fn empty_roster_leaves_aliases_untouched() {
    let mut persistor = Persistor::new(PersistenceMode::InMemory).expect("db");
    let mut resolver = |_: &str| Some(URL.to_string());
    let mut source = |_: &str| -> Result<Option<Roster>> { Ok(Some(roster())) };
    let mut settings = BookSettings::open(&mut persistor, 6, metadata(), &mut resolver, &mut source).expect("open");
    let before = settings.aliases().clone();
    assert!(!before.is_empty());

    let mut nothing = |_: &str| -> Result<Option<Roster>> { Ok(Some(Roster::default())) };
    let report = settings.update_aliases(&mut nothing, true).expect("update");
    assert!(report.is_unchanged(), "an empty roster must not clear the store");
    assert_eq!(settings.aliases(), &before);
}

#[test]
fn update_without_overwrite_keeps_edits() {
    let mut persistor = Persistor::new(PersistenceMode::InMemory).expect("db");
    let mut resolver = |_: &str| Some(URL.to_string());
    let mut source = |_: &str| -> Result<Option<Roster>> { Ok(Some(roster())) };
    let mut settings = BookSettings::open(&mut persistor, 5, metadata(), &mut resolver, &mut source).expect("open");
    settings.aliases_mut().set_aliases_from_text("John Smith", "Johnny, J.");

    let report = settings.update_aliases(&mut source, false).expect("update");
    assert_eq!(report.labels_added, 0);
    assert_eq!(settings.aliases().get("John Smith"), ["Johnny", "J.", "John"]);

    let report = settings.update_aliases(&mut source, true).expect("overwrite");
    assert!(report.cleared);
    assert_eq!(settings.aliases().get("John Smith"), ["John"]);
    settings.save().expect("save");
    assert_eq!(persistor.load(5).expect("load").aliases.get("John Smith"), ["John"]);
}

#[test]
fn file_mode_survives_reconnect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("books.db").to_string_lossy().into_owned();
    {
        let mut persistor = Persistor::new(PersistenceMode::File(path.clone())).expect("db");
        let mut resolver = |_: &str| Some(URL.to_string());
        let mut source = |_: &str| -> Result<Option<Roster>> { Ok(Some(roster())) };
        BookSettings::open(&mut persistor, 9, metadata(), &mut resolver, &mut source).expect("open");
    }
    let persistor = Persistor::new(PersistenceMode::File(path)).expect("reopen");
    let state = persistor.load(9).expect("load");
    assert_eq!(state.goodreads_url, URL);
    assert_eq!(state.aliases.get("Jane Smith"), ["Jane"]);
    assert!(persistor.load(10).expect("load").aliases.is_empty(), "unknown books load as defaults");
}
