//! xray-aliases – alternate name forms for the characters and settings of a book.
//!
//! Annotation tooling needs to recognise a character under every name the
//! narrative uses: "Mr. Doe", "John", "John Doe". This crate derives those
//! aliases from a canonical full name and removes every alias that would be
//! ambiguous between two different people or places of the same book.
//!
//! ## Modules
//! * [`honorific`] – Curated honorific lists (general, religious, double-use).
//! * [`candidate`] – Splitting a full name into title / given name / surname and
//!   generating the ordered candidate aliases.
//! * [`dedup`] – Two-pass reconciliation of candidates across a whole roster.
//! * [`store`] – The per-book label → aliases mapping and its merge rules.
//! * [`roster`] – Roster records as delivered by a roster source, and the
//!   roster pass gluing generation, reconciliation and merging together.
//! * [`resolve`] – Resolving a book to its canonical url (primary + fallback).
//! * [`persist`] – SQLite persistence of per-book state.
//! * [`book`] – Opening and updating the alias state of one book.
//! * [`settings`] – Process configuration.
//! * [`server`] – A small HTTP surface over generation and reconciliation.
//!
//! ## Quick Start
//! ```
//! use xray_aliases::candidate::generate;
//! use xray_aliases::dedup::reconcile;
//! assert_eq!(generate("Mr. John Doe"), vec!["Mr. Doe", "John", "Doe", "John Doe"]);
//! let reconciled = reconcile(&["John Smith", "Jane Smith"]);
//! assert!(reconciled.owner_of("Smith").is_none());
//! assert_eq!(reconciled.owner_of("John"), Some("John Smith"));
//! ```
//!
//! ## Processing model
//! Everything is synchronous and single-threaded per book. Concurrent hosts
//! should give every book its own [`store::AliasStore`] and roster pass.

pub mod book;
pub mod candidate;
pub mod dedup;
pub mod error;
pub mod honorific;
pub mod persist;
pub mod resolve;
pub mod roster;
pub mod server;
pub mod settings;
pub mod store;

pub use error::{AliasError, Result};
