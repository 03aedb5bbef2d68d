//! Resolving a book to its canonical page from a title and author query.
//!
//! The network itself stays behind [`SearchTransport`]; this module only owns the
//! retry policy (one primary attempt, one fallback route) and the reading of the
//! search results page.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::error::Result;

pub const GOODREADS_BASE: &str = "https://www.goodreads.com";
const NO_RESULTS: &str = "No results";

lazy_static! {
    static ref BOOK_HREF: Regex = Regex::new(r#"href="(/book/show/.+?)""#).unwrap();
}

/// Turns a query into a canonical url, or `None` when the book could not be found.
pub trait IdentityResolver {
    fn resolve(&mut self, query: &str) -> Option<String>;
}

impl<F> IdentityResolver for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn resolve(&mut self, query: &str) -> Option<String> {
        self(query)
    }
}

/// Performs a raw search request and returns the response body.
pub trait SearchTransport {
    fn search(&mut self, keywords: &str) -> Result<String>;
}

impl<T: SearchTransport + ?Sized> SearchTransport for &mut T {
    fn search(&mut self, keywords: &str) -> Result<String> {
        (**self).search(keywords)
    }
}

/// Resolver trying a primary connection and, if that fails, one fallback route.
pub struct SearchResolver<P, F> {
    primary: P,
    fallback: F,
}

impl<P: SearchTransport, F: SearchTransport> SearchResolver<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    fn fetch(&mut self, query: &str) -> Option<String> {
        match self.primary.search(query) {
            Ok(body) => Some(body),
            Err(first) => {
                warn!(error = %first, "search failed, retrying through fallback route");
                match self.fallback.search(query) {
                    Ok(body) => Some(body),
                    Err(second) => {
                        warn!(error = %second, "search failed on fallback route");
                        None
                    }
                }
            }
        }
    }
}

impl<P: SearchTransport, F: SearchTransport> IdentityResolver for SearchResolver<P, F> {
    fn resolve(&mut self, query: &str) -> Option<String> {
        let body = self.fetch(query)?;
        let url = parse_search_response(&body);
        match &url {
            Some(url) => info!(%query, %url, "book resolved"),
            None => info!(%query, "no matching book"),
        }
        url
    }
}

/// Pick the first book link from a search results page.
pub fn parse_search_response(body: &str) -> Option<String> {
    if body.contains(NO_RESULTS) {
        return None;
    }
    BOOK_HREF
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|path| format!("{}{}", GOODREADS_BASE, path.as_str()))
}

/// The query used to search for a book, e.g. `"Dune - Frank Herbert"`.
pub fn title_and_author<S: AsRef<str>>(title: &str, authors: &[S]) -> String {
    let authors: Vec<&str> = authors.iter().map(AsRef::as_ref).collect();
    format!("{} - {}", title, authors.join(" & "))
}
