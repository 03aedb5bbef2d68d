//! Curated honorific lists and the classification used to pick alias formatting.
//!
//! Three lists are kept: *general*, *religious* and *double-use*. Every religious
//! and double-use honorific is also a general one, so "is this token an honorific
//! at all" is a single lookup in the general set. The narrower sets only decide
//! how a title is combined with the rest of a name once it is known to be one.

use std::collections::HashSet;
use std::fmt;
use std::hash::BuildHasherDefault;

use lazy_static::lazy_static;
use seahash::SeaHasher;

pub type AliasHasher = BuildHasherDefault<SeaHasher>;

// abbreviations are accepted both bare and with a trailing period
const ABBREVIATIONS: &str =
    "mr mrs ms esq prof dr fr rev pr atty adv hon pres gov sen ofc pvt cpl sgt maj capt cmdr lt col gen";
const LONG_FORMS: &str = "miss master sir madam lord dame lady esquire professor doctor father mother \
     brother sister reverend pastor elder rabbi sheikh attorney advocate honorable president \
     governor senator officer private corporal sargent major captain commander lieutenant colonel general";
const RELIGIOUS_ABBREVIATIONS: &str = "fr br sr rev pr";
const RELIGIOUS_LONG_FORMS: &str = "father mother brother sister reverend pastor elder rabbi sheikh";
const DOUBLE_USE: &str = "lord";

lazy_static! {
    static ref CURATED: HonorificSet = HonorificSet::curated();
}

/// How a title combines with the name it precedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Honorific {
    /// `{title} {surname}`, e.g. "Captain Doe".
    General,
    /// `{title} {christian name}`, e.g. "Father John".
    Religious,
    /// Both forms, e.g. "Lord John" and "Lord Doe".
    Double,
}

impl fmt::Display for Honorific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Honorific::General => "general",
            Honorific::Religious => "religious",
            Honorific::Double => "double",
        };
        f.write_str(name)
    }
}

type TokenSet = HashSet<String, AliasHasher>;

#[derive(Debug)]
pub struct HonorificSet {
    general: TokenSet,
    religious: TokenSet,
    double: TokenSet,
}

impl HonorificSet {
    fn curated() -> Self {
        let mut religious = TokenSet::default();
        religious.extend(with_periods(RELIGIOUS_ABBREVIATIONS));
        religious.extend(words(RELIGIOUS_LONG_FORMS));

        let mut double = TokenSet::default();
        double.extend(words(DOUBLE_USE));

        let mut general = TokenSet::default();
        general.extend(with_periods(ABBREVIATIONS));
        general.extend(words(LONG_FORMS));
        general.extend(religious.iter().cloned());
        general.extend(double.iter().cloned());

        Self { general, religious, double }
    }

    /// The process-wide curated set, built on first use and never mutated.
    pub fn global() -> &'static HonorificSet {
        &CURATED
    }

    pub fn is_honorific(&self, token: &str) -> bool {
        self.general.contains(&token.to_lowercase())
    }

    pub fn classify(&self, token: &str) -> Option<Honorific> {
        let token = token.to_lowercase();
        if !self.general.contains(&token) {
            None
        } else if self.religious.contains(&token) {
            Some(Honorific::Religious)
        } else if self.double.contains(&token) {
            Some(Honorific::Double)
        } else {
            Some(Honorific::General)
        }
    }

    /// Formatting policy for a whole title, which may span several tokens.
    /// Only single-token religious or double-use titles get special treatment;
    /// anything else, including "Lt. Col.", is general.
    pub fn title_policy(&self, title: &str) -> Honorific {
        let title = title.to_lowercase();
        if self.religious.contains(&title) {
            Honorific::Religious
        } else if self.double.contains(&title) {
            Honorific::Double
        } else {
            Honorific::General
        }
    }

    pub fn len(&self) -> usize {
        self.general.len()
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_empty()
    }
}

fn words(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split_whitespace().map(str::to_owned)
}

fn with_periods(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split_whitespace()
        .flat_map(|w| [w.to_owned(), format!("{w}.")])
}

/// Classify a single token against the curated lists.
pub fn classify(token: &str) -> Option<Honorific> {
    HonorificSet::global().classify(token)
}

pub fn is_honorific(token: &str) -> bool {
    HonorificSet::global().is_honorific(token)
}
