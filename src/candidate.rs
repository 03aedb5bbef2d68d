//! Turning one full name into the ordered list of names a narrative may use for it.
//!
//! A full name is read as `{Title} ChristianName {Middle Names} Surname`, split on
//! whitespace only. Leading honorifics are consumed greedily into the title, so
//! "Lt. Col. James Rhodes" has the title "Lt. Col.". Candidates come out in the
//! order they should be matched: title forms first, then the christian name, the
//! surname and finally "ChristianName Surname". Nothing is deduplicated here,
//! that is the job of the roster deduplicator.

use crate::honorific::{Honorific, HonorificSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub title: Option<String>,
    pub christian_name: String,
    pub middle_names: Vec<String>,
    pub surname: String,
}

impl NameParts {
    /// Only names with at least two tokens after the title have parts.
    pub fn parse(full_name: &str) -> Option<NameParts> {
        let (title, rest) = split_title(full_name);
        Self::from_split(title, rest)
    }

    fn from_split(title: Option<String>, mut rest: Vec<&str>) -> Option<NameParts> {
        if rest.len() < 2 {
            return None;
        }
        // double barrel surnames are only kept together when hyphenated
        let surname = rest.pop()?.to_owned();
        let christian_name = rest.remove(0).to_owned();
        Some(NameParts {
            title,
            christian_name,
            middle_names: rest.into_iter().map(str::to_owned).collect(),
            surname,
        })
    }

    pub fn candidates(&self, honorifics: &HonorificSet) -> Vec<String> {
        let mut aliases = Vec::with_capacity(5);
        if let Some(title) = &self.title {
            match honorifics.title_policy(title) {
                // Father John, but usually not Father Doe
                Honorific::Religious => {
                    aliases.push(format!("{} {}", title, self.christian_name));
                }
                // Lord John or Lord Doe
                Honorific::Double => {
                    aliases.push(format!("{} {}", title, self.christian_name));
                    aliases.push(format!("{} {}", title, self.surname));
                }
                // Captain Doe, but usually not Captain John
                Honorific::General => {
                    aliases.push(format!("{} {}", title, self.surname));
                }
            }
        }
        aliases.push(self.christian_name.clone());
        aliases.push(self.surname.clone());
        aliases.push(format!("{} {}", self.christian_name, self.surname));
        aliases
    }
}

/// Split leading honorifics off a full name. Returns the title (tokens joined by
/// single spaces) and the remaining tokens in their original casing.
pub fn split_title(full_name: &str) -> (Option<String>, Vec<&str>) {
    split_title_with(HonorificSet::global(), full_name)
}

fn split_title_with<'n>(honorifics: &HonorificSet, full_name: &'n str) -> (Option<String>, Vec<&'n str>) {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    let title_len = parts
        .iter()
        .take_while(|token| honorifics.is_honorific(token))
        .count();
    if title_len == 0 {
        return (None, parts);
    }
    let title = parts[..title_len].join(" ");
    (Some(title), parts[title_len..].to_vec())
}

/// Candidate aliases for `full_name`, highest confidence first.
pub fn generate(full_name: &str) -> Vec<String> {
    let honorifics = HonorificSet::global();
    let (title, rest) = split_title_with(honorifics, full_name);
    if rest.len() >= 2 {
        return NameParts::from_split(title, rest)
            .map(|parts| parts.candidates(honorifics))
            .unwrap_or_default();
    }
    match (title, rest.first()) {
        // odd, but "Lord Buttsworth" can still be called "Buttsworth"
        (Some(_), Some(name)) => vec![(*name).to_owned()],
        // a lone name needs no alias, a lone title has nothing to alias
        _ => Vec::new(),
    }
}
