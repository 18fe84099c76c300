use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A resolved contributor as shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Developer {
    pub name: String,
    pub avatar: String,
}

impl Developer {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// Maps raw contact identities (usually commit emails) to canonical names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(HashMap<String, String>);

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical identity for `raw`, or `raw` itself when unmapped.
    pub fn resolve(&self, raw: &str) -> String {
        self.0
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for AliasTable {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(raw, canonical)| (raw.into(), canonical.into()))
                .collect(),
        )
    }
}

pub fn resolve(raw: &str, table: &AliasTable) -> String {
    table.resolve(raw)
}

fn co_author_regex() -> &'static Regex {
    static CO_AUTHOR: OnceLock<Regex> = OnceLock::new();
    CO_AUTHOR.get_or_init(|| {
        Regex::new(r"Co-authored-by:.*<(.*)>").expect("co-author pattern compiles")
    })
}

/// Contact identity from the first `Co-authored-by:` trailer, or an empty string.
///
/// Only the first trailer counts; later co-authors on the same commit are ignored.
pub fn extract_co_author(message: &str) -> String {
    co_author_regex()
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|identity| identity.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_without_trailer_has_no_co_author() {
        assert_eq!(extract_co_author(""), "");
        assert_eq!(extract_co_author("Fix flaky build"), "");
        assert_eq!(extract_co_author("Fix build\n\nReviewed-by: Dan <dan@x.com>"), "");
    }

    #[test]
    fn single_trailer_yields_email() {
        let message = "Add league table\n\nCo-authored-by: Carol <carol@x.com>";
        assert_eq!(extract_co_author(message), "carol@x.com");
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert_eq!(extract_co_author("co-authored-by: Carol <carol@x.com>"), "");
        assert_eq!(extract_co_author("Co-Authored-By: Carol <carol@x.com>"), "");
    }

    #[test]
    fn only_first_trailer_is_used() {
        let message = "Pairing session\n\n\
                       Co-authored-by: Carol <carol@x.com>\n\
                       Co-authored-by: Dave <dave@x.com>";
        assert_eq!(extract_co_author(message), "carol@x.com");
    }

    #[test]
    fn trailer_must_close_on_the_same_line() {
        assert_eq!(extract_co_author("Co-authored-by: Carol\n<carol@x.com>"), "");
    }

    #[test]
    fn unmapped_identity_passes_through() {
        let table: AliasTable = [("bob@x.com", "Bob B")].into_iter().collect();
        assert_eq!(resolve("alice@x.com", &table), "alice@x.com");
        assert_eq!(resolve("", &table), "");
    }

    #[test]
    fn mapped_identity_is_replaced() {
        let table: AliasTable = [("bob@x.com", "Bob B"), ("bob@home.net", "Bob B")]
            .into_iter()
            .collect();
        assert_eq!(resolve("bob@x.com", &table), "Bob B");
        assert_eq!(resolve("bob@home.net", &table), "Bob B");
    }

    #[test]
    fn empty_table_is_identity() {
        let table = AliasTable::new();
        assert!(table.is_empty());
        assert_eq!(table.resolve("carol@x.com"), "carol@x.com");
    }
}
