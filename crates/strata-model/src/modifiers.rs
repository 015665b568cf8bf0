//! Modifier keys: the tag sets that scope settings and dependencies.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A set of modifier tokens such as `{ios, debug}`.
///
/// Written as `+`-joined tokens (`"ios+debug"`); the empty string is the
/// unscoped key that applies to every fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Modifiers(BTreeSet<String>);

impl Modifiers {
    /// The unscoped key.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a key from individual tokens.
    pub fn of<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Copy of this key with one more token.
    pub fn with(&self, token: &str) -> Self {
        let mut tokens = self.0.clone();
        tokens.insert(token.to_string());
        Self(tokens)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every token of this key is contained in `tags`.
    pub fn is_subset_of(&self, tags: &BTreeSet<String>) -> bool {
        self.0.is_subset(tags)
    }
}

/// Entries whose key is a subset of `tags`, least specific first.
///
/// Keys of equal size keep their declaration order.
pub fn applicable<'e, T>(entries: &'e [(Modifiers, T)], tags: &BTreeSet<String>) -> Vec<&'e (Modifiers, T)> {
    let mut matching: Vec<_> = entries
        .iter()
        .filter(|(key, _)| key.is_subset_of(tags))
        .collect();
    matching.sort_by_key(|(key, _)| key.len());
    matching
}

impl TryFrom<String> for Modifiers {
    type Error = ModelError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        if key.is_empty() {
            return Ok(Self::empty());
        }
        let mut tokens = BTreeSet::new();
        for token in key.split('+') {
            let token = token.trim();
            if token.is_empty() {
                return Err(ModelError::EmptyModifierToken { key });
            }
            tokens.insert(token.to_string());
        }
        Ok(Self(tokens))
    }
}

impl From<Modifiers> for String {
    fn from(modifiers: Modifiers) -> Self {
        modifiers.to_string()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(String::as_str).collect::<Vec<_>>().join("+");
        f.write_str(&joined)
    }
}
