//! Language-keyed terms.
//!
//! Lists are keyed by language code, so a language appears at most once per
//! list. Iteration is in ascending language-code order, which is also the
//! order of the JSON maps the lists serialize to.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A text in a given language.
///
/// Stores index terms under `<field>.<language>`, so term lookups reject
/// language codes containing `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub language: String,
    #[serde(rename = "value")]
    pub text: String,
}

impl Term {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

/// At most one [`Term`] per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Term>", into = "BTreeMap<String, Term>")]
pub struct TermList(BTreeMap<String, Term>);

impl TermList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the term for its language, replacing any previous one.
    pub fn set(&mut self, term: Term) {
        self.0.insert(term.language.clone(), term);
    }

    pub fn get(&self, language: &str) -> Option<&Term> {
        self.0.get(language)
    }

    pub fn remove(&mut self, language: &str) -> Option<Term> {
        self.0.remove(language)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.0.values()
    }

    /// Returns the subset of this list whose languages are in `languages`.
    #[must_use]
    pub fn with_languages(&self, languages: &[String]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(language, _)| languages.contains(language))
                .map(|(language, term)| (language.clone(), term.clone()))
                .collect(),
        )
    }
}

impl FromIterator<Term> for TermList {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut list = Self::new();
        for term in iter {
            list.set(term);
        }
        list
    }
}

impl TryFrom<BTreeMap<String, Term>> for TermList {
    type Error = ModelError;

    fn try_from(map: BTreeMap<String, Term>) -> Result<Self, Self::Error> {
        if let Some((key, term)) = map.iter().find(|(key, term)| **key != term.language) {
            return Err(ModelError::Deserialization(format!(
                "term keyed {key:?} has language {:?}",
                term.language
            )));
        }
        Ok(Self(map))
    }
}

impl From<TermList> for BTreeMap<String, Term> {
    fn from(list: TermList) -> Self {
        list.0
    }
}

/// The ordered aliases of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    pub language: String,
    pub aliases: Vec<String>,
}

impl AliasGroup {
    pub fn new(language: impl Into<String>, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            language: language.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// At most one [`AliasGroup`] per language. Empty groups are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<Term>>", into = "BTreeMap<String, Vec<Term>>")]
pub struct AliasGroupList(BTreeMap<String, AliasGroup>);

impl AliasGroupList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the group for its language, replacing any previous one.
    pub fn set(&mut self, group: AliasGroup) {
        if group.is_empty() {
            self.0.remove(&group.language);
        } else {
            self.0.insert(group.language.clone(), group);
        }
    }

    pub fn get(&self, language: &str) -> Option<&AliasGroup> {
        self.0.get(language)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasGroup> {
        self.0.values()
    }

    /// Returns the subset of this list whose languages are in `languages`.
    #[must_use]
    pub fn with_languages(&self, languages: &[String]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(language, _)| languages.contains(language))
                .map(|(language, group)| (language.clone(), group.clone()))
                .collect(),
        )
    }
}

impl FromIterator<AliasGroup> for AliasGroupList {
    fn from_iter<I: IntoIterator<Item = AliasGroup>>(iter: I) -> Self {
        let mut list = Self::new();
        for group in iter {
            list.set(group);
        }
        list
    }
}

impl TryFrom<BTreeMap<String, Vec<Term>>> for AliasGroupList {
    type Error = ModelError;

    fn try_from(map: BTreeMap<String, Vec<Term>>) -> Result<Self, Self::Error> {
        let mut list = Self::new();
        for (language, terms) in map {
            let mut aliases = Vec::with_capacity(terms.len());
            for term in terms {
                if term.language != language {
                    return Err(ModelError::Deserialization(format!(
                        "alias keyed {language:?} has language {:?}",
                        term.language
                    )));
                }
                aliases.push(term.text);
            }
            list.set(AliasGroup { language, aliases });
        }
        Ok(list)
    }
}

impl From<AliasGroupList> for BTreeMap<String, Vec<Term>> {
    fn from(list: AliasGroupList) -> Self {
        list.0
            .into_iter()
            .map(|(language, group)| {
                let terms = group
                    .aliases
                    .into_iter()
                    .map(|alias| Term::new(language.clone(), alias))
                    .collect();
                (language, terms)
            })
            .collect()
    }
}
