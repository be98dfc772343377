use crate::{AliasGroup, AliasGroupList, Term, TermList};
use serde::{Deserialize, Serialize};

/// Labels, descriptions and aliases of an entity, per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    #[serde(default)]
    pub labels: TermList,
    #[serde(default)]
    pub descriptions: TermList,
    #[serde(default)]
    pub aliases: AliasGroupList,
}

impl Fingerprint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_label(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.labels.set(Term::new(language, text));
    }

    pub fn set_description(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.descriptions.set(Term::new(language, text));
    }

    pub fn set_aliases(
        &mut self,
        language: impl Into<String>,
        aliases: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.aliases.set(AliasGroup::new(language, aliases));
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.descriptions.is_empty() && self.aliases.is_empty()
    }

    /// Returns a copy restricted to `languages` in every section.
    #[must_use]
    pub fn with_languages(&self, languages: &[String]) -> Self {
        Self {
            labels: self.labels.with_languages(languages),
            descriptions: self.descriptions.with_languages(languages),
            aliases: self.aliases.with_languages(languages),
        }
    }
}
