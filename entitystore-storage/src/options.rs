use serde::{Deserialize, Serialize};

/// Options captured when a store is built.
///
/// Configuration builders deserialize this from whatever file they load;
/// every field has a default so partial configurations are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityStoreOptions {
    /// Language allow-list. When set, only these languages of labels,
    /// descriptions and aliases are persisted and indexed. Codes must be
    /// non-empty and free of `.`, which separates document paths.
    pub languages: Option<Vec<String>>,
}

impl EntityStoreOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts persisted terms to `languages`.
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn languages(&self) -> Option<&[String]> {
        self.languages.as_deref()
    }
}
