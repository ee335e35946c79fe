//! Language settings for a single request.

use crate::config::Config;

/// Key-value store holding the current language and the available list.
pub trait ConfigStore {
    /// The stored current language.
    fn language(&self) -> &str;

    /// Store `language` as current and return the stored value.
    fn set_language(&mut self, language: &str) -> String;

    /// Codes of every language the application serves, in configured order.
    fn languages(&self) -> &[String];
}

/// Request-scoped settings, seeded from the process [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    language: String,
    languages: Vec<String>,
}

impl Settings {
    pub fn new(language: impl Into<String>, languages: Vec<String>) -> Self {
        Self {
            language: language.into(),
            languages,
        }
    }

    /// Fresh settings for a request: default language and configured list.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_language.clone(), config.languages.clone())
    }
}

impl ConfigStore for Settings {
    fn language(&self) -> &str {
        &self.language
    }

    fn set_language(&mut self, language: &str) -> String {
        self.language = language.to_string();
        self.language.clone()
    }

    fn languages(&self) -> &[String] {
        &self.languages
    }
}
