//! Language registry: static metadata for the languages the host knows about.
//!
//! The registry is independent of which languages an application enables
//! (that list lives in [`ConfigStore`](crate::i18n::ConfigStore)). It maps a
//! language code to display names and to the ordered list of platform locale
//! identifiers handed to the locale-setting facility.

use std::sync::OnceLock;

/// Metadata for a language known to the registry.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "de")
    pub code: &'static str,

    /// English name of the language (e.g., "German")
    pub name: &'static str,

    /// Native name of the language (e.g., "Deutsch")
    pub native_name: &'static str,

    /// Platform locale identifiers, most specific first
    pub aliases: &'static [&'static str],
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Code of the entry used when a lookup misses
const FALLBACK_CODE: &str = "en";

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry instance, initializing it on first access.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language is in the table
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// The entry used for codes the table does not know (English).
    pub fn fallback(&self) -> &LanguageConfig {
        self.get_by_code(FALLBACK_CODE)
            .unwrap_or(&self.languages[0])
    }

    /// Locale alias list for a language, falling back to the English list
    /// for unknown codes.
    pub fn aliases_for(&self, code: &str) -> &'static [&'static str] {
        self.get_by_code(code)
            .unwrap_or_else(|| self.fallback())
            .aliases
    }

    /// All registered languages, in table order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            aliases: &["de_DE.UTF8", "de_DE@euro", "de_DE", "de", "ge"],
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            aliases: &["fr_FR.UTF8", "fr_FR@euro", "fr_FR", "fr"],
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            aliases: &["es_ES.UTF8", "es_ES@euro", "es_ES", "es"],
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            aliases: &["it_IT.UTF8", "it_IT@euro", "it_IT", "it"],
        },
        LanguageConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            aliases: &["pt_PT.UTF8", "pt_PT@euro", "pt_PT", "pt"],
        },
        LanguageConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            aliases: &["zh_CN.UTF8", "zh_CN", "zh"],
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            aliases: &["en_US.UTF8", "en_US", "en_GB.UTF8", "en_GB", "en"],
        },
    ]
}
