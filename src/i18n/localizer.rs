//! The localization facade used by handlers and templates.
//!
//! A [`Localizer`] is built per request from explicitly injected
//! collaborators. It never fails: unknown keys, invalid languages and
//! unsupported locales all degrade to something renderable.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut localizer = Localizer::new(&catalog, &url, &mut settings, &mut sections, &locales);
//!
//! let language = localizer.current();
//! let label = localizer.translate("email", None);
//! let german = localizer.to("de", false);
//! ```

use crate::i18n::catalog::{Entry, TranslationCatalog};
use crate::i18n::eager::Relationship;
use crate::i18n::locale::LocaleSetter;
use crate::i18n::registry::LanguageRegistry;
use crate::i18n::sections::SectionInjector;
use crate::i18n::settings::ConfigStore;
use crate::i18n::url::{self, UrlInspector};
use serde::Serialize;
use tracing::{debug, warn};

/// Section receiving the page title.
pub const TITLE_SECTION: &str = "title";

/// Namespace searched when a key has no translation of its own.
const ATTRIBUTES_NAMESPACE: &str = "validation.attributes";

/// Entry of a language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub url: String,
    pub active: bool,
}

pub struct Localizer<'r> {
    catalog: &'r dyn TranslationCatalog,
    url: &'r dyn UrlInspector,
    settings: &'r mut dyn ConfigStore,
    sections: &'r mut dyn SectionInjector,
    locales: &'r dyn LocaleSetter,
}

impl<'r> Localizer<'r> {
    pub fn new(
        catalog: &'r dyn TranslationCatalog,
        url: &'r dyn UrlInspector,
        settings: &'r mut dyn ConfigStore,
        sections: &'r mut dyn SectionInjector,
        locales: &'r dyn LocaleSetter,
    ) -> Self {
        Self {
            catalog,
            url,
            settings,
            sections,
            locales,
        }
    }

    /// Translate `title` and inject it into the title section.
    ///
    /// A key without a displayable translation is injected as-is.
    pub fn title(&mut self, title: &str) {
        let language = self.current();
        let text = self.catalog.get_or(&language, title, title);
        self.sections.inject(TITLE_SECTION, &text);
    }

    /// Translate `key` for the current language.
    ///
    /// Lookup order: `key`, then `validation.attributes.<key>`. When neither
    /// yields text, `fallback` is used, or `key` itself if the fallback is
    /// missing or empty. The first letter of the result is upper-cased.
    pub fn translate(&mut self, key: &str, fallback: Option<&str>) -> String {
        let language = self.current();
        let found = self.catalog.get(&language, key).or_else(|| {
            self.catalog
                .get(&language, &format!("{}.{}", ATTRIBUTES_NAMESPACE, key))
        });

        let text = match found {
            Some(Entry::Text(text)) => text,
            Some(Entry::Group) | None => fallback
                .filter(|f| !f.is_empty())
                .unwrap_or(key)
                .to_string(),
        };
        upper_first(&text)
    }

    /// Whether `language` is the current language.
    pub fn is_active(&mut self, language: &str) -> bool {
        language == self.current()
    }

    /// Language of the current request.
    ///
    /// Derived from the first path segment after the base. A derived value
    /// that differs from the stored language is written back through
    /// [`set`](Self::set), so reading the current language may update the
    /// settings. Values that are not exactly two characters long fall back to
    /// the stored language.
    pub fn current(&mut self) -> String {
        let request = self.url;
        let path = url::relative_path(request.base(), request.current());
        let derived = url::language_candidate(path).to_string();

        if !derived.is_empty() && derived != self.settings.language() {
            match self.set(&derived) {
                Some(language) => debug!(%language, "Stored language taken from URL"),
                None => debug!(candidate = %derived, "URL segment is not an available language"),
            }
        }

        if derived.chars().count() == 2 {
            derived
        } else {
            self.settings.language().to_string()
        }
    }

    /// Store `language` as current if it is available.
    ///
    /// # Returns
    /// * `Some(language)` as written to the settings
    /// * `None` if the language is not available; nothing is written
    pub fn set(&mut self, language: &str) -> Option<String> {
        if self.valid(language) {
            Some(self.settings.set_language(language))
        } else {
            None
        }
    }

    /// Configured language codes, verbatim.
    pub fn available(&self) -> &[String] {
        self.settings.languages()
    }

    /// Whether `language` is one of the available languages.
    pub fn valid(&self, language: &str) -> bool {
        self.available().iter().any(|code| code == language)
    }

    /// URL of the current page in `lang`.
    ///
    /// With `reset`, the language root (`<base>/<lang>`) is returned instead.
    /// An unavailable `lang` is replaced by the current language. A leading
    /// segment that is an available language or looks like one is replaced.
    pub fn to(&mut self, lang: &str, reset: bool) -> String {
        let request = self.url;
        let base = url::trimmed_base(request.base());
        if reset {
            return format!("{}/{}", base, lang);
        }

        let lang = if self.valid(lang) {
            lang.to_string()
        } else {
            self.current()
        };

        let localized_base = format!("{}/{}/", base, lang);
        let path = url::relative_path(request.base(), request.current());
        let (segment, rest) = url::split_first_segment(path);
        let replaced = self.valid(segment) || url::language_segment(path).is_some();
        let rest = if replaced { rest } else { path };

        format!("{}{}", localized_base, rest)
    }

    /// Activate the platform locale for `language` (the current language if
    /// `None`).
    ///
    /// # Returns
    /// The active locale identifier, or `None` if the host supports none of
    /// the language's aliases.
    pub fn locale(&mut self, language: Option<&str>) -> Option<String> {
        let language = match language {
            Some(language) => language.to_string(),
            None => self.current(),
        };

        let aliases = LanguageRegistry::get().aliases_for(&language);
        let active = self.locales.set_locale(aliases);
        if active.is_none() {
            warn!(%language, "No locale alias is supported by the host");
        }
        active
    }

    /// Eager-load spec with `lang` relationships bound to the current
    /// language.
    pub fn eager(&mut self, relationships: &[&str]) -> Vec<Relationship> {
        let language = self.current();
        relationships
            .iter()
            .map(|name| Relationship::for_language(name, &language))
            .collect()
    }

    /// Switcher entries for every available language.
    pub fn links(&mut self) -> Vec<LanguageLink> {
        let current = self.current();
        let registry = LanguageRegistry::get();

        self.available()
            .to_vec()
            .into_iter()
            .map(|code| {
                let (name, native_name) = match registry.get_by_code(&code) {
                    Some(config) => (config.name.to_string(), config.native_name.to_string()),
                    None => (code.clone(), code.clone()),
                };
                LanguageLink {
                    url: self.to(&code, false),
                    active: code == current,
                    code,
                    name,
                    native_name,
                }
            })
            .collect()
    }
}

/// Upper-case the first character, leaving the rest untouched.
fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::catalog::JsonCatalog;
    use crate::i18n::locale::InstalledLocales;
    use crate::i18n::sections::Sections;
    use crate::i18n::settings::Settings;
    use crate::i18n::url::RequestUrl;
    use serde_json::json;

    struct Fixture {
        catalog: JsonCatalog,
        url: RequestUrl,
        settings: Settings,
        sections: Sections,
        locales: InstalledLocales,
    }

    impl Fixture {
        fn new(current: &str) -> Self {
            Self {
                catalog: JsonCatalog::new()
                    .with_language(
                        "en",
                        json!({
                            "home": { "title": "welcome", "menu": { "a": "b" } },
                            "validation": { "attributes": { "email": "e-mail address" } }
                        }),
                    )
                    .with_language(
                        "fr",
                        json!({
                            "home": { "title": "bienvenue" },
                            "validation": { "attributes": { "email": "adresse e-mail" } }
                        }),
                    ),
                url: RequestUrl::new("/app", current),
                settings: Settings::new(
                    "en",
                    vec!["en".to_string(), "fr".to_string(), "de".to_string()],
                ),
                sections: Sections::new(),
                locales: InstalledLocales::new(["de_DE", "en_US.utf8", "C"]),
            }
        }

        fn localizer(&mut self) -> Localizer<'_> {
            Localizer::new(
                &self.catalog,
                &self.url,
                &mut self.settings,
                &mut self.sections,
                &self.locales,
            )
        }
    }

    // ==================== upper_first Tests ====================

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("hello world"), "Hello world");
        assert_eq!(upper_first("Hello"), "Hello");
        assert_eq!(upper_first("élan"), "Élan");
        assert_eq!(upper_first(""), "");
    }

    // ==================== set / valid / available Tests ====================

    #[test]
    fn test_available_verbatim() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().available(), &["en", "fr", "de"]);
    }

    #[test]
    fn test_set_valid_language() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().set("fr"), Some("fr".to_string()));
        assert_eq!(fx.settings.language(), "fr");
    }

    #[test]
    fn test_set_invalid_language_does_not_write() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().set("xx"), None);
        assert_eq!(fx.settings.language(), "en");
    }

    #[test]
    fn test_valid() {
        let mut fx = Fixture::new("/app");
        let localizer = fx.localizer();
        assert!(localizer.valid("de"));
        assert!(!localizer.valid("it"));
        assert!(!localizer.valid(""));
    }

    // ==================== current Tests ====================

    #[test]
    fn test_current_from_url() {
        let mut fx = Fixture::new("/app/fr/page");
        assert_eq!(fx.localizer().current(), "fr");
        assert_eq!(fx.settings.language(), "fr");
    }

    #[test]
    fn test_current_non_language_segment_falls_back() {
        let mut fx = Fixture::new("/app/xyz/page");
        assert_eq!(fx.localizer().current(), "en");
        assert_eq!(fx.settings.language(), "en");
    }

    #[test]
    fn test_current_at_base_uses_stored_language() {
        let mut fx = Fixture::new("/app");
        fx.settings.set_language("de");
        assert_eq!(fx.localizer().current(), "de");
    }

    #[test]
    fn test_current_unavailable_two_letter_segment_is_returned_unstored() {
        let mut fx = Fixture::new("/app/it/page");
        assert_eq!(fx.localizer().current(), "it");
        assert_eq!(fx.settings.language(), "en");
    }

    #[test]
    fn test_current_two_character_remainder_without_letters() {
        let mut fx = Fixture::new("/app/a1");
        assert_eq!(fx.localizer().current(), "a1");
    }

    #[test]
    fn test_is_active() {
        let mut fx = Fixture::new("/app/fr");
        let mut localizer = fx.localizer();
        assert!(localizer.is_active("fr"));
        assert!(!localizer.is_active("en"));
    }

    // ==================== translate Tests ====================

    #[test]
    fn test_translate_found() {
        let mut fx = Fixture::new("/app/fr/page");
        assert_eq!(fx.localizer().translate("home.title", None), "Bienvenue");
    }

    #[test]
    fn test_translate_attribute_namespace() {
        let mut fx = Fixture::new("/app/fr");
        assert_eq!(fx.localizer().translate("email", None), "Adresse e-mail");
    }

    #[test]
    fn test_translate_missing_uses_key() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().translate("unknown key", None), "Unknown key");
    }

    #[test]
    fn test_translate_missing_uses_fallback() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().translate("nope", Some("fallback")), "Fallback");
        assert_eq!(fx.localizer().translate("nope", Some("Fallback")), "Fallback");
    }

    #[test]
    fn test_translate_empty_fallback_uses_key() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().translate("nope", Some("")), "Nope");
    }

    #[test]
    fn test_translate_group_uses_fallback() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().translate("home.menu", Some("menu")), "Menu");
        assert_eq!(fx.localizer().translate("home", None), "Home");
    }

    // ==================== title Tests ====================

    #[test]
    fn test_title_injects_translation() {
        let mut fx = Fixture::new("/app/fr");
        fx.localizer().title("home.title");
        assert_eq!(fx.sections.get(TITLE_SECTION), Some("bienvenue"));
    }

    #[test]
    fn test_title_missing_injects_key() {
        let mut fx = Fixture::new("/app");
        fx.localizer().title("about.title");
        assert_eq!(fx.sections.get(TITLE_SECTION), Some("about.title"));
    }

    // ==================== to Tests ====================

    #[test]
    fn test_to_reset() {
        let mut fx = Fixture::new("/app/de/some/page");
        assert_eq!(fx.localizer().to("fr", true), "/app/fr");
    }

    #[test]
    fn test_to_inserts_language() {
        let mut fx = Fixture::new("/app/page/2");
        assert_eq!(fx.localizer().to("fr", false), "/app/fr/page/2");
    }

    #[test]
    fn test_to_replaces_language() {
        let mut fx = Fixture::new("/app/fr/page");
        assert_eq!(fx.localizer().to("de", false), "/app/de/page");
    }

    #[test]
    fn test_to_at_base() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().to("de", false), "/app/de/");
    }

    #[test]
    fn test_to_keeps_query() {
        let mut fx = Fixture::new("/app/fr?page=2");
        assert_eq!(fx.localizer().to("de", false), "/app/de/?page=2");
    }

    #[test]
    fn test_to_invalid_uses_current() {
        let mut fx = Fixture::new("/app/fr/page");
        let mut localizer = fx.localizer();
        let current = localizer.current();
        assert_eq!(localizer.to("xx", false), localizer.to(&current, false));
        assert_eq!(localizer.to("xx", false), "/app/fr/page");
    }

    #[test]
    fn test_to_replaces_unavailable_language_segment() {
        let mut fx = Fixture::new("/app/it/page");
        let mut localizer = fx.localizer();
        assert_eq!(localizer.to("xx", false), "/app/it/page");
        assert_eq!(localizer.to("de", false), "/app/de/page");
    }

    #[test]
    fn test_links_on_unavailable_language_page() {
        let mut fx = Fixture::new("/app/it/page");
        let links = fx.localizer().links();
        assert_eq!(links[0].url, "/app/en/page");
        assert!(links.iter().all(|link| !link.active));
    }

    #[test]
    fn test_url_sharing_base_prefix_is_outside_base() {
        let mut fx = Fixture::new("/apple/x");
        assert_eq!(fx.localizer().current(), "en");

        let mut fx = Fixture::new("/appfr");
        let mut localizer = fx.localizer();
        assert_eq!(localizer.current(), "en");
        assert_eq!(localizer.to("de", false), "/app/de/appfr");
        drop(localizer);
        assert_eq!(fx.settings.language(), "en");
    }

    #[test]
    fn test_upper_case_segment_is_not_a_language() {
        let mut fx = Fixture::new("/app/FR/page");
        assert_eq!(fx.localizer().current(), "en");
        assert_eq!(fx.settings.language(), "en");
    }

    // ==================== locale Tests ====================

    #[test]
    fn test_locale_german() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().locale(Some("de")).as_deref(), Some("de_DE"));
        assert_eq!(fx.locales.active().as_deref(), Some("de_DE"));
    }

    #[test]
    fn test_locale_unknown_uses_english_aliases() {
        let mut fx = Fixture::new("/app");
        assert_eq!(
            fx.localizer().locale(Some("xx")).as_deref(),
            Some("en_US.UTF8")
        );
    }

    #[test]
    fn test_locale_defaults_to_current() {
        let mut fx = Fixture::new("/app/de/page");
        assert_eq!(fx.localizer().locale(None).as_deref(), Some("de_DE"));
    }

    #[test]
    fn test_locale_unsupported() {
        let mut fx = Fixture::new("/app");
        assert_eq!(fx.localizer().locale(Some("zh")), None);
    }

    // ==================== eager Tests ====================

    #[test]
    fn test_eager_binds_current_language() {
        let mut fx = Fixture::new("/app/fr/posts");
        let spec = fx.localizer().eager(&["posts", "lang.posts"]);
        assert_eq!(spec[0], Relationship::Plain("posts".to_string()));
        assert_eq!(spec[1].name(), "lang.posts");
        assert_eq!(spec[1].constraint().unwrap().language, "fr");
    }

    #[test]
    fn test_eager_empty() {
        let mut fx = Fixture::new("/app");
        assert!(fx.localizer().eager(&[]).is_empty());
    }

    // ==================== links Tests ====================

    #[test]
    fn test_links() {
        let mut fx = Fixture::new("/app/fr/page");
        let links = fx.localizer().links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].code, "en");
        assert_eq!(links[0].url, "/app/en/page");
        assert!(!links[0].active);
        assert!(links[1].active);
        assert_eq!(links[2].native_name, "Deutsch");
    }
}
