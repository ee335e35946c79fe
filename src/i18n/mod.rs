//! Internationalization (i18n) module: the localization facade and the
//! collaborators it is built from.
//!
//! # Architecture
//!
//! - `localizer`: The per-request facade (current language, translation,
//!   language URLs, locale activation, eager-load specs)
//! - `catalog`: Translation catalogs and the JSON-on-disk implementation
//! - `url`: Request URL access and language path-segment helpers
//! - `settings`: Stored current language and the available-language list
//! - `sections`: Named template slots
//! - `locale`: Platform locale activation
//! - `registry`: Static language metadata and locale alias lists
//! - `eager`: Language-scoped eager-load relationship specs
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Localizer, RequestUrl, Settings, Sections};
//!
//! let url = RequestUrl::new("/app", "/app/fr/page");
//! let mut localizer = Localizer::new(&catalog, &url, &mut settings, &mut sections, &locales);
//! assert_eq!(localizer.current(), "fr");
//! ```

mod catalog;
mod eager;
mod locale;
mod localizer;
mod registry;
mod sections;
mod settings;
pub mod url;

pub use catalog::{CatalogError, Entry, JsonCatalog, TranslationCatalog};
pub use eager::{LanguageConstraint, QueryBuilder, Relationship, RelationshipLoader, LANGUAGE_COLUMN};
pub use locale::{InstalledLocales, LocaleSetter};
pub use localizer::{LanguageLink, Localizer, TITLE_SECTION};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use sections::{SectionInjector, Sections};
pub use settings::{ConfigStore, Settings};
pub use url::{RequestUrl, UrlInspector};
