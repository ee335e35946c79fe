//! Language-scoped eager-load relationship specs.
//!
//! The facade does not talk to a database. It produces an ordered list of
//! [`Relationship`]s which an ORM adapter implementing
//! [`RelationshipLoader`] turns into its own eager-load call.

use serde::Serialize;

/// Column filtered by [`LanguageConstraint`].
pub const LANGUAGE_COLUMN: &str = "language";

/// Minimal query-builder surface a constraint needs.
pub trait QueryBuilder {
    fn where_eq(&mut self, column: &str, value: &str);
}

/// Restricts a related query to rows in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageConstraint {
    pub column: &'static str,
    pub language: String,
}

impl LanguageConstraint {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            column: LANGUAGE_COLUMN,
            language: language.into(),
        }
    }

    /// Add the language filter to `query`.
    pub fn apply(&self, query: &mut dyn QueryBuilder) {
        query.where_eq(self.column, &self.language);
    }
}

/// One entry of an eager-load spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Relationship {
    /// Loaded as-is
    Plain(String),
    /// Loaded with its query constrained to a language
    Localized {
        name: String,
        constraint: LanguageConstraint,
    },
}

impl Relationship {
    /// Build the entry for `name`: relationships whose name contains
    /// `"lang"` are constrained to `language`.
    pub fn for_language(name: &str, language: &str) -> Self {
        if name.contains("lang") {
            Self::Localized {
                name: name.to_string(),
                constraint: LanguageConstraint::new(language),
            }
        } else {
            Self::Plain(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Plain(name) | Self::Localized { name, .. } => name.as_str(),
        }
    }

    pub fn constraint(&self) -> Option<&LanguageConstraint> {
        match self {
            Self::Plain(_) => None,
            Self::Localized { constraint, .. } => Some(constraint),
        }
    }
}

/// ORM-side consumer of an eager-load spec.
pub trait RelationshipLoader {
    fn eager_load(&mut self, relationships: &[Relationship]);
}
