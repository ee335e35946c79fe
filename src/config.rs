use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // URLs
    pub base_path: String,

    // Languages
    pub default_language: String,
    pub languages: Vec<String>,

    // Catalog
    pub lang_dir: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_language =
            std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string());

        let languages = parse_languages(
            &std::env::var("LANGUAGES").unwrap_or_else(|_| default_language.clone()),
        );
        if !languages.contains(&default_language) {
            bail!(
                "DEFAULT_LANGUAGE '{}' is not listed in LANGUAGES ({})",
                default_language,
                languages.join(",")
            );
        }

        Ok(Self {
            // Base path without trailing slash ("" for the site root)
            base_path: std::env::var("BASE_PATH")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_default(),

            default_language,
            languages,

            lang_dir: std::env::var("LANG_DIR").unwrap_or_else(|_| "lang".to_string()),

            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .with_context(|| format!("PORT is not a valid port number: {}", port))?,
                Err(_) => 8080,
            },
        })
    }
}

/// Split a comma-separated language list, dropping blanks and duplicates.
fn parse_languages(raw: &str) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if !languages.iter().any(|known| known == code) {
            languages.push(code.to_string());
        }
    }
    languages
}
