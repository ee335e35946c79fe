//! Locale activation.
//!
//! A [`LocaleSetter`] is handed an ordered list of candidate identifiers and
//! activates the first one the host supports, like `setlocale` does with a
//! list of names.

use std::collections::HashSet;
use std::process::Command;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Activates a platform locale.
pub trait LocaleSetter {
    /// Activate the first supported identifier in `candidates`.
    ///
    /// # Returns
    /// * `Some(identifier)` of the locale now active
    /// * `None` if the host supports none of the candidates
    fn set_locale(&self, candidates: &[&str]) -> Option<String>;
}

/// Locale table of the host, with the currently active identifier.
#[derive(Debug, Default)]
pub struct InstalledLocales {
    installed: HashSet<String>,
    active: RwLock<Option<String>>,
}

impl InstalledLocales {
    /// Build from the identifiers the host supports.
    pub fn new<I, S>(installed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            installed: installed
                .into_iter()
                .map(|name| normalize(name.as_ref()))
                .collect(),
            active: RwLock::new(None),
        }
    }

    /// Read the host's locales from `locale -a`.
    ///
    /// Falls back to the POSIX locales when the command is unavailable.
    pub fn from_system() -> Self {
        match Command::new("locale").arg("-a").output() {
            Ok(output) if output.status.success() => {
                let listing = String::from_utf8_lossy(&output.stdout);
                let locales = Self::new(listing.lines().map(str::trim).filter(|l| !l.is_empty()));
                debug!("Detected {} installed locales", locales.installed.len());
                locales
            }
            Ok(output) => {
                warn!(
                    "`locale -a` exited with {}, assuming POSIX locales only",
                    output.status
                );
                Self::new(["C", "POSIX"])
            }
            Err(e) => {
                warn!("Could not run `locale -a` ({}), assuming POSIX locales only", e);
                Self::new(["C", "POSIX"])
            }
        }
    }

    /// Whether the host supports `identifier`.
    pub fn supports(&self, identifier: &str) -> bool {
        self.installed.contains(&normalize(identifier))
    }

    /// The identifier activated last, if any.
    pub fn active(&self) -> Option<String> {
        self.active
            .read()
            .map(|active| active.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl LocaleSetter for InstalledLocales {
    fn set_locale(&self, candidates: &[&str]) -> Option<String> {
        let chosen = candidates.iter().find(|c| self.supports(c))?.to_string();

        let mut active = self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *active = Some(chosen.clone());

        debug!(locale = %chosen, "Activated locale");
        Some(chosen)
    }
}

// Case-insensitive, with "UTF-8" and "UTF8" codesets treated alike
fn normalize(identifier: &str) -> String {
    identifier.to_ascii_lowercase().replace("utf-8", "utf8")
}
