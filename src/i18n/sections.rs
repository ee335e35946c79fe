//! Named template slots filled while handling a request.

use std::collections::HashMap;

/// Registers content under a named slot for later rendering.
pub trait SectionInjector {
    /// Set the content of `name`, replacing whatever it held.
    fn inject(&mut self, name: &str, content: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    slots: HashMap<String, String>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a slot, if it was ever injected.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}

impl SectionInjector for Sections {
    fn inject(&mut self, name: &str, content: &str) {
        self.slots.insert(name.to_string(), content.to_string());
    }
}
