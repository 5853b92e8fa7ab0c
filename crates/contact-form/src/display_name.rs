// File: src/display_name.rs
// Purpose: Persisted greeting name

use crate::config::{DisplayNameConfig, TimingConfig};
use crate::error::Result;
use crate::markup::{Notice, NoticeKind};
use crate::schedule::Scheduler;
use crate::submission::NoticeBoard;
use std::rc::Rc;
use tracing::{info, warn};

/// Durable key-value storage for the name
pub trait NameStore {
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Greeting element and its editable input
pub trait NameView: NoticeBoard {
    /// Current text of the input, `None` when the page has no input
    fn name_input(&self) -> Option<String>;

    fn set_name_input(&self, value: &str);

    /// Write the greeting; false when the page has no greeting element
    fn set_greeting(&self, value: &str) -> bool;
}

/// Trimmed input, or the fallback when nothing is left
pub fn resolve_name(input: &str, fallback: &str) -> String {
    match input.trim() {
        "" => fallback.to_string(),
        name => name.to_string(),
    }
}

pub struct DisplayName<V: NameView + 'static, S: NameStore> {
    view: Rc<V>,
    store: S,
    scheduler: Rc<dyn Scheduler>,
    config: DisplayNameConfig,
    timing: TimingConfig,
}

impl<V: NameView + 'static, S: NameStore> DisplayName<V, S> {
    pub fn new(
        view: Rc<V>,
        store: S,
        scheduler: Rc<dyn Scheduler>,
        config: DisplayNameConfig,
        timing: TimingConfig,
    ) -> Self {
        Self {
            view,
            store,
            scheduler,
            config,
            timing,
        }
    }

    /// Persisted name, or the default when none is stored or storage fails
    pub fn saved_name(&self) -> String {
        match self.store.load(&self.config.storage_key) {
            Ok(Some(name)) if !name.is_empty() => name,
            Ok(_) => self.config.default_name.clone(),
            Err(e) => {
                warn!("Failed to read saved name: {}, using default", e);
                self.config.default_name.clone()
            }
        }
    }

    /// Show the saved name in both the input and the greeting
    pub fn initialize(&self) -> String {
        let name = self.saved_name();
        self.view.set_name_input(&name);
        self.view.set_greeting(&name);
        name
    }

    /// Apply the input: greet, persist, notify.
    ///
    /// Returns the applied name, or `None` when the page lacks the input.
    pub fn update(&self) -> Option<String> {
        let input = self.view.name_input()?;
        let name = resolve_name(&input, &self.config.default_name);
        if !self.view.set_greeting(&name) {
            return None;
        }

        if let Err(e) = self.store.save(&self.config.storage_key, &name) {
            warn!("Failed to persist name: {}", e);
        }
        info!(name = %name, "display name updated");

        let notice = Notice::new(NoticeKind::NameUpdated, self.config.update_message.clone());
        let id = self.view.show_notice(&notice);
        let view = Rc::clone(&self.view);
        self.scheduler.schedule(
            self.timing.name_notice(),
            Box::new(move || view.remove_notice(id)),
        );

        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_name() {
        assert_eq!(resolve_name("  Sari ", "Bayu"), "Sari");
        assert_eq!(resolve_name("   ", "Bayu"), "Bayu");
        assert_eq!(resolve_name("", "Bayu"), "Bayu");
    }
}
