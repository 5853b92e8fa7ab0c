// File: src/memory.rs
// Purpose: In-memory page and storage, for headless use and tests

use crate::display::DisplayInfo;
use crate::display_name::{NameStore, NameView};
use crate::error::{FormError, Result};
use crate::markup::Notice;
use crate::nav::{NavView, SectionBounds};
use crate::presenter::ErrorSurface;
use crate::rules::FieldName;
use crate::submission::{ContactUi, NoticeBoard, NoticeId};
use crate::validator::FieldValueSource;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

/// Error display of one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldError {
    pub errored: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Default)]
struct PageState {
    text: HashMap<String, String>,
    radios: HashMap<String, String>,
    errors: BTreeMap<FieldName, FieldError>,
    display: HashMap<String, String>,
    notices: Vec<(NoticeId, Notice)>,
    overlay: Option<String>,
    name_input: Option<String>,
    greeting: Option<String>,
    sections: Vec<SectionBounds>,
    links: Vec<String>,
    active_link: Option<String>,
    scrolled_to: Vec<String>,
}

/// A page held entirely in memory
pub struct MemoryPage {
    state: RefCell<PageState>,
    submit: RefCell<SubmitControl>,
    next_notice: Cell<u32>,
    resets: Cell<usize>,
    scroll: Cell<f64>,
}

impl MemoryPage {
    /// Page with the contact form, the name widgets and the default submit label
    pub fn new() -> Self {
        let state = PageState {
            name_input: Some(String::new()),
            greeting: Some(String::new()),
            ..PageState::default()
        };
        Self {
            state: RefCell::new(state),
            submit: RefCell::new(SubmitControl {
                disabled: false,
                label: "Submit".to_string(),
            }),
            next_notice: Cell::new(0),
            resets: Cell::new(0),
            scroll: Cell::new(0.0),
        }
    }

    /// Page without the name input and greeting
    pub fn without_name_widgets() -> Self {
        let page = Self::new();
        {
            let mut state = page.state.borrow_mut();
            state.name_input = None;
            state.greeting = None;
        }
        page
    }

    /// Type into a text control
    pub fn set_text(&self, id: &str, value: &str) {
        self.state
            .borrow_mut()
            .text
            .insert(id.to_string(), value.to_string());
    }

    /// Check a radio option in a group
    pub fn check_radio(&self, group: &str, value: &str) {
        self.state
            .borrow_mut()
            .radios
            .insert(group.to_string(), value.to_string());
    }

    pub fn field_error(&self, field: FieldName) -> FieldError {
        self.state
            .borrow()
            .errors
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    pub fn submit_control(&self) -> SubmitControl {
        self.submit.borrow().clone()
    }

    pub fn display_text(&self, id: &str) -> Option<String> {
        self.state.borrow().display.get(id).cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.state
            .borrow()
            .notices
            .iter()
            .map(|(_, notice)| notice.clone())
            .collect()
    }

    pub fn overlay(&self) -> Option<String> {
        self.state.borrow().overlay.clone()
    }

    pub fn resets(&self) -> usize {
        self.resets.get()
    }

    pub fn type_name(&self, value: &str) {
        self.state.borrow_mut().name_input = Some(value.to_string());
    }

    pub fn greeting(&self) -> Option<String> {
        self.state.borrow().greeting.clone()
    }

    pub fn name_input_value(&self) -> Option<String> {
        self.state.borrow().name_input.clone()
    }

    /// Add a section together with its `#id` navigation link
    pub fn add_section(&self, id: &str, top: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        state.sections.push(SectionBounds {
            id: id.to_string(),
            top,
            height,
        });
        state.links.push(id.to_string());
    }

    pub fn scroll_window(&self, y: f64) {
        self.scroll.set(y);
    }

    pub fn active_link(&self) -> Option<String> {
        self.state.borrow().active_link.clone()
    }

    pub fn scrolled_to(&self) -> Vec<String> {
        self.state.borrow().scrolled_to.clone()
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValueSource for MemoryPage {
    fn text_value(&self, id: &str) -> Option<String> {
        Some(self.state.borrow().text.get(id).cloned().unwrap_or_default())
    }

    fn checked_value(&self, group: &str) -> Option<String> {
        self.state.borrow().radios.get(group).cloned()
    }
}

impl ErrorSurface for MemoryPage {
    fn mark_group(&self, field: FieldName, errored: bool) {
        self.state
            .borrow_mut()
            .errors
            .entry(field)
            .or_default()
            .errored = errored;
    }

    fn set_message(&self, field: FieldName, message: &str) {
        self.state
            .borrow_mut()
            .errors
            .entry(field)
            .or_default()
            .message = message.to_string();
    }

    fn group_errored(&self, field: FieldName) -> bool {
        self.field_error(field).errored
    }

    fn clear_every_error(&self) {
        for error in self.state.borrow_mut().errors.values_mut() {
            *error = FieldError::default();
        }
    }
}

impl NoticeBoard for MemoryPage {
    fn show_notice(&self, notice: &Notice) -> NoticeId {
        let id = NoticeId(self.next_notice.get());
        self.next_notice.set(id.0 + 1);
        self.state.borrow_mut().notices.push((id, notice.clone()));
        id
    }

    fn remove_notice(&self, id: NoticeId) {
        self.state
            .borrow_mut()
            .notices
            .retain(|(shown, _)| *shown != id);
    }
}

impl ContactUi for MemoryPage {
    fn set_submit_state(&self, disabled: bool, label: &str) {
        *self.submit.borrow_mut() = SubmitControl {
            disabled,
            label: label.to_string(),
        };
    }

    fn show_display(&self, info: &DisplayInfo) {
        let mut state = self.state.borrow_mut();
        for (id, text) in info.entries() {
            state.display.insert(id.to_string(), text.to_string());
        }
    }

    fn show_overlay(&self, html: &str) {
        self.state.borrow_mut().overlay = Some(html.to_string());
    }

    fn close_overlay(&self) -> bool {
        self.state.borrow_mut().overlay.take().is_some()
    }

    fn reset_form(&self) {
        let mut state = self.state.borrow_mut();
        state.text.clear();
        state.radios.clear();
        self.resets.set(self.resets.get() + 1);
    }
}

impl NameView for MemoryPage {
    fn name_input(&self) -> Option<String> {
        self.state.borrow().name_input.clone()
    }

    fn set_name_input(&self, value: &str) {
        if let Some(input) = self.state.borrow_mut().name_input.as_mut() {
            *input = value.to_string();
        }
    }

    fn set_greeting(&self, value: &str) -> bool {
        match self.state.borrow_mut().greeting.as_mut() {
            Some(greeting) => {
                *greeting = value.to_string();
                true
            }
            None => false,
        }
    }
}

impl NavView for MemoryPage {
    fn scroll_y(&self) -> f64 {
        self.scroll.get()
    }

    fn section_bounds(&self, id: &str) -> Option<SectionBounds> {
        self.state
            .borrow()
            .sections
            .iter()
            .find(|section| section.id == id)
            .cloned()
    }

    fn has_link(&self, id: &str) -> bool {
        self.state.borrow().links.iter().any(|link| link == id)
    }

    fn set_active_link(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        let link = state.links.iter().find(|link| *link == id).cloned();
        state.active_link = link;
    }

    fn scroll_to(&self, id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        let found = state.sections.iter().any(|section| section.id == id);
        if found {
            state.scrolled_to.push(id.to_string());
        }
        found
    }
}

/// Key-value storage held in memory
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every access fails, like a browser with storage disabled
    pub fn unavailable() -> Self {
        Self {
            entries: RefCell::default(),
            unavailable: true,
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl NameStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        if self.unavailable {
            return Err(FormError::Storage("storage disabled".to_string()));
        }
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        if self.unavailable {
            return Err(FormError::Storage("storage disabled".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
