//! The live page behind the engine traits.

use crate::events::listen_once;
use contact_form::display_name::NameView;
use contact_form::markup::{Notice, OVERLAY_CLOSE_ID, OVERLAY_ID};
use contact_form::nav::{NavView, SectionBounds};
use contact_form::{
    ContactUi, DisplayInfo, ErrorSurface, FieldName, FieldValueSource, NoticeBoard, NoticeId,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

pub const FORM_ID: &str = "contactForm";
pub const SUBMIT_SELECTOR: &str = ".submit-btn";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const NAME_INPUT_ID: &str = "nameInput";
pub const GREETING_ID: &str = "dynamicName";
pub const CLOCK_ID: &str = "currentTime";

const ERRORED_CLASS: &str = "error";
const ACTIVE_CLASS: &str = "active";

/// Value of an input, textarea or select element
pub fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    element.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

pub struct DomUi {
    window: Window,
    document: Document,
    notices: RefCell<HashMap<NoticeId, Element>>,
    next_notice: Cell<u32>,
}

impl DomUi {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            notices: RefCell::default(),
            next_notice: Cell::new(0),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn form(&self) -> Option<HtmlFormElement> {
        self.document
            .get_element_by_id(FORM_ID)
            .and_then(|el| el.dyn_into().ok())
    }

    /// Every element matching a selector, in document order
    pub fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn select(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        self.select(SUBMIT_SELECTOR).and_then(|el| el.dyn_into().ok())
    }

    fn error_element(&self, field: FieldName) -> Option<Element> {
        let element = self.document.get_element_by_id(&field.error_id());
        if element.is_none() {
            warn!(field = %field, "error element missing");
        }
        element
    }

    fn field_group(&self, field: FieldName) -> Option<Element> {
        self.error_element(field)?.closest(".form-group").ok().flatten()
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    /// Parse markup and append its root element to the body
    fn append_markup(&self, html: &str) -> Option<Element> {
        let body = self.document.body()?;
        let holder = self.document.create_element("div").ok()?;
        holder.set_inner_html(html);
        let root = holder.first_element_child()?;
        body.append_child(&root).ok()?;
        Some(root)
    }

    pub fn set_clock(&self, text: &str) {
        self.set_text(CLOCK_ID, text);
    }

    fn name_input_element(&self) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(NAME_INPUT_ID)
            .and_then(|el| el.dyn_into().ok())
    }
}

/// Remove the results overlay from the page
pub fn remove_overlay(document: &Document) -> bool {
    match document.get_element_by_id(OVERLAY_ID) {
        Some(overlay) => {
            overlay.remove();
            true
        }
        None => false,
    }
}

impl FieldValueSource for DomUi {
    fn text_value(&self, id: &str) -> Option<String> {
        control_value(&self.document.get_element_by_id(id)?)
    }

    fn checked_value(&self, group: &str) -> Option<String> {
        let checked = self.select(&format!("input[name=\"{group}\"]:checked"))?;
        checked.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }
}

impl ErrorSurface for DomUi {
    fn mark_group(&self, field: FieldName, errored: bool) {
        let Some(group) = self.field_group(field) else {
            return;
        };
        let classes = group.class_list();
        let result = if errored {
            classes.add_1(ERRORED_CLASS)
        } else {
            classes.remove_1(ERRORED_CLASS)
        };
        if result.is_err() {
            warn!(field = %field, "failed to update field group class");
        }
    }

    fn set_message(&self, field: FieldName, message: &str) {
        if let Some(element) = self.error_element(field) {
            element.set_text_content(Some(message));
        }
    }

    fn group_errored(&self, field: FieldName) -> bool {
        self.field_group(field)
            .is_some_and(|group| group.class_list().contains(ERRORED_CLASS))
    }

    fn clear_every_error(&self) {
        for message in self.select_all(".error-message") {
            message.set_text_content(Some(""));
        }
        for group in self.select_all(".form-group.error") {
            let _ = group.class_list().remove_1(ERRORED_CLASS);
        }
    }
}

impl NoticeBoard for DomUi {
    fn show_notice(&self, notice: &Notice) -> NoticeId {
        let id = NoticeId(self.next_notice.get());
        self.next_notice.set(id.0 + 1);
        match self.append_markup(&notice.render().into_string()) {
            Some(element) => {
                self.notices.borrow_mut().insert(id, element);
            }
            None => warn!("failed to show notice"),
        }
        id
    }

    fn remove_notice(&self, id: NoticeId) {
        if let Some(element) = self.notices.borrow_mut().remove(&id) {
            element.remove();
        }
    }
}

impl ContactUi for DomUi {
    fn set_submit_state(&self, disabled: bool, label: &str) {
        match self.submit_button() {
            Some(button) => {
                button.set_disabled(disabled);
                button.set_text_content(Some(label));
            }
            None => warn!("submit button missing"),
        }
    }

    fn show_display(&self, info: &DisplayInfo) {
        for (id, text) in info.entries() {
            self.set_text(id, text);
        }
    }

    fn show_overlay(&self, html: &str) {
        let Some(root) = self.append_markup(html) else {
            warn!("failed to show results overlay");
            return;
        };
        // This overlay's own button; earlier overlays may still be open
        let close = root
            .query_selector(&format!("#{OVERLAY_CLOSE_ID}"))
            .ok()
            .flatten();
        let Some(close) = close else {
            return;
        };
        let overlay = root.clone();
        if let Err(e) = listen_once(&close, "click", move || overlay.remove()) {
            warn!("{:#}", e);
        }
    }

    fn close_overlay(&self) -> bool {
        remove_overlay(&self.document)
    }

    fn reset_form(&self) {
        if let Some(form) = self.form() {
            form.reset();
        }
    }
}

impl NameView for DomUi {
    fn name_input(&self) -> Option<String> {
        self.name_input_element().map(|input| input.value())
    }

    fn set_name_input(&self, value: &str) {
        if let Some(input) = self.name_input_element() {
            input.set_value(value);
        }
    }

    fn set_greeting(&self, value: &str) -> bool {
        self.set_text(GREETING_ID, value)
    }
}

impl NavView for DomUi {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn section_bounds(&self, id: &str) -> Option<SectionBounds> {
        let section: HtmlElement = self.document.get_element_by_id(id)?.dyn_into().ok()?;
        Some(SectionBounds {
            id: id.to_string(),
            top: f64::from(section.offset_top()),
            height: f64::from(section.offset_height()),
        })
    }

    fn has_link(&self, id: &str) -> bool {
        self.select(&format!("a[href=\"#{id}\"]")).is_some()
    }

    fn set_active_link(&self, id: &str) {
        let target = format!("#{id}");
        for link in self.select_all(NAV_LINK_SELECTOR) {
            let classes = link.class_list();
            let _ = classes.remove_1(ACTIVE_CLASS);
            if link.get_attribute("href").as_deref() == Some(target.as_str()) {
                let _ = classes.add_1(ACTIVE_CLASS);
            }
        }
    }

    fn scroll_to(&self, id: &str) -> bool {
        let Some(section) = self.document.get_element_by_id(id) else {
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        section.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use contact_form::markup::results_overlay;
    use contact_form::SubmissionData;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> DomUi {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        DomUi::new(window, document)
    }

    fn open_overlay(ui: &DomUi, name: &str) {
        let data = SubmissionData::from_pairs([(FieldName::Nama, name)]);
        ui.show_overlay(&results_overlay(&data).into_string());
    }

    #[wasm_bindgen_test]
    fn test_close_button_removes_its_own_overlay() {
        let ui = page();
        open_overlay(&ui, "Pertama");
        open_overlay(&ui, "Kedua");

        let selector = format!("#{OVERLAY_ID}");
        let overlays = ui.select_all(&selector);
        assert_eq!(overlays.len(), 2);

        let button: HtmlElement = overlays[1]
            .query_selector("button")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        button.click();

        let remaining = ui.select_all(&selector);
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].text_content().unwrap().contains("Pertama"));

        assert!(ui.close_overlay());
        assert!(ui.select_all(&selector).is_empty());
        assert!(!ui.close_overlay());
    }
}
