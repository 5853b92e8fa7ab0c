//! Contact Form WASM
//!
//! Browser bindings for the contact form engine. On load the module wires
//! the form, the display-name widgets, the navigation links and the clock
//! to the live page, using the same rules the engine tests run against.

mod dom;
mod events;
mod logging;
mod storage;
mod timers;

use anyhow::{Context, Result};
use contact_form::{
    clear_error, validate_field, validate_value, ClickAction, Config, DisplayName, FieldName,
    InputKind, NavHighlighter, Scheduler, SubmissionOrchestrator, RULES,
};
use dom::DomUi;
use events::{js_err, listen};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use storage::LocalStorage;
use timers::TimeoutScheduler;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

const CONFIG_ELEMENT_ID: &str = "contact-config";

/// Everything wired to the page
struct App {
    ui: Rc<DomUi>,
    orchestrator: Rc<SubmissionOrchestrator<DomUi>>,
    display_name: DisplayName<DomUi, LocalStorage>,
    nav: NavHighlighter,
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

fn current_app() -> Option<Rc<App>> {
    APP.with(|app| app.borrow().clone())
}

/// Configuration from `<script type="application/toml" id="contact-config">`, if present
fn load_config(document: &Document) -> Result<Config> {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(Config::default());
    };
    let content = element.text_content().unwrap_or_default();
    Config::from_toml_str(&content).context("Invalid contact-config block")
}

/// Set panic hook, logging and page wiring
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Outside a page (node, workers) only the exported helpers are usable
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(document) = window.document() else {
        return Ok(());
    };

    let config = load_config(&document).unwrap_or_else(|e| {
        web_sys::console::warn_1(&format!("{:#}, using defaults", e).into());
        Config::default()
    });
    logging::init(&config.logging.level);

    if still_loading(&document.ready_state()) {
        let ready_window = window.clone();
        listen(&document, "DOMContentLoaded", move |_| {
            boot(ready_window.clone(), config.clone());
        })
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    } else {
        boot(window, config);
    }
    Ok(())
}

/// `document.readyState` before `DOMContentLoaded` has fired
fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn boot(window: Window, config: Config) {
    match mount(window, config) {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(e) => warn!("Contact form not started: {:#}", e),
    }
}

fn mount(window: Window, config: Config) -> Result<Rc<App>> {
    let document = window.document().context("Window has no document")?;
    let config = Rc::new(config);
    let ui = Rc::new(DomUi::new(window.clone(), document.clone()));
    let scheduler = Rc::new(TimeoutScheduler::new(window.clone()));

    start_clock(&ui, &scheduler, &config)?;

    let display_name = DisplayName::new(
        Rc::clone(&ui),
        LocalStorage::new(&window),
        Rc::clone(&scheduler) as Rc<dyn Scheduler>,
        config.display_name.clone(),
        config.timing.clone(),
    );
    display_name.initialize();

    let orchestrator = SubmissionOrchestrator::new(
        Rc::clone(&ui),
        Rc::clone(&scheduler) as Rc<dyn Scheduler>,
        Rc::clone(&config),
    );

    let app = Rc::new(App {
        ui,
        orchestrator,
        display_name,
        nav: NavHighlighter::new(&config.navigation),
    });

    match app.ui.form() {
        Some(form) => {
            wire_fields(&app)?;
            let submit_app = Rc::clone(&app);
            listen(&form, "submit", move |event| {
                event.prevent_default();
                submit_app.orchestrator.submit();
            })?;
        }
        None => warn!("#{} missing, form validation disabled", dom::FORM_ID),
    }

    wire_navigation(&app, &window)?;
    expose_globals(&window)?;

    info!("contact form ready");
    Ok(app)
}

fn start_clock(ui: &Rc<DomUi>, scheduler: &TimeoutScheduler, config: &Config) -> Result<()> {
    let tick = {
        let ui = Rc::clone(ui);
        move || ui.set_clock(&String::from(js_sys::Date::new_0().to_string()))
    };
    tick();
    scheduler.every(config.timing.clock_interval(), tick)
}

/// Live validation: blur validates, typing clears, radio changes validate
fn wire_fields(app: &Rc<App>) -> Result<()> {
    for field in RULES.fields() {
        match field.input_kind() {
            InputKind::RadioGroup => {
                let selector = format!("input[name=\"{}\"]", field.id());
                for radio in app.ui.select_all(&selector) {
                    let app = Rc::clone(app);
                    listen(&radio, "change", move |_| {
                        validate_field(&RULES, &*app.ui, field);
                    })?;
                }
            }
            InputKind::Text => {
                let Some(control) = app.ui.document().get_element_by_id(field.id()) else {
                    warn!(field = %field, "form control missing");
                    continue;
                };
                let blur_app = Rc::clone(app);
                listen(&control, "blur", move |_| {
                    validate_field(&RULES, &*blur_app.ui, field);
                })?;
                let input_app = Rc::clone(app);
                listen(&control, "input", move |_| {
                    clear_error(&*input_app.ui, field);
                })?;
            }
        }
    }
    Ok(())
}

fn wire_navigation(app: &Rc<App>, window: &Window) -> Result<()> {
    for link in app.ui.select_all(dom::NAV_LINK_SELECTOR) {
        let click_app = Rc::clone(app);
        let href_source: Element = link.clone();
        listen(&link, "click", move |event| {
            let href = href_source.get_attribute("href").unwrap_or_default();
            if click_app.nav.on_link_click(&*click_app.ui, &href) == ClickAction::Handled {
                event.prevent_default();
            }
        })?;
    }

    let scroll_app = Rc::clone(app);
    listen(window, "scroll", move |_| {
        scroll_app.nav.on_scroll(&*scroll_app.ui);
    })
}

/// `updateName()` and `closeFormResults()` on `window`, for inline handlers in the markup
fn expose_globals(window: &Window) -> Result<()> {
    let globals: [(&str, Closure<dyn Fn()>); 2] = [
        ("updateName", Closure::new(|| {
            update_name();
        })),
        ("closeFormResults", Closure::new(|| {
            close_form_results();
        })),
    ];
    for (name, closure) in globals {
        js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref())
            .map_err(js_err)
            .with_context(|| format!("Failed to expose {name}"))?;
        closure.forget();
    }
    Ok(())
}

/// Apply the name typed into `#nameInput`
#[wasm_bindgen(js_name = updateName)]
pub fn update_name() -> Option<String> {
    current_app()?.display_name.update()
}

/// Close the submission results overlay
#[wasm_bindgen(js_name = closeFormResults)]
pub fn close_form_results() -> bool {
    current_app().is_some_and(|app| app.orchestrator.close_results())
}

/// Field check result returned to JavaScript
#[derive(Serialize, Debug, Clone)]
pub struct FieldReport {
    pub field: String,
    pub valid: bool,
    pub message: Option<String>,
}

/// Validate a value against a field's rule without touching the page
///
/// # Example (JavaScript)
/// ```javascript
/// const report = validateField('telepon', '08123456789');
/// // { field: 'telepon', valid: true, message: undefined }
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field_js(field: &str, value: &str) -> Result<JsValue, JsValue> {
    let field: FieldName = field
        .parse()
        .map_err(|e: contact_form::FormError| JsValue::from_str(&e.to_string()))?;
    let outcome = validate_value(field, value);
    let report = FieldReport {
        field: field.id().to_string(),
        valid: outcome.is_valid(),
        message: outcome.error_message().map(str::to_string),
    };
    Ok(serde_wasm_bindgen::to_value(&report)?)
}

/// Quick pass/fail check; unknown fields fail
#[wasm_bindgen(js_name = isFieldValid)]
pub fn is_field_valid_js(field: &str, value: &str) -> bool {
    field
        .parse::<FieldName>()
        .is_ok_and(|field| validate_value(field, value).is_valid())
}

/// Field ids in validation order
#[wasm_bindgen(js_name = ruleFields)]
pub fn rule_fields() -> Vec<String> {
    RULES.fields().map(|field| field.id().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_phone_validation() {
        assert!(is_field_valid_js("telepon", "08123456789"));
        assert!(is_field_valid_js("telepon", "+6281234567890"));
        assert!(!is_field_valid_js("telepon", "12345"));
    }

    #[wasm_bindgen_test]
    fn test_name_validation() {
        assert!(is_field_valid_js("nama", "Jo Ann"));
        assert!(!is_field_valid_js("nama", "Jo3"));
    }

    #[wasm_bindgen_test]
    fn test_unknown_field_is_invalid() {
        assert!(!is_field_valid_js("alamat", "Jl. Merdeka 1"));
    }

    #[wasm_bindgen_test]
    fn test_wiring_waits_only_while_loading() {
        assert!(still_loading("loading"));
        assert!(!still_loading("interactive"));
        assert!(!still_loading("complete"));
    }

    #[wasm_bindgen_test]
    fn test_rule_fields_order() {
        assert_eq!(
            rule_fields(),
            vec!["nama", "tempatLahir", "jenisKelamin", "email", "telepon", "pesan"]
        );
    }
}
