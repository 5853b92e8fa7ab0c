//! Event listener wiring.

use anyhow::{anyhow, Context, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// Turn a thrown JS value into an error
pub fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

/// Attach a listener for the lifetime of the page
pub fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_err)
        .with_context(|| format!("Failed to listen for {kind} events"))?;
    // Listeners stay for the page's lifetime, so the closure is never dropped.
    closure.forget();
    Ok(())
}

/// Attach a listener that runs at most once and is then released
pub fn listen_once<F>(target: &EventTarget, kind: &str, handler: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(handler);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.unchecked_ref(),
            &options,
        )
        .map_err(js_err)
        .with_context(|| format!("Failed to listen for {kind} events"))
}
