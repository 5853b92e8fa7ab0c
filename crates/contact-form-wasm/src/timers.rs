//! `setTimeout` / `setInterval` behind the engine's scheduler.

use crate::events::js_err;
use anyhow::{Context, Result};
use contact_form::Scheduler;
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

fn millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

pub struct TimeoutScheduler {
    window: Window,
}

impl TimeoutScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Run `tick` every `period` for the lifetime of the page
    pub fn every<F>(&self, period: Duration, tick: F) -> Result<()>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::new(tick);
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis(period),
            )
            .map_err(js_err)
            .context("Failed to start interval")?;
        closure.forget();
        Ok(())
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            )
        {
            warn!("Failed to schedule task: {:?}", e);
        }
    }
}
