// File: src/submission.rs
// Purpose: Submit handling: validate, simulate the round trip, show results

use crate::config::Config;
use crate::display::DisplayInfo;
use crate::markup::{self, Notice, NoticeKind};
use crate::presenter::{self, ErrorSurface};
use crate::rules::{FieldName, InputKind, RULES};
use crate::schedule::Scheduler;
use crate::validator::{self, FieldValueSource, FormReport};
use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, info};

/// Handle of a notice currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u32);

/// Places transient notices on the page
pub trait NoticeBoard {
    fn show_notice(&self, notice: &Notice) -> NoticeId;

    fn remove_notice(&self, id: NoticeId);
}

/// Everything the submit flow touches on the page
pub trait ContactUi: FieldValueSource + ErrorSurface + NoticeBoard {
    /// Enable or disable the submit control and set its label
    fn set_submit_state(&self, disabled: bool, label: &str);

    fn show_display(&self, info: &DisplayInfo);

    fn show_overlay(&self, html: &str);

    /// Remove the results overlay; false when none is open
    fn close_overlay(&self) -> bool;

    /// Restore the form controls to their initial values
    fn reset_form(&self);
}

/// Submitted values keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionData {
    values: BTreeMap<FieldName, String>,
}

impl SubmissionData {
    /// Snapshot the form as submitted, text values untrimmed
    pub fn capture<S: FieldValueSource + ?Sized>(source: &S) -> Self {
        let values = FieldName::ALL
            .into_iter()
            .map(|field| {
                let value = match field.input_kind() {
                    InputKind::Text => source.text_value(field.id()),
                    InputKind::RadioGroup => source.checked_value(field.id()),
                };
                (field, value.unwrap_or_default())
            })
            .collect();
        Self { values }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (FieldName, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(field, value)| (field, value.to_string()))
                .collect(),
        }
    }

    pub fn insert(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Submitted value, empty when the field was absent
    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are on screen and nothing was scheduled
    Invalid(FormReport),
    /// Round trip scheduled with the captured data
    Scheduled(SubmissionData),
}

/// Drives one contact form through validation and simulated submission
pub struct SubmissionOrchestrator<U: ContactUi + 'static> {
    ui: Rc<U>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<Config>,
    validating: Cell<bool>,
    in_flight: Cell<usize>,
}

impl<U: ContactUi + 'static> SubmissionOrchestrator<U> {
    pub fn new(ui: Rc<U>, scheduler: Rc<dyn Scheduler>, config: Rc<Config>) -> Rc<Self> {
        Rc::new(Self {
            ui,
            scheduler,
            config,
            validating: Cell::new(false),
            in_flight: Cell::new(0),
        })
    }

    pub fn state(&self) -> SubmissionState {
        if self.validating.get() {
            SubmissionState::Validating
        } else if self.in_flight.get() > 0 {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    /// Handle a submit event (native submission already suppressed by the caller)
    pub fn submit(self: &Rc<Self>) -> SubmitOutcome {
        self.validating.set(true);
        let report = validator::validate_form(&RULES, &*self.ui);
        self.validating.set(false);

        if !report.is_valid() {
            debug!(failed = report.failures().count(), "submission rejected");
            return SubmitOutcome::Invalid(report);
        }

        self.in_flight.set(self.in_flight.get() + 1);
        self.ui
            .set_submit_state(true, &self.config.submission.busy_label);
        let data = SubmissionData::capture(&*self.ui);
        info!(delay_ms = self.config.timing.submit_delay_ms, "submitting contact form");

        let this = Rc::clone(self);
        let captured = data.clone();
        self.scheduler.schedule(
            self.config.timing.submit_delay(),
            Box::new(move || this.complete(&captured)),
        );

        SubmitOutcome::Scheduled(data)
    }

    fn complete(&self, data: &SubmissionData) {
        let ui = &self.ui;

        ui.show_display(&DisplayInfo::from_submission(data, &self.config.submission));

        let banner = Notice::new(
            NoticeKind::SubmitSuccess,
            self.config.submission.success_message.clone(),
        );
        let banner_id = ui.show_notice(&banner);
        let banner_ui = Rc::clone(ui);
        self.scheduler.schedule(
            self.config.timing.success_banner(),
            Box::new(move || banner_ui.remove_notice(banner_id)),
        );

        ui.show_overlay(&markup::results_overlay(data).into_string());
        ui.reset_form();
        presenter::clear_all_errors(&**ui);
        ui.set_submit_state(false, &self.config.submission.idle_label);

        self.in_flight.set(self.in_flight.get().saturating_sub(1));
        info!("contact form submitted");
    }

    /// Close the results overlay
    pub fn close_results(&self) -> bool {
        self.ui.close_overlay()
    }
}
