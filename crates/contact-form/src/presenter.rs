// File: src/presenter.rs
// Purpose: Error display for form fields

use crate::rules::FieldName;
use crate::validator::{FieldOutcome, FieldValueSource};
use tracing::debug;

/// Per-field error display of the host page.
///
/// Each field has a group container that can be marked errored and a
/// message element next to it.
pub trait ErrorSurface {
    fn mark_group(&self, field: FieldName, errored: bool);

    fn set_message(&self, field: FieldName, message: &str);

    fn group_errored(&self, field: FieldName) -> bool;

    /// Empty every message element and unmark every group on the page
    fn clear_every_error(&self);
}

/// Show or hide a field's error according to its latest outcome
pub fn reflect<U: ErrorSurface + ?Sized>(ui: &U, outcome: &FieldOutcome) {
    match outcome.error_message() {
        Some(message) => {
            ui.mark_group(outcome.field, true);
            ui.set_message(outcome.field, message);
        }
        None => {
            ui.mark_group(outcome.field, false);
            ui.set_message(outcome.field, "");
        }
    }
}

/// Drop a displayed error as soon as the field holds something again.
///
/// Runs on every edit; the field is not re-validated. Returns whether the
/// error was cleared.
pub fn clear_error<U>(ui: &U, field: FieldName) -> bool
where
    U: ErrorSurface + FieldValueSource + ?Sized,
{
    if !ui.group_errored(field) {
        return false;
    }

    let has_value = ui
        .text_value(field.id())
        .is_some_and(|value| !value.trim().is_empty());
    if !has_value {
        return false;
    }

    debug!(field = %field, "error cleared while editing");
    ui.mark_group(field, false);
    ui.set_message(field, "");
    true
}

pub fn clear_all_errors<U: ErrorSurface + ?Sized>(ui: &U) {
    ui.clear_every_error();
}
