// File: src/validator.rs
// Purpose: Rule interpreter plus the field and form validators

use crate::presenter::{self, ErrorSurface};
use crate::rules::{Check, FieldName, InputKind, Rule, RuleTable, RULES};
use serde::Serialize;
use tracing::debug;

/// Read access to the current values of the form controls
pub trait FieldValueSource {
    /// Raw value of the text-like control with the given id, `None` if the page has none
    fn text_value(&self, id: &str) -> Option<String>;

    /// Value of the checked radio button in the named group
    fn checked_value(&self, group: &str) -> Option<String>;
}

/// Why a value failed its rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Violation {
    Missing,
    PatternMismatch,
    TooShort,
    TooLong,
}

/// Result of checking one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub field: FieldName,
    pub violation: Option<Violation>,
    message: &'static str,
}

impl FieldOutcome {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }

    /// The rule message, only when the field failed
    pub fn error_message(&self) -> Option<&'static str> {
        self.violation.map(|_| self.message)
    }
}

/// Outcomes of every field, in rule table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    pub outcomes: Vec<FieldOutcome>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(FieldOutcome::is_valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_valid())
    }

    pub fn outcome(&self, field: FieldName) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|outcome| outcome.field == field)
    }
}

/// Apply the field's acquisition policy to a raw value
pub fn normalize(field: FieldName, raw: &str) -> String {
    match field.input_kind() {
        InputKind::Text => raw.trim().to_string(),
        InputKind::RadioGroup => raw.to_string(),
    }
}

/// Current value of a field as the validator sees it (empty when absent)
pub fn read_value<S: FieldValueSource + ?Sized>(source: &S, field: FieldName) -> String {
    let raw = match field.input_kind() {
        InputKind::Text => source.text_value(field.id()),
        InputKind::RadioGroup => source.checked_value(field.id()),
    };
    raw.map(|value| normalize(field, &value)).unwrap_or_default()
}

fn run_check(check: &Check, value: &str) -> Result<(), Violation> {
    match check {
        Check::Required if value.is_empty() => Err(Violation::Missing),
        Check::Pattern(pattern) if !value.is_empty() && !pattern.is_match(value) => {
            Err(Violation::PatternMismatch)
        }
        Check::LengthRange { min, max } if !value.is_empty() => {
            let len = value.chars().count();
            if min.is_some_and(|min| len < min) {
                return Err(Violation::TooShort);
            }
            if max.is_some_and(|max| len > max) {
                return Err(Violation::TooLong);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Evaluate a value against a rule; the first failing check wins
pub fn evaluate(rule: &Rule, value: &str) -> Result<(), Violation> {
    rule.checks.iter().try_for_each(|check| run_check(check, value))
}

/// Check an already-normalized value without touching any UI
pub fn check_value(rules: &RuleTable, field: FieldName, value: &str) -> FieldOutcome {
    match rules.get(field) {
        Some(rule) => FieldOutcome {
            field,
            violation: evaluate(rule, value).err(),
            message: rule.message,
        },
        None => FieldOutcome {
            field,
            violation: None,
            message: "",
        },
    }
}

/// Check a raw value against the standard rules
pub fn validate_value(field: FieldName, raw: &str) -> FieldOutcome {
    check_value(&RULES, field, &normalize(field, raw))
}

/// Read and check one field without touching any UI
pub fn check_field<S: FieldValueSource + ?Sized>(
    rules: &RuleTable,
    source: &S,
    field: FieldName,
) -> FieldOutcome {
    let value = read_value(source, field);
    let outcome = check_value(rules, field, &value);
    debug!(field = %field, violation = ?outcome.violation, "field checked");
    outcome
}

/// Validate one field and reflect the outcome into its error display
pub fn validate_field<U>(rules: &RuleTable, ui: &U, field: FieldName) -> bool
where
    U: FieldValueSource + ErrorSurface + ?Sized,
{
    let outcome = check_field(rules, ui, field);
    presenter::reflect(ui, &outcome);
    outcome.is_valid()
}

/// Validate every field in table order.
///
/// Fields after a failure are still validated, so every error display is
/// brought up to date.
pub fn validate_form<U>(rules: &RuleTable, ui: &U) -> FormReport
where
    U: FieldValueSource + ErrorSurface + ?Sized,
{
    let outcomes = rules
        .fields()
        .map(|field| {
            let outcome = check_field(rules, ui, field);
            presenter::reflect(ui, &outcome);
            outcome
        })
        .collect();
    FormReport { outcomes }
}
