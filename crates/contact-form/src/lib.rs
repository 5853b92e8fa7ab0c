//! Contact Form
//!
//! Validation engine and page logic for a contact form: a declarative rule
//! table, field and form validators, error display, a simulated submission
//! flow with a results overlay, a persisted greeting name and scroll-driven
//! navigation highlighting.
//!
//! The page itself is reached only through traits ([`FieldValueSource`],
//! [`ErrorSurface`], [`ContactUi`], [`NameView`], [`NavView`]) and deferred
//! work goes through a [`Scheduler`], so everything here runs without a
//! browser. The `memory` module provides an in-memory page for that purpose.

pub mod config;
pub mod display;
pub mod display_name;
pub mod error;
pub mod markup;
pub mod memory;
pub mod nav;
pub mod presenter;
pub mod rules;
pub mod schedule;
pub mod submission;
pub mod validator;

pub use config::Config;
pub use display::DisplayInfo;
pub use display_name::{resolve_name, DisplayName, NameStore, NameView};
pub use error::{FormError, Result};
pub use markup::{Notice, NoticeKind};
pub use nav::{ClickAction, NavHighlighter, NavView, SectionBounds};
pub use presenter::{clear_all_errors, clear_error, ErrorSurface};
pub use rules::{FieldName, InputKind, Rule, RuleTable, RULES};
pub use schedule::{ManualScheduler, Scheduler};
pub use submission::{
    ContactUi, NoticeBoard, NoticeId, SubmissionData, SubmissionOrchestrator, SubmissionState,
    SubmitOutcome,
};
pub use validator::{
    check_field, validate_field, validate_form, validate_value, FieldOutcome, FieldValueSource,
    FormReport, Violation,
};
