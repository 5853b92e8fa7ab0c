// File: src/rules.rs
// Purpose: Field identifiers and the declarative rule table

use crate::error::FormError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Letters and whitespace only
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Indonesian prefix (+62, 62 or 0) followed by 9 to 12 digits
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+62|62|0)[0-9]{9,12}$").unwrap());

/// The standard rule table, built on first use
pub static RULES: Lazy<RuleTable> = Lazy::new(RuleTable::standard);

/// One named input of the contact form.
///
/// The serialized form and [`FieldName::id`] are the element ids used by the
/// host markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Nama,
    TempatLahir,
    JenisKelamin,
    Email,
    Telepon,
    Pesan,
}

/// How a field's value is read from the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Text-like control, value is trimmed
    Text,
    /// Radio group, value of the checked option verbatim
    RadioGroup,
}

impl FieldName {
    /// Every field, in rule table order
    pub const ALL: [FieldName; 6] = [
        FieldName::Nama,
        FieldName::TempatLahir,
        FieldName::JenisKelamin,
        FieldName::Email,
        FieldName::Telepon,
        FieldName::Pesan,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FieldName::Nama => "nama",
            FieldName::TempatLahir => "tempatLahir",
            FieldName::JenisKelamin => "jenisKelamin",
            FieldName::Email => "email",
            FieldName::Telepon => "telepon",
            FieldName::Pesan => "pesan",
        }
    }

    /// Id of the element holding this field's error message
    pub fn error_id(self) -> String {
        format!("{}Error", self.id())
    }

    /// Caption used in the results overlay
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Nama => "Nama",
            FieldName::TempatLahir => "Tempat Lahir",
            FieldName::JenisKelamin => "Jenis Kelamin",
            FieldName::Email => "Email",
            FieldName::Telepon => "Nomor Telepon",
            FieldName::Pesan => "Pesan",
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            FieldName::JenisKelamin => InputKind::RadioGroup,
            _ => InputKind::Text,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.id() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// A single constraint of a rule
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Value must be non-empty
    Required,
    /// Non-empty value must match the whole pattern
    Pattern(&'static Lazy<Regex>),
    /// Non-empty value length, in characters, must lie within the bounds
    LengthRange {
        min: Option<usize>,
        max: Option<usize>,
    },
}

/// Constraints and the message shown for one field.
///
/// Checks run in declaration order; whichever fails first, `message` is what
/// the user sees.
#[derive(Debug, Clone)]
pub struct Rule {
    pub field: FieldName,
    pub checks: Vec<Check>,
    pub message: &'static str,
}

impl Rule {
    pub fn new(field: FieldName, message: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
            message,
        }
    }

    pub fn required(mut self) -> Self {
        self.checks.push(Check::Required);
        self
    }

    pub fn pattern(mut self, pattern: &'static Lazy<Regex>) -> Self {
        self.checks.push(Check::Pattern(pattern));
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.checks.push(Check::LengthRange { min, max });
        self
    }

    pub fn is_required(&self) -> bool {
        self.checks.iter().any(|check| matches!(check, Check::Required))
    }
}

/// Immutable mapping from field to rule, iterated in declaration order
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// The six rules of the contact form
    pub fn standard() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    FieldName::Nama,
                    "Nama harus diisi minimal 2 karakter dan hanya berisi huruf",
                )
                .required()
                .pattern(&NAME_PATTERN)
                .length(Some(2), None),
                Rule::new(FieldName::TempatLahir, "Tempat lahir harus dipilih").required(),
                Rule::new(FieldName::JenisKelamin, "Jenis kelamin harus dipilih").required(),
                Rule::new(
                    FieldName::Email,
                    "Email harus dalam format yang valid (contoh: user@domain.com)",
                )
                .required()
                .pattern(&EMAIL_PATTERN),
                Rule::new(
                    FieldName::Telepon,
                    "Nomor telepon harus valid (contoh: 08123456789 atau +6281234567890)",
                )
                .required()
                .pattern(&PHONE_PATTERN),
                Rule::new(
                    FieldName::Pesan,
                    "Pesan harus diisi minimal 10 karakter dan maksimal 500 karakter",
                )
                .required()
                .length(Some(10), Some(500)),
            ],
        }
    }

    pub fn get(&self, field: FieldName) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.rules.iter().map(|rule| rule.field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_field_once() {
        let fields: Vec<_> = RULES.fields().collect();
        assert_eq!(fields, FieldName::ALL.to_vec());
    }

    #[test]
    fn test_every_rule_is_required() {
        assert!(RULES.iter().all(Rule::is_required));
    }

    #[test]
    fn test_field_ids_round_trip() {
        assert_eq!("tempatLahir".parse::<FieldName>().unwrap(), FieldName::TempatLahir);
        assert_eq!(FieldName::Telepon.error_id(), "teleponError");
        assert!("alamat".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_only_gender_is_radio() {
        let radios: Vec<_> = FieldName::ALL
            .into_iter()
            .filter(|f| f.input_kind() == InputKind::RadioGroup)
            .collect();
        assert_eq!(radios, vec![FieldName::JenisKelamin]);
    }
}
