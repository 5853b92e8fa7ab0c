// File: src/display.rs
// Purpose: Profile display values derived from a submission

use crate::config::SubmissionConfig;
use crate::rules::FieldName;
use crate::submission::SubmissionData;

/// Text of the three read-only display elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    pub birthplace: String,
    pub gender: String,
    pub message_preview: String,
}

pub const DISPLAY_BIRTHPLACE_ID: &str = "displayTempatLahir";
pub const DISPLAY_GENDER_ID: &str = "displayJenisKelamin";
pub const DISPLAY_MESSAGE_ID: &str = "displayPesan";

impl DisplayInfo {
    pub fn from_submission(data: &SubmissionData, config: &SubmissionConfig) -> Self {
        Self {
            birthplace: format!("{}{}", data.get(FieldName::TempatLahir), config.birth_year_suffix),
            gender: data.get(FieldName::JenisKelamin).to_string(),
            message_preview: preview(data.get(FieldName::Pesan), config.preview_chars),
        }
    }

    /// `(element id, text)` pairs
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (DISPLAY_BIRTHPLACE_ID, self.birthplace.as_str()),
            (DISPLAY_GENDER_ID, self.gender.as_str()),
            (DISPLAY_MESSAGE_ID, self.message_preview.as_str()),
        ]
    }
}

/// First `max_chars` characters, with `...` appended when something was cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_keeps_short_text() {
        assert_eq!(preview("halo", 50), "halo");
        assert_eq!(preview(&"x".repeat(50), 50), "x".repeat(50));
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "y".repeat(51);
        assert_eq!(preview(&text, 50), format!("{}...", "y".repeat(50)));
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(preview("ééé", 2), "éé...");
    }

    #[test]
    fn test_display_from_submission() {
        let data = SubmissionData::from_pairs([
            (FieldName::TempatLahir, "Bandung"),
            (FieldName::JenisKelamin, "Perempuan"),
            (FieldName::Pesan, "Halo, apa kabar?"),
        ]);
        let info = DisplayInfo::from_submission(&data, &SubmissionConfig::default());
        assert_eq!(
            info,
            DisplayInfo {
                birthplace: "Bandung/1996".to_string(),
                gender: "Perempuan".to_string(),
                message_preview: "Halo, apa kabar?".to_string(),
            }
        );
    }
}
