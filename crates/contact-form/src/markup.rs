// File: src/markup.rs
// Purpose: Markup for the results overlay and the transient notices

use crate::rules::FieldName;
use crate::submission::SubmissionData;
use maud::{html, Markup};

pub const OVERLAY_ID: &str = "formResultsModal";
pub const OVERLAY_CLOSE_ID: &str = "formResultsClose";

const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
    background-color: rgba(0, 0, 0, 0.5); display: flex; justify-content: center; \
    align-items: center; z-index: 1002;";

const PANEL_STYLE: &str = "background-color: white; padding: 40px; border-radius: 10px; \
    max-width: 500px; width: 90%; max-height: 80vh; overflow-y: auto; \
    box-shadow: 0 5px 15px rgba(0,0,0,0.3);";

const CLOSE_STYLE: &str = "background-color: #007bff; color: white; border: none; \
    padding: 10px 20px; border-radius: 5px; cursor: pointer; font-size: 16px;";

/// Which notice is shown; each has its own slot on screen and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    SubmitSuccess,
    NameUpdated,
}

/// A self-dismissing notification box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn top_px(&self) -> u32 {
        match self.kind {
            NoticeKind::SubmitSuccess => 20,
            NoticeKind::NameUpdated => 100,
        }
    }

    pub fn render(&self) -> Markup {
        let style = format!(
            "position: fixed; top: {}px; right: 20px; background-color: #28a745; \
             color: white; padding: 15px 20px; border-radius: 5px; z-index: 1001; \
             box-shadow: 0 2px 10px rgba(0,0,0,0.2);",
            self.top_px()
        );
        html! {
            div style=(style) { "✓ " (self.message) }
        }
    }
}

/// Overlay listing every submitted value.
///
/// Values are HTML-escaped, so markup typed into the form shows up as text.
pub fn results_overlay(data: &SubmissionData) -> Markup {
    html! {
        div id=(OVERLAY_ID) style=(OVERLAY_STYLE) {
            div style=(PANEL_STYLE) {
                h2 style="margin-bottom: 20px; color: #333; text-align: center;" {
                    "Data yang Disubmit"
                }
                div style="margin-bottom: 20px;" {
                    @for field in FieldName::ALL {
                        div style="margin-bottom: 15px;" {
                            strong { (field.label()) ":" }
                            @if field == FieldName::Pesan {
                                br;
                                div style="background-color: #f8f9fa; padding: 10px; border-radius: 5px; margin-top: 5px;" {
                                    (data.get(field))
                                }
                            } @else {
                                " " (data.get(field))
                            }
                        }
                    }
                }
                div style="text-align: center;" {
                    button id=(OVERLAY_CLOSE_ID) type="button" style=(CLOSE_STYLE) { "Tutup" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SubmissionData {
        SubmissionData::from_pairs([
            (FieldName::Nama, "Budi Santoso"),
            (FieldName::TempatLahir, "Surabaya"),
            (FieldName::JenisKelamin, "Laki-laki"),
            (FieldName::Email, "budi@contoh.id"),
            (FieldName::Telepon, "08123456789"),
            (FieldName::Pesan, "Saya tertarik dengan portofolio Anda."),
        ])
    }

    #[test]
    fn test_overlay_lists_all_fields() {
        let html = results_overlay(&sample()).into_string();
        assert!(html.contains(r#"id="formResultsModal""#));
        for field in FieldName::ALL {
            assert!(html.contains(&format!("<strong>{}:</strong>", field.label())));
        }
        assert!(html.contains("Budi Santoso"));
        assert!(html.contains("budi@contoh.id"));
        assert!(html.contains("Tutup"));
    }

    #[test]
    fn test_overlay_escapes_markup_in_values() {
        let mut data = sample();
        data.insert(FieldName::Pesan, "<script>alert('x')</script> & <b>bold</b>");
        let html = results_overlay(&data).into_string();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn test_notices_use_separate_slots() {
        let banner = Notice::new(NoticeKind::SubmitSuccess, "Pesan berhasil dikirim!").render();
        let name = Notice::new(NoticeKind::NameUpdated, "Nama berhasil diupdate!").render();
        assert!(banner.into_string().contains("top: 20px"));
        let name = name.into_string();
        assert!(name.contains("top: 100px"));
        assert!(name.contains("✓ Nama berhasil diupdate!"));
    }
}
