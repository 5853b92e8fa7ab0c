// File: src/nav.rs
// Purpose: Active navigation link from scroll position and link clicks

use crate::config::NavigationConfig;
use tracing::debug;

/// Vertical extent of a page section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Where a navigation link leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// `#id` anchor on this page
    InPage(&'a str),
    External,
}

pub fn classify_href(href: &str) -> LinkTarget<'_> {
    match href.strip_prefix('#') {
        Some(id) => LinkTarget::InPage(id),
        None => LinkTarget::External,
    }
}

/// What the click handler must do with the browser's default navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Default prevented; the page scrolls itself
    Handled,
    /// Leave navigation to the browser
    Default,
}

/// Section whose bounds contain the probe point; later sections win ties
pub fn active_section(scroll_y: f64, lookahead: f64, sections: &[SectionBounds]) -> Option<&str> {
    let probe = scroll_y + lookahead;
    sections
        .iter()
        .filter(|section| section.contains(probe))
        .last()
        .map(|section| section.id.as_str())
}

/// Page geometry and navigation links
pub trait NavView {
    fn scroll_y(&self) -> f64;

    fn section_bounds(&self, id: &str) -> Option<SectionBounds>;

    /// Whether a link `href="#id"` exists
    fn has_link(&self, id: &str) -> bool;

    /// Mark the link to `#id` active and every other navigation link inactive
    fn set_active_link(&self, id: &str);

    /// Smooth-scroll the section to the top; false when it does not exist
    fn scroll_to(&self, id: &str) -> bool;
}

pub struct NavHighlighter {
    sections: Vec<String>,
    lookahead: f64,
}

impl NavHighlighter {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            sections: config.sections.clone(),
            lookahead: config.lookahead_px,
        }
    }

    /// Highlight the link of the section under the scroll position
    pub fn on_scroll<V: NavView + ?Sized>(&self, view: &V) -> Option<String> {
        let bounds: Vec<SectionBounds> = self
            .sections
            .iter()
            .filter(|id| view.has_link(id))
            .filter_map(|id| view.section_bounds(id))
            .collect();

        let active = active_section(view.scroll_y(), self.lookahead, &bounds)?.to_string();
        view.set_active_link(&active);
        Some(active)
    }

    pub fn on_link_click<V: NavView + ?Sized>(&self, view: &V, href: &str) -> ClickAction {
        match classify_href(href) {
            LinkTarget::InPage(id) => {
                if view.section_bounds(id).is_some() {
                    view.set_active_link(id);
                    view.scroll_to(id);
                } else {
                    debug!(href, "anchor target not found");
                }
                ClickAction::Handled
            }
            LinkTarget::External => ClickAction::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            top,
            height,
        }
    }

    #[test]
    fn test_active_section_uses_lookahead() {
        let sections = vec![section("home", 0.0, 600.0), section("profile", 600.0, 800.0)];
        assert_eq!(active_section(0.0, 100.0, &sections), Some("home"));
        assert_eq!(active_section(499.0, 100.0, &sections), Some("home"));
        assert_eq!(active_section(500.0, 100.0, &sections), Some("profile"));
        assert_eq!(active_section(1400.0, 100.0, &sections), None);
    }

    #[test]
    fn test_overlapping_sections_pick_last() {
        let sections = vec![section("home", 0.0, 1000.0), section("profile", 500.0, 500.0)];
        assert_eq!(active_section(500.0, 100.0, &sections), Some("profile"));
    }

    #[test]
    fn test_classify_href() {
        assert_eq!(classify_href("#contact"), LinkTarget::InPage("contact"));
        assert_eq!(classify_href("profile.html"), LinkTarget::External);
    }
}
