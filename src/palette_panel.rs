use crate::material::{MaterialId, PALETTE};

pub const LIST_PADDING: u32 = 10;
pub const ENTRY_SPACING: u32 = 35;
pub const ENTRY_HEIGHT: u32 = 30;
pub const SWATCH_SIZE: u32 = 20;
pub const LABEL_X: u32 = LIST_PADDING + SWATCH_SIZE + 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Hover,
    Selected,
}

/// Scrollable list of materials on the left edge of the editor window.
#[derive(Debug, Clone)]
pub struct PalettePanel {
    width: u32,
    scroll: f64,
    hovered: Option<MaterialId>,
}

impl PalettePanel {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            scroll: 0.0,
            hovered: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn hovered(&self) -> Option<MaterialId> {
        self.hovered
    }

    pub fn contains(&self, px: f64, _py: f64) -> bool {
        px >= 0.0 && px < self.width as f64
    }

    pub fn content_height() -> u32 {
        LIST_PADDING * 2 + (PALETTE.len() as u32 - 1) * ENTRY_SPACING + ENTRY_HEIGHT
    }

    /// Top edge of entry `index` in window pixels, after scrolling.
    pub fn entry_top(&self, index: usize) -> i32 {
        (LIST_PADDING + index as u32 * ENTRY_SPACING) as i32 - self.scroll.round() as i32
    }

    pub fn entry_at(&self, px: f64, py: f64) -> Option<MaterialId> {
        if px < LIST_PADDING as f64 || px >= self.width.saturating_sub(LIST_PADDING) as f64 {
            return None;
        }
        let rel = py + self.scroll.round() - LIST_PADDING as f64;
        if rel < 0.0 {
            return None;
        }
        let index = (rel / ENTRY_SPACING as f64).floor() as usize;
        let within = rel - (index as u32 * ENTRY_SPACING) as f64;
        if within >= ENTRY_HEIGHT as f64 || index >= PALETTE.len() {
            return None;
        }
        MaterialId::new(index as u8)
    }

    /// Scrolls by `delta` pixels, clamped to the list. Returns whether the
    /// offset changed.
    pub fn scroll_by(&mut self, delta: f64, viewport_height: u32) -> bool {
        let max = Self::content_height().saturating_sub(viewport_height) as f64;
        let next = (self.scroll + delta).clamp(0.0, max);
        if next == self.scroll {
            return false;
        }
        self.scroll = next;
        true
    }

    /// Keeps the scroll offset valid after the window changes height.
    pub fn clamp_scroll(&mut self, viewport_height: u32) {
        let max = Self::content_height().saturating_sub(viewport_height) as f64;
        self.scroll = self.scroll.min(max);
    }

    /// `None` means the pointer is not over the panel. Returns whether the
    /// hovered entry changed.
    pub fn hover_at(&mut self, position: Option<(f64, f64)>) -> bool {
        let hovered = position.and_then(|(px, py)| self.entry_at(px, py));
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        true
    }

    pub fn highlight(&self, material: MaterialId, selected: Option<MaterialId>) -> Highlight {
        if selected == Some(material) {
            Highlight::Selected
        } else if self.hovered == Some(material) {
            Highlight::Hover
        } else {
            Highlight::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u8) -> MaterialId {
        MaterialId::new(raw).unwrap()
    }

    #[test]
    fn test_entry_hit_testing() {
        let panel = PalettePanel::new(320);
        assert_eq!(panel.entry_at(100.0, 10.0), Some(id(0)));
        assert_eq!(panel.entry_at(100.0, 39.0), Some(id(0)));
        // Gap between entries.
        assert_eq!(panel.entry_at(100.0, 42.0), None);
        assert_eq!(panel.entry_at(100.0, 45.0), Some(id(1)));
        assert_eq!(panel.entry_at(100.0, 10.0 + 9.0 * 35.0), Some(id(9)));
        assert_eq!(panel.entry_at(100.0, 10.0 + 10.0 * 35.0), None);
        assert_eq!(panel.entry_at(100.0, 5.0), None);
        assert_eq!(panel.entry_at(5.0, 15.0), None);
        assert_eq!(panel.entry_at(315.0, 15.0), None);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut panel = PalettePanel::new(320);
        let content = PalettePanel::content_height();
        assert_eq!(content, 365);

        // Tall window: nothing to scroll.
        assert!(!panel.scroll_by(50.0, 800));
        assert_eq!(panel.scroll(), 0.0);

        assert!(panel.scroll_by(1000.0, 200));
        assert_eq!(panel.scroll(), 165.0);
        assert!(!panel.scroll_by(10.0, 200));
        assert!(panel.scroll_by(-1000.0, 200));
        assert_eq!(panel.scroll(), 0.0);
    }

    #[test]
    fn test_scrolled_hit_testing() {
        let mut panel = PalettePanel::new(320);
        panel.scroll_by(70.0, 200);
        assert_eq!(panel.entry_top(2), 10);
        assert_eq!(panel.entry_at(100.0, 15.0), Some(id(2)));
    }

    #[test]
    fn test_clamp_scroll_after_growing_window() {
        let mut panel = PalettePanel::new(320);
        panel.scroll_by(1000.0, 200);
        panel.clamp_scroll(300);
        assert_eq!(panel.scroll(), 65.0);
        panel.clamp_scroll(1000);
        assert_eq!(panel.scroll(), 0.0);
    }

    #[test]
    fn test_hover_reports_changes_only() {
        let mut panel = PalettePanel::new(320);
        assert!(panel.hover_at(Some((100.0, 20.0))));
        assert_eq!(panel.hovered(), Some(id(0)));
        assert!(!panel.hover_at(Some((120.0, 25.0))));
        assert!(panel.hover_at(None));
        assert!(!panel.hover_at(None));
    }

    #[test]
    fn test_selection_highlight_wins_over_hover() {
        let mut panel = PalettePanel::new(320);
        panel.hover_at(Some((100.0, 50.0)));
        assert_eq!(panel.highlight(id(1), None), Highlight::Hover);
        assert_eq!(panel.highlight(id(1), Some(id(1))), Highlight::Selected);
        assert_eq!(panel.highlight(id(2), Some(id(1))), Highlight::None);
        assert_eq!(panel.highlight(id(1), Some(id(2))), Highlight::Hover);
    }
}
