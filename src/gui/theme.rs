// Arc-style dark palette and fonts shared by every widget

use eframe::egui::{self, Color32, FontId, RichText, Stroke};
use std::sync::LazyLock;

/// Process-wide theme, built on first use and never mutated.
pub static THEME: LazyLock<Theme> = LazyLock::new(Theme::arc);

/// Named colours and the two table fonts.
#[derive(Clone, Debug)]
pub struct Theme {
    pub background: Color32,
    pub foreground: Color32,
    pub accent: Color32,
    pub tab_active: Color32,
    pub tab_inactive: Color32,
    /// Section header rows
    pub header_font: FontId,
    /// Label/value rows
    pub content_font: FontId,
}

impl Theme {
    /// The Arc dark palette.
    pub fn arc() -> Self {
        Self {
            background: Color32::from_rgb(47, 52, 63),
            foreground: Color32::from_rgb(211, 218, 227),
            accent: Color32::from_rgb(82, 148, 226),
            tab_active: Color32::from_rgb(56, 60, 74),
            tab_inactive: Color32::from_rgb(47, 52, 63),
            header_font: FontId::proportional(14.0),
            content_font: FontId::proportional(12.5),
        }
    }

    /// egui visuals derived from the palette.
    pub fn visuals(&self) -> egui::Visuals {
        let mut v = egui::Visuals::dark();
        v.panel_fill = self.background;
        v.window_fill = self.background;
        v.extreme_bg_color = self.background;
        // striped grid rows
        v.faint_bg_color = self.tab_active;
        v.override_text_color = Some(self.foreground);
        v.selection.bg_fill = self.accent;
        v.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.accent);
        v
    }

    /// Regular text for label/value cells.
    pub fn content_text(&self, text: &str) -> RichText {
        RichText::new(text).font(self.content_font.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_content_fonts_differ() {
        assert_ne!(THEME.header_font, THEME.content_font);
        assert_eq!(THEME.visuals().override_text_color, Some(THEME.foreground));
    }
}
