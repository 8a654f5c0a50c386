// Reusable UI pieces: the two-column info table and the tab buttons

use eframe::egui;

use crate::gui::theme::Theme;
use crate::models::CategorySnapshot;

/// Styling of one table row, resolved from the theme when the row is inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct RowStyle {
    pub font: egui::FontId,
    /// `None` keeps the theme's default text colour
    pub color: Option<egui::Color32>,
    pub bold: bool,
}

/// One rendered row of an `InfoTable`.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub value: String,
    pub style: RowStyle,
}

/// Two-column (Information, Value) table for one tab.
/// Rows are replaced wholesale on every refresh.
#[derive(Clone, Debug, Default)]
pub struct InfoTable {
    rows: Vec<TableRow>,
}

impl InfoTable {
    /// Removes every row, then inserts one row per snapshot entry in order.
    ///
    /// # Arguments
    /// * `snapshot` - Rows to display
    /// * `theme` - Supplies header and content styling
    pub fn populate(&mut self, snapshot: &CategorySnapshot, theme: &Theme) {
        self.rows.clear();

        for row in &snapshot.rows {
            let (value, style) = if row.is_header {
                (
                    String::new(),
                    RowStyle {
                        font: theme.header_font.clone(),
                        color: Some(theme.accent),
                        bold: true,
                    },
                )
            } else {
                (
                    row.value.clone(),
                    RowStyle {
                        font: theme.content_font.clone(),
                        color: None,
                        bold: false,
                    },
                )
            };

            self.rows.push(TableRow {
                label: row.label.clone(),
                value,
                style,
            });
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Draws the table as a striped grid with column headings.
    pub fn show(&self, ui: &mut egui::Ui, id: &str, theme: &Theme) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new(id)
                .num_columns(2)
                .striped(true)
                .spacing([40.0, 6.0])
                .min_col_width(ui.available_width() / 3.0)
                .show(ui, |ui| {
                    // Column headings
                    for heading in ["Information", "Value"] {
                        ui.label(
                            egui::RichText::new(heading)
                                .font(theme.header_font.clone())
                                .strong(),
                        );
                    }
                    ui.end_row();

                    for row in self.rows() {
                        ui.label(styled(&row.label, &row.style));
                        ui.label(styled(&row.value, &row.style));
                        ui.end_row();
                    }
                });
        });
    }
}

fn styled(text: &str, style: &RowStyle) -> egui::RichText {
    let mut t = egui::RichText::new(text).font(style.font.clone());
    if let Some(c) = style.color {
        t = t.color(c);
    }
    if style.bold {
        t = t.strong();
    }
    t
}

/// Tab caption drawn as a rounded frame, highlighted when selected.
/// Returns true when clicked.
pub fn tab_button(ui: &mut egui::Ui, title: &str, selected: bool, theme: &Theme) -> bool {
    let fill = if selected {
        theme.tab_active
    } else {
        theme.tab_inactive
    };
    let stroke = if selected {
        egui::Stroke::new(1.0, theme.accent)
    } else {
        egui::Stroke::NONE
    };

    let response = egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(egui::Rounding {
            nw: 4.0,
            ne: 4.0,
            sw: 0.0,
            se: 0.0,
        })
        .inner_margin(egui::Margin::symmetric(20.0, 8.0))
        .show(ui, |ui| {
            ui.label(theme.content_text(title));
        });

    response.response.interact(egui::Sense::click()).clicked()
}
