// Main application state and UI rendering logic for the Hardware Monitor

// Collectors that feed the four tabs
use crate::collectors::default_collectors;
use crate::config::AppConfig;
use crate::gui::components::tab_button;
use crate::gui::scheduler::{Dashboard, RefreshScheduler};
use crate::gui::theme::THEME;
use crate::models::Category;
// Import egui for UI rendering
use eframe::egui;
use std::time::Instant;

/// Main application state for the eframe app.
/// Owns the collectors, their tables and the refresh timer.
pub struct AppState {
    /// Collectors paired with the table each one fills
    dashboard: Dashboard,

    /// Decides when the next refresh is due
    scheduler: RefreshScheduler,

    /// Tab currently shown in the central panel
    selected: Category,
}

impl AppState {
    /// Creates a new application state instance.
    /// Applies the theme and performs the first data collection.
    ///
    /// # Arguments
    /// * `cc` - eframe creation context containing egui context
    /// * `config` - Refresh interval and command timeout
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        cc.egui_ctx.set_visuals(THEME.visuals());

        let mut s = Self {
            dashboard: Dashboard::new(default_collectors(config)),
            scheduler: RefreshScheduler::new(config.refresh_interval),
            selected: Category::Cpu,
        };

        // First poll is always due, so the tables are filled before the first frame
        s.tick(Instant::now());

        s
    }

    /// Refreshes every table if the interval has elapsed.
    fn tick(&mut self, now: Instant) {
        if self.scheduler.poll(now) {
            tracing::trace!("refreshing all categories");
            self.dashboard.refresh_all(&THEME);
        }
    }
}

impl eframe::App for AppState {
    /// Main UI update function called every frame.
    /// Runs a refresh when due, then draws the tab bar and the selected table.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.tick(now);

        // Wake up again exactly when the next refresh is due
        ctx.request_repaint_after(self.scheduler.time_until_next(now));

        // TAB BAR
        egui::TopBottomPanel::top("tab_bar")
            .frame(
                egui::Frame::none()
                    .fill(THEME.background)
                    .inner_margin(egui::Margin::symmetric(8.0, 6.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 2.0;
                    for category in Category::ALL {
                        if tab_button(ui, category.title(), self.selected == category, &THEME) {
                            self.selected = category;
                        }
                    }
                });
            });

        // CENTRAL PANEL: table of the selected category
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(THEME.background)
                    .stroke(egui::Stroke::new(1.0, THEME.accent))
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                self.dashboard
                    .table(self.selected)
                    .show(ui, self.selected.title(), &THEME);
            });
    }
}
