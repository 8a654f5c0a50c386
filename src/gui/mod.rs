// GUI module organization and public exports

// Main application state and UI logic
mod app;
// Reusable UI components (info table, tab buttons)
mod components;
// Refresh timer and per-tick collection
mod scheduler;
// Colour palette and fonts
mod theme;

// Export AppState for use in main.rs
pub use app::AppState;
