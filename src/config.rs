// Application-wide settings, fixed at startup

use std::time::Duration;

/// Settings passed from `main` into the GUI and collectors.
/// There is no config file; these are the built-in values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Native window title
    pub window_title: String,
    /// Initial and minimum window size in points
    pub min_window_size: [f32; 2],
    /// How often every collector runs
    pub refresh_interval: Duration,
    /// Upper bound for one external command (nvidia-smi, xrandr)
    pub command_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: String::from("Hardware Monitor - Linux"),
            min_window_size: [800.0, 600.0],
            refresh_interval: Duration::from_millis(3000),
            // Shorter than the refresh interval so a hung tool cannot stack ticks
            command_timeout: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_timeout_fits_inside_refresh_interval() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.refresh_interval, Duration::from_millis(3000));
        assert!(cfg.command_timeout < cfg.refresh_interval);
    }
}
