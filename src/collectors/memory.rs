// RAM tab: physical memory and swap usage

// Memory-only sysinfo refreshes
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use super::{CollectError, Collector, bytes_to_gib};
use crate::models::{Category, CategorySnapshot};

/// Raw memory and swap counters in bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryReading {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
}

/// Physical memory and swap usage.
pub struct MemoryCollector {
    system: System,
}

impl Default for MemoryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCollector {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
            ),
        }
    }

    fn read(&mut self) -> MemoryReading {
        // Reload RAM and swap counters
        self.system.refresh_memory();
        MemoryReading {
            total: self.system.total_memory(),
            available: self.system.available_memory(),
            used: self.system.used_memory(),
            swap_total: self.system.total_swap(),
            swap_used: self.system.used_swap(),
            swap_free: self.system.free_swap(),
        }
    }
}

impl Collector for MemoryCollector {
    fn category(&self) -> Category {
        Category::Ram
    }

    fn collect(&mut self) -> Result<CategorySnapshot, CollectError> {
        Ok(memory_snapshot(&self.read()))
    }
}

fn gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes_to_gib(bytes))
}

/// Formats a memory reading into table rows.
pub fn memory_snapshot(m: &MemoryReading) -> CategorySnapshot {
    // Guard against a zero total on exotic systems
    let percent = if m.total > 0 {
        m.used as f64 / m.total as f64 * 100.0
    } else {
        0.0
    };

    let mut s = CategorySnapshot::new(Category::Ram);
    s.push_header("Memory Information");
    s.push("Total Memory", gb(m.total));
    s.push("Available Memory", gb(m.available));
    s.push("Used Memory", gb(m.used));
    s.push("Memory Percentage", format!("{:.1}%", percent));
    // Swap section
    s.push("Swap Total", gb(m.swap_total));
    s.push("Swap Used", gb(m.swap_used));
    s.push("Swap Free", gb(m.swap_free));
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn value<'a>(s: &'a CategorySnapshot, label: &str) -> &'a str {
        &s.rows.iter().find(|r| r.label == label).unwrap().value
    }

    #[test]
    fn sixteen_gib_half_used() {
        let s = memory_snapshot(&MemoryReading {
            total: 17_179_869_184,
            available: 8 * GIB,
            used: 8 * GIB,
            ..Default::default()
        });

        assert_eq!(value(&s, "Total Memory"), "16.00 GB");
        assert_eq!(value(&s, "Used Memory"), "8.00 GB");
        assert_eq!(value(&s, "Memory Percentage"), "50.0%");
        assert_eq!(value(&s, "Swap Total"), "0.00 GB");
    }

    #[test]
    fn zero_total_does_not_divide_by_zero() {
        let s = memory_snapshot(&MemoryReading::default());
        assert_eq!(value(&s, "Memory Percentage"), "0.0%");
    }

    #[test]
    fn row_layout() {
        let s = memory_snapshot(&MemoryReading::default());
        let labels: Vec<&str> = s.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Memory Information",
                "Total Memory",
                "Available Memory",
                "Used Memory",
                "Memory Percentage",
                "Swap Total",
                "Swap Used",
                "Swap Free",
            ]
        );
        assert!(s.rows[0].is_header);
    }

    #[test]
    fn live_collector_reports_memory() {
        let s = MemoryCollector::new().collect().unwrap();
        assert_eq!(s.category, Category::Ram);
        assert_eq!(s.len(), 8);
    }
}
