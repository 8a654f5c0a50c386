// Metric collectors: one per dashboard category

mod command;
mod cpu;
mod gpu;
mod memory;
mod system;

pub use command::{CommandError, CommandRunner, SystemCommand};
pub use cpu::CpuCollector;
pub use gpu::GpuCollector;
pub use memory::MemoryCollector;
pub use system::SystemCollector;

use crate::config::AppConfig;
use crate::models::{Category, CategorySnapshot};
use thiserror::Error;

/// Why a collector could not produce its snapshot.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("unexpected {tool} output: {reason}")]
    MalformedOutput { tool: &'static str, reason: String },
    #[error("no connected displays reported")]
    NoConnectedDisplays,
    #[error("{0:?} collector panicked")]
    Panicked(Category),
}

/// Produces a fresh snapshot for one category on every call.
pub trait Collector {
    fn category(&self) -> Category;

    fn collect(&mut self) -> Result<CategorySnapshot, CollectError>;
}

/// The four production collectors in refresh order.
pub fn default_collectors(config: &AppConfig) -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(CpuCollector::new()),
        Box::new(MemoryCollector::new()),
        Box::new(GpuCollector::new(SystemCommand::new(config.command_timeout))),
        Box::new(SystemCollector::new()),
    ]
}

/// Converts a byte count to binary gigabytes.
pub(crate) fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_collectors_follow_category_order() {
        let collectors = default_collectors(&AppConfig::default());
        let order: Vec<Category> = collectors.iter().map(|c| c.category()).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn gib_conversion() {
        assert_eq!(bytes_to_gib(17_179_869_184), 16.0);
        assert_eq!(bytes_to_gib(0), 0.0);
    }
}
