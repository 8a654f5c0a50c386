// GPU tab: nvidia-smi, xrandr display list, or a placeholder

// Regex compiled once on first use
use std::sync::LazyLock;

// Regex for matching connected xrandr outputs
use regex::Regex;

use super::{CollectError, Collector, CommandRunner};
use crate::models::{Category, CategorySnapshot, MetricRow};

const NVIDIA_SMI: &str = "nvidia-smi";
const NVIDIA_SMI_ARGS: [&str; 2] = [
    "--query-gpu=name,temperature.gpu,memory.total,memory.used,memory.free,utilization.gpu",
    "--format=csv,noheader",
];
const NVIDIA_FIELDS: usize = 6;

const XRANDR: &str = "xrandr";

/// `<name> connected [primary] <geometry>` lines of xrandr output
static CONNECTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+connected\s+(?:primary\b\s*)?(\S+)?").expect("valid xrandr regex")
});

/// GPU tab data via an ordered fallback chain:
/// nvidia-smi, then xrandr display list, then a placeholder row.
pub struct GpuCollector<R> {
    runner: R,
}

impl<R: CommandRunner> GpuCollector<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn nvidia(&self) -> Result<CategorySnapshot, CollectError> {
        let out = self.runner.run(NVIDIA_SMI, &NVIDIA_SMI_ARGS)?;
        parse_nvidia_smi(&out)
    }

    fn displays(&self) -> Result<CategorySnapshot, CollectError> {
        let out = self.runner.run(XRANDR, &[])?;
        parse_xrandr(&out)
    }
}

impl<R: CommandRunner> Collector for GpuCollector<R> {
    fn category(&self) -> Category {
        Category::Gpu
    }

    fn collect(&mut self) -> Result<CategorySnapshot, CollectError> {
        // Tier 1: NVIDIA driver tool
        let err = match self.nvidia() {
            Ok(s) => return Ok(s),
            Err(e) => e,
        };
        tracing::debug!(error = %err, "nvidia-smi unavailable, trying xrandr");

        // Tier 2: connected displays, tier 3: placeholder row
        match self.displays() {
            Ok(s) => Ok(s),
            Err(e) => {
                tracing::debug!(error = %e, "xrandr unavailable, no GPU information");
                Ok(CategorySnapshot::unavailable(Category::Gpu, "GPU Information"))
            }
        }
    }
}

/// Parses `nvidia-smi --format=csv,noheader` output, one GPU per line.
/// Every line must carry exactly six fields.
fn parse_nvidia_smi(out: &str) -> Result<CategorySnapshot, CollectError> {
    let mut s = CategorySnapshot::new(Category::Gpu);
    s.push_header("NVIDIA GPU Information");

    let mut gpus = 0;
    for line in out.lines().map(str::trim).filter(|l| !l.is_empty()) {
        // Positional CSV: validate the count before indexing
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != NVIDIA_FIELDS {
            return Err(CollectError::MalformedOutput {
                tool: NVIDIA_SMI,
                reason: format!("expected {} fields, got {}", NVIDIA_FIELDS, fields.len()),
            });
        }

        s.push("GPU Model", fields[0]);
        s.push("Temperature", format!("{}°C", fields[1]));
        s.push("Total Memory", fields[2]);
        s.push("Used Memory", fields[3]);
        s.push("Free Memory", fields[4]);
        s.push("GPU Utilization", fields[5]);
        gpus += 1;
    }

    // No GPU lines at all counts as a failed tier
    if gpus == 0 {
        return Err(CollectError::MalformedOutput {
            tool: NVIDIA_SMI,
            reason: "empty output".into(),
        });
    }
    Ok(s)
}

/// Collects a (Display, Resolution) pair for every connected output.
/// Outputs without an active mode report "Unknown" as resolution.
fn parse_xrandr(out: &str) -> Result<CategorySnapshot, CollectError> {
    let mut s = CategorySnapshot::new(Category::Gpu);

    for caps in out.lines().filter_map(|l| CONNECTED_RE.captures(l)) {
        // Inactive outputs go straight to the "(normal left ...)" rotation list
        let resolution = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|t| !t.starts_with('('))
            .unwrap_or("Unknown");

        s.push("Display", &caps[1]);
        s.push("Resolution", resolution);
    }

    if s.is_empty() {
        return Err(CollectError::NoConnectedDisplays);
    }
    s.rows.insert(0, MetricRow::header("Display Information"));
    Ok(s)
}
