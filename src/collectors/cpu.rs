// CPU tab: model, cores, clock, usage and temperatures

// sysinfo for CPU counters and hwmon sensors
use sysinfo::{Components, CpuRefreshKind, RefreshKind, System};

use super::{CollectError, Collector};
use crate::models::{Category, CategorySnapshot};

/// hwmon chip names that report CPU package/core temperatures
const CPU_SENSOR_CHIPS: [&str; 2] = ["coretemp", "k10temp"];

/// One CPU temperature sensor.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureReading {
    pub label: String,
    pub celsius: f32,
}

/// Everything the CPU tab shows, already read from the OS.
#[derive(Clone, Debug, Default)]
pub struct CpuReading {
    pub model: String,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub frequency_mhz: f64,
    pub usage_percent: f32,
    /// `None` when no supported sensor chip exists
    pub temperatures: Option<Vec<TemperatureReading>>,
}

/// Processor information and temperatures.
/// Keeps its `System` between ticks so usage is measured across the interval.
pub struct CpuCollector {
    system: System,
}

impl Default for CpuCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuCollector {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
            ),
        }
    }

    fn read(&mut self) -> CpuReading {
        // Usage is the delta since the previous refresh
        self.system.refresh_cpu_all();
        let cpus = self.system.cpus();

        // Mean clock across logical CPUs
        let frequency_mhz = if cpus.is_empty() {
            0.0
        } else {
            cpus.iter().map(|c| c.frequency() as f64).sum::<f64>() / cpus.len() as f64
        };

        CpuReading {
            model: cpus
                .first()
                .map(|c| c.brand().trim().to_string())
                .unwrap_or_default(),
            physical_cores: System::physical_core_count(),
            logical_cores: cpus.len(),
            frequency_mhz,
            usage_percent: self.system.global_cpu_usage(),
            temperatures: read_temperatures(),
        }
    }
}

impl Collector for CpuCollector {
    fn category(&self) -> Category {
        Category::Cpu
    }

    fn collect(&mut self) -> Result<CategorySnapshot, CollectError> {
        Ok(cpu_snapshot(&self.read()))
    }
}

/// Reads hwmon sensors belonging to a known CPU chip.
fn read_temperatures() -> Option<Vec<TemperatureReading>> {
    let components = Components::new_with_refreshed_list();
    let temps = cpu_temperatures(
        components
            .list()
            .iter()
            .map(|c| (c.label(), c.temperature())),
    );
    if temps.is_none() {
        tracing::trace!("no CPU temperature sensors found");
    }
    temps
}

/// Keeps sensors whose label starts with a CPU chip name and strips that prefix.
/// Sensors without a current reading are skipped.
fn cpu_temperatures<'a>(
    sensors: impl IntoIterator<Item = (&'a str, Option<f32>)>,
) -> Option<Vec<TemperatureReading>> {
    let mut found = false;
    let mut out = Vec::new();

    for (label, reading) in sensors {
        // Skip sensors from other chips (nvme, acpitz, ...)
        let Some(rest) = CPU_SENSOR_CHIPS
            .iter()
            .find_map(|chip| label.strip_prefix(chip))
        else {
            continue;
        };
        found = true;

        if let Some(celsius) = reading.filter(|t| t.is_finite()) {
            let name = rest.trim();
            out.push(TemperatureReading {
                label: if name.is_empty() { label.to_string() } else { name.to_string() },
                celsius,
            });
        }
    }

    found.then_some(out)
}

/// Formats a CPU reading into table rows.
pub fn cpu_snapshot(r: &CpuReading) -> CategorySnapshot {
    let mut s = CategorySnapshot::new(Category::Cpu);
    s.push_header("CPU Information");
    s.push("CPU Model", r.model.as_str());
    s.push(
        "Physical Cores",
        r.physical_cores
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".into()),
    );
    s.push("Logical Cores", r.logical_cores.to_string());
    s.push("Current Frequency", format!("{:.2} MHz", r.frequency_mhz));
    s.push("CPU Usage", format!("{:.1}%", r.usage_percent));

    // Temperature section only when a CPU chip was found
    if let Some(temps) = &r.temperatures {
        s.push_header("CPU Temperatures");
        for t in temps {
            s.push(t.label.as_str(), format!("{:.1}°C", t.celsius));
        }
    }
    s
}
