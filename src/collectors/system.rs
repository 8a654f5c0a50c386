// System tab: OS identity, kernel and boot time

// Boot time rendering in local time
use chrono::{DateTime, Local, TimeZone};
// uname(2) for OS name, kernel release and machine
use nix::sys::utsname::uname;
// Fallbacks and boot epoch
use sysinfo::System;

use super::{CollectError, Collector};
use crate::models::{Category, CategorySnapshot};

const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];
const BOOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identity of the running OS as shown on the System tab.
#[derive(Clone, Debug, Default)]
pub struct SystemReading {
    pub os: String,
    pub distribution: String,
    pub kernel: String,
    pub architecture: String,
    pub boot_epoch: u64,
}

/// OS name, distribution, kernel, architecture and boot time.
#[derive(Default)]
pub struct SystemCollector;

impl SystemCollector {
    pub fn new() -> Self {
        Self
    }

    fn read(&self) -> SystemReading {
        // uname first, sysinfo when the syscall fails
        let (sysname, release, machine) = match uname() {
            Ok(u) => (
                Some(u.sysname().to_string_lossy().into_owned()),
                Some(u.release().to_string_lossy().into_owned()),
                Some(u.machine().to_string_lossy().into_owned()),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "uname failed");
                (None, None, None)
            }
        };

        SystemReading {
            os: sysname
                .or_else(System::name)
                .unwrap_or_else(|| "Unknown".into()),
            distribution: distribution(),
            kernel: release
                .or_else(System::kernel_version)
                .unwrap_or_else(|| "Unknown".into()),
            architecture: machine
                .unwrap_or_else(|| std::env::consts::ARCH.to_string()),
            boot_epoch: System::boot_time(),
        }
    }
}

impl Collector for SystemCollector {
    fn category(&self) -> Category {
        Category::System
    }

    fn collect(&mut self) -> Result<CategorySnapshot, CollectError> {
        Ok(system_snapshot(&self.read(), &Local))
    }
}

/// `PRETTY_NAME` from os-release, falling back to sysinfo's OS description.
fn distribution() -> String {
    // /etc/os-release wins over the vendor copy in /usr/lib
    OS_RELEASE_PATHS
        .iter()
        .filter_map(|p| std::fs::read_to_string(p).ok())
        .find_map(|text| pretty_name(&text))
        .or_else(System::long_os_version)
        .unwrap_or_else(|| "Unknown".into())
}

/// Extracts the unquoted `PRETTY_NAME` value from os-release contents.
fn pretty_name(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .filter_map(|l| l.trim().strip_prefix("PRETTY_NAME="))
        .map(|v| {
            v.trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .to_string()
        })
        .find(|v| !v.is_empty())
}

/// Renders a boot epoch as `YYYY-MM-DD HH:MM:SS` in the given zone.
pub fn format_boot_time<Tz: TimeZone>(epoch: u64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    i64::try_from(epoch)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(tz).format(BOOT_TIME_FORMAT).to_string())
        .unwrap_or_else(|| "Unknown".into())
}

/// Formats a system reading into table rows.
pub fn system_snapshot<Tz: TimeZone>(r: &SystemReading, tz: &Tz) -> CategorySnapshot
where
    Tz::Offset: std::fmt::Display,
{
    let mut s = CategorySnapshot::new(Category::System);
    s.push_header("System Information");
    s.push("OS", r.os.as_str());
    s.push("Distribution", r.distribution.as_str());
    s.push("Kernel Version", r.kernel.as_str());
    s.push("Architecture", r.architecture.as_str());
    s.push("Boot Time", format_boot_time(r.boot_epoch, tz));
    s
}
