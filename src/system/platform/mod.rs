//! Operating system introspection
//!
//! This module identifies the host operating system and exposes a
//! per-family [`OperatingSystem`] singleton for family-specific facts.
//!
//! # Architecture
//! - `windows.rs`: Windows editions by NT build number
//! - `linux.rs`: distributions via `os-release`
//! - `android.rs`: API level naming
//! - `unix.rs`: macOS, Solaris, BSD
//! - `version.rs`: tolerant dotted version parsing
//! - `hardware.rs`: CPU and memory facts
//!
//! Generic facts (OS name, version, kernel, host name) come from `sysinfo`;
//! upper layers use [`OsInfo::current`] or [`OsInfo::platform`].

mod android;
mod hardware;
mod linux;
mod unix;
mod version;
mod windows;

use once_cell::sync::Lazy;
use strum::{AsRefStr, Display, EnumIter};
use sysinfo::System;
use tracing::debug;

pub use android::AndroidOs;
pub use hardware::HardwareInfo;
pub use linux::{LinuxOs, OsRelease};
pub use unix::{BsdOs, MacOs, SolarisOs};
pub use version::OsVersion;
pub use windows::WindowsOs;

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum OsFamily {
    Windows,
    Linux,
    #[strum(serialize = "macOS")]
    MacOs,
    Solaris,
    Android,
    #[strum(serialize = "BSD")]
    Bsd,
    Unknown,
}

impl OsFamily {
    /// Family of the running process.
    pub fn detect() -> Self {
        Self::from_target(
            std::env::consts::OS,
            std::env::var_os("ANDROID_ROOT").is_some(),
        )
    }

    /// Maps a `std::env::consts::OS` value; Linux with an Android root is
    /// reported as Android.
    pub fn from_target(os: &str, android_root: bool) -> Self {
        match os {
            "windows" => OsFamily::Windows,
            "linux" if android_root => OsFamily::Android,
            "linux" => OsFamily::Linux,
            "android" => OsFamily::Android,
            "macos" => OsFamily::MacOs,
            "solaris" | "illumos" => OsFamily::Solaris,
            "freebsd" | "openbsd" | "netbsd" | "dragonfly" => OsFamily::Bsd,
            _ => OsFamily::Unknown,
        }
    }

    pub fn is_unix(self) -> bool {
        !matches!(self, OsFamily::Windows | OsFamily::Unknown)
    }
}

/// Family-specific view of the host operating system.
///
/// Defaults read generic facts from `sysinfo`; implementors override what
/// their family knows better.
pub trait OperatingSystem: Send + Sync {
    fn family(&self) -> OsFamily;

    fn name(&self) -> String {
        System::name().unwrap_or_else(|| self.family().to_string())
    }

    fn version(&self) -> Option<OsVersion> {
        System::os_version().and_then(|v| OsVersion::parse(&v))
    }

    fn kernel_version(&self) -> Option<String> {
        System::kernel_version()
    }

    fn display_name(&self) -> String {
        match self.version() {
            Some(version) => format!("{} {}", self.name(), version),
            None => self.name(),
        }
    }
}

/// Generic fallback when the family is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownOs;

impl OperatingSystem for UnknownOs {
    fn family(&self) -> OsFamily {
        OsFamily::Unknown
    }
}

/// Singleton for `family`.
pub fn platform_for(family: OsFamily) -> &'static dyn OperatingSystem {
    match family {
        OsFamily::Windows => &WindowsOs,
        OsFamily::Linux => &LinuxOs,
        OsFamily::MacOs => &MacOs,
        OsFamily::Solaris => &SolarisOs,
        OsFamily::Android => &AndroidOs,
        OsFamily::Bsd => &BsdOs,
        OsFamily::Unknown => &UnknownOs,
    }
}

/// Snapshot of the host operating system, collected once per process.
#[derive(Debug, Clone)]
pub struct OsInfo {
    pub family: OsFamily,
    pub name: String,
    pub version: Option<OsVersion>,
    pub kernel_version: Option<String>,
    pub host_name: Option<String>,
    pub arch: &'static str,
    pub display_name: String,
}

static CURRENT: Lazy<OsInfo> = Lazy::new(OsInfo::collect);

impl OsInfo {
    pub fn current() -> &'static OsInfo {
        &CURRENT
    }

    /// Singleton for the running family.
    pub fn platform() -> &'static dyn OperatingSystem {
        platform_for(Self::current().family)
    }

    fn collect() -> Self {
        let family = OsFamily::detect();
        let os = platform_for(family);
        let info = Self {
            family,
            name: os.name(),
            version: os.version(),
            kernel_version: os.kernel_version(),
            host_name: System::host_name(),
            arch: std::env::consts::ARCH,
            display_name: os.display_name(),
        };
        debug!("Detected operating system: {} ({})", info.display_name, info.arch);
        info
    }

    pub fn is_windows(&self) -> bool {
        self.family == OsFamily::Windows
    }

    pub fn is_linux(&self) -> bool {
        self.family == OsFamily::Linux
    }

    pub fn is_macos(&self) -> bool {
        self.family == OsFamily::MacOs
    }

    pub fn is_unix(&self) -> bool {
        self.family.is_unix()
    }
}
