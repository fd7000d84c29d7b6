//! Windows platform facts
//!
//! Edition naming is derived from the NT build number, which sysinfo
//! reports as the kernel version on Windows.

use super::{OperatingSystem, OsFamily};

/// Windows NT family.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsOs;

impl WindowsOs {
    /// Marketing name for an NT build number.
    pub fn edition_name(build: u32) -> Option<&'static str> {
        match build {
            22000.. => Some("Windows 11"),
            10240.. => Some("Windows 10"),
            9600.. => Some("Windows 8.1"),
            9200.. => Some("Windows 8"),
            7600.. => Some("Windows 7"),
            6000.. => Some("Windows Vista"),
            _ => None,
        }
    }

    /// Build number of the running system.
    pub fn build_number(&self) -> Option<u32> {
        self.kernel_version()
            .and_then(|kernel| kernel.trim().parse().ok())
    }
}

impl OperatingSystem for WindowsOs {
    fn family(&self) -> OsFamily {
        OsFamily::Windows
    }

    fn display_name(&self) -> String {
        let build = self.build_number();
        match (build, build.and_then(Self::edition_name)) {
            (Some(build), Some(edition)) => format!("{} (build {})", edition, build),
            _ => self.name(),
        }
    }
}
