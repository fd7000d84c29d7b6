//! Other Unix flavours: macOS, Solaris / illumos and the BSDs.

use super::{OperatingSystem, OsFamily};

/// Apple macOS.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacOs;

impl MacOs {
    /// Marketing name of a macOS release.
    pub fn release_name(major: u32, minor: u32) -> Option<&'static str> {
        let name = match (major, minor) {
            (26, _) => "Tahoe",
            (15, _) => "Sequoia",
            (14, _) => "Sonoma",
            (13, _) => "Ventura",
            (12, _) => "Monterey",
            (11, _) => "Big Sur",
            (10, 15) => "Catalina",
            (10, 14) => "Mojave",
            (10, 13) => "High Sierra",
            (10, 12) => "Sierra",
            _ => return None,
        };
        Some(name)
    }
}

impl OperatingSystem for MacOs {
    fn family(&self) -> OsFamily {
        OsFamily::MacOs
    }

    fn display_name(&self) -> String {
        match self.version() {
            Some(v) => match Self::release_name(v.major, v.minor) {
                Some(release) => format!("macOS {} {}", release, v),
                None => format!("macOS {}", v),
            },
            None => "macOS".to_string(),
        }
    }
}

/// Solaris and illumos.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarisOs;

impl OperatingSystem for SolarisOs {
    fn family(&self) -> OsFamily {
        OsFamily::Solaris
    }
}

/// FreeBSD, OpenBSD, NetBSD, DragonFly.
#[derive(Debug, Clone, Copy, Default)]
pub struct BsdOs;

impl OperatingSystem for BsdOs {
    fn family(&self) -> OsFamily {
        OsFamily::Bsd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_names() {
        assert_eq!(MacOs::release_name(14, 2), Some("Sonoma"));
        assert_eq!(MacOs::release_name(10, 15), Some("Catalina"));
        assert_eq!(MacOs::release_name(10, 4), None);
    }
}
