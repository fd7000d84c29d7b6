//! Linux platform facts
//!
//! Distribution identity comes from `os-release(5)`.

use std::collections::HashMap;

use super::version::OsVersion;
use super::{OperatingSystem, OsFamily};

const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];

/// Distribution fields of an `os-release` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version_id: Option<String>,
    pub pretty_name: Option<String>,
}

/// Linux distributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxOs;

impl LinuxOs {
    /// Parses `KEY=value` lines; values may be single or double quoted.
    pub fn parse_os_release(text: &str) -> OsRelease {
        let fields: HashMap<&str, String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), unquote(value.trim())))
            .collect();

        let field = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();
        OsRelease {
            id: field("ID"),
            name: field("NAME"),
            version_id: field("VERSION_ID"),
            pretty_name: field("PRETTY_NAME"),
        }
    }

    /// Reads the first available `os-release` file.
    pub fn os_release(&self) -> Option<OsRelease> {
        OS_RELEASE_PATHS
            .iter()
            .find_map(|path| std::fs::read_to_string(path).ok())
            .map(|text| Self::parse_os_release(&text))
    }
}

fn unquote(value: &str) -> String {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    stripped.replace("\\\"", "\"")
}

impl OperatingSystem for LinuxOs {
    fn family(&self) -> OsFamily {
        OsFamily::Linux
    }

    fn name(&self) -> String {
        self.os_release()
            .and_then(|release| release.name)
            .unwrap_or_else(|| "Linux".to_string())
    }

    fn version(&self) -> Option<OsVersion> {
        self.os_release()
            .and_then(|release| release.version_id)
            .and_then(|v| OsVersion::parse(&v))
    }

    fn display_name(&self) -> String {
        let pretty = self.os_release().and_then(|release| release.pretty_name);
        match (pretty, self.kernel_version()) {
            (Some(pretty), Some(kernel)) => format!("{} (kernel {})", pretty, kernel),
            (Some(pretty), None) => pretty,
            (None, Some(kernel)) => format!("Linux {}", kernel),
            (None, None) => "Linux".to_string(),
        }
    }
}
