use std::fmt;
use std::str::FromStr;

use crate::errors::CommonsError;

/// Dotted operating system version.
///
/// Parsing keeps up to three numeric components and treats whatever follows
/// the numeric prefix as a build suffix: `5.15.0-86-generic` parses as
/// `5.15.0` with build `86-generic`. Missing components are zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: Option<String>,
}

impl OsVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build: None,
        }
    }

    /// `None` when `raw` does not start with a number.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let numeric_end = raw
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(raw.len());
        let (numeric, rest) = raw.split_at(numeric_end);

        let mut parts = numeric
            .split('.')
            .filter(|p| !p.is_empty())
            .map(str::parse::<u32>);
        let major = parts.next()?.ok()?;
        let minor = parts.next().and_then(|p| p.ok()).unwrap_or(0);
        let patch = parts.next().and_then(|p| p.ok()).unwrap_or(0);

        let build = rest
            .trim_start_matches(['-', '+', '_', ' ', '('])
            .trim_end_matches(')')
            .trim();

        Some(Self {
            major,
            minor,
            patch,
            build: (!build.is_empty()).then(|| build.to_string()),
        })
    }

    /// True when this version is at least `major.minor`.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl FromStr for OsVersion {
    type Err = CommonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CommonsError::parse(format!("Invalid OS version: '{}'", s)))
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(build) = &self.build {
            write!(f, "-{}", build)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_suffixed() {
        assert_eq!(OsVersion::parse("10.0.19045"), Some(OsVersion::new(10, 0, 19045)));

        let kernel = OsVersion::parse("5.15.0-86-generic").unwrap();
        assert_eq!((kernel.major, kernel.minor, kernel.patch), (5, 15, 0));
        assert_eq!(kernel.build.as_deref(), Some("86-generic"));
        assert_eq!(kernel.to_string(), "5.15.0-86-generic");

        assert_eq!(OsVersion::parse("14"), Some(OsVersion::new(14, 0, 0)));
        assert_eq!(OsVersion::parse("11 (22631)").unwrap().build.as_deref(), Some("22631"));
        assert!(OsVersion::parse("unknown").is_none());
        assert!("".parse::<OsVersion>().is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        let older = OsVersion::parse("10.9.5").unwrap();
        let newer = OsVersion::parse("10.10").unwrap();
        assert!(older < newer);
        assert!(newer.at_least(10, 10));
        assert!(!older.at_least(10, 10));
    }
}
