use super::{OperatingSystem, OsFamily};

/// Android, detected as Linux with `ANDROID_ROOT` set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidOs;

impl AndroidOs {
    /// Release name for an API level, e.g. 34 -> "14".
    pub fn api_level_name(level: u32) -> Option<&'static str> {
        let name = match level {
            21 => "5.0",
            22 => "5.1",
            23 => "6.0",
            24 => "7.0",
            25 => "7.1",
            26 => "8.0",
            27 => "8.1",
            28 => "9",
            29 => "10",
            30 => "11",
            31 => "12",
            32 => "12L",
            33 => "13",
            34 => "14",
            35 => "15",
            36 => "16",
            _ => return None,
        };
        Some(name)
    }
}

impl OperatingSystem for AndroidOs {
    fn family(&self) -> OsFamily {
        OsFamily::Android
    }

    fn name(&self) -> String {
        "Android".to_string()
    }
}
