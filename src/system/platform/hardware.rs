use sysinfo::System;
use tracing::debug;

/// CPU and memory facts of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareInfo {
    pub logical_cpus: usize,
    pub physical_cpus: usize,
    /// 字节
    pub total_memory: u64,
    /// 字节
    pub available_memory: u64,
}

impl HardwareInfo {
    /// Samples the host now. Memory figures change between calls.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();

        let info = Self {
            logical_cpus: num_cpus::get(),
            physical_cpus: num_cpus::get_physical(),
            total_memory: sys.total_memory(),
            available_memory: sys.available_memory(),
        };
        debug!(
            "Hardware: {} logical / {} physical CPUs, {} MiB total memory",
            info.logical_cpus,
            info.physical_cpus,
            info.total_memory / (1024 * 1024)
        );
        info
    }

    pub fn used_memory(&self) -> u64 {
        self.total_memory.saturating_sub(self.available_memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_reports_cpus() {
        let info = HardwareInfo::collect();
        assert!(info.logical_cpus >= 1);
        assert!(info.physical_cpus >= 1);
        assert!(info.used_memory() <= info.total_memory);
    }
}
