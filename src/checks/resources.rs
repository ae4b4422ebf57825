// src/checks/resources.rs
use super::strategy::{CheckOutcome, CheckStrategy};
use crate::config::{MonitorConfig, ServiceKind};
use crate::format::format_bytes;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::System;

/// Window over which CPU utilisation is averaged.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
}

impl MemoryStats {
    pub fn used_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("resource sampling unavailable on this platform")]
    Unsupported,

    #[error("no CPU statistics reported")]
    NoCpu,

    #[error("no memory statistics reported")]
    NoMemory,
}

/// OS CPU/memory sampler. Calls may block.
pub trait ResourceSampler: Send + Sync {
    fn cpu_percent(&self, window: Duration) -> Result<f64, SampleError>;

    fn memory(&self) -> Result<MemoryStats, SampleError>;
}

#[derive(Debug, Default)]
pub struct SysinfoSampler;

impl ResourceSampler for SysinfoSampler {
    fn cpu_percent(&self, window: Duration) -> Result<f64, SampleError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SampleError::Unsupported);
        }

        let mut sys = System::new();
        sys.refresh_cpu_usage();
        std::thread::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu_usage();

        if sys.cpus().is_empty() {
            return Err(SampleError::NoCpu);
        }
        Ok(sys.global_cpu_info().cpu_usage() as f64)
    }

    fn memory(&self) -> Result<MemoryStats, SampleError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SampleError::Unsupported);
        }

        let mut sys = System::new();
        sys.refresh_memory();

        let stats = MemoryStats {
            total: sys.total_memory(),
            used: sys.used_memory(),
        };
        if stats.total == 0 {
            return Err(SampleError::NoMemory);
        }
        Ok(stats)
    }
}

pub struct CpuCheck {
    sampler: Arc<dyn ResourceSampler>,
}

impl CpuCheck {
    pub fn new(sampler: Arc<dyn ResourceSampler>) -> Self {
        Self { sampler }
    }

    pub fn check(&self) -> CheckOutcome {
        match self.sampler.cpu_percent(CPU_SAMPLE_WINDOW) {
            Ok(percent) => CheckOutcome::reachable(format!("CPU Usage: {:.2}%", percent)),
            Err(e) => CheckOutcome::error(format!("Error getting CPU usage: {}", e)),
        }
    }
}

#[async_trait]
impl CheckStrategy for CpuCheck {
    async fn run(&self, _config: &MonitorConfig) -> CheckOutcome {
        let sampler = self.sampler.clone();
        tokio::task::spawn_blocking(move || CpuCheck { sampler }.check())
            .await
            .unwrap_or_else(|e| CheckOutcome::error(format!("CPU check task failed: {}", e)))
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Cpu
    }
}

pub struct MemoryCheck {
    sampler: Arc<dyn ResourceSampler>,
}

impl MemoryCheck {
    pub fn new(sampler: Arc<dyn ResourceSampler>) -> Self {
        Self { sampler }
    }

    pub fn check(&self) -> CheckOutcome {
        match self.sampler.memory() {
            Ok(stats) => CheckOutcome::reachable(format!(
                "Memory Usage: {:.2}% (Used: {} / Total: {})",
                stats.used_percent(),
                format_bytes(stats.used),
                format_bytes(stats.total)
            )),
            Err(e) => CheckOutcome::error(format!("Error getting memory usage: {}", e)),
        }
    }
}

#[async_trait]
impl CheckStrategy for MemoryCheck {
    async fn run(&self, _config: &MonitorConfig) -> CheckOutcome {
        let sampler = self.sampler.clone();
        tokio::task::spawn_blocking(move || MemoryCheck { sampler }.check())
            .await
            .unwrap_or_else(|e| CheckOutcome::error(format!("Memory check task failed: {}", e)))
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Memory
    }
}
