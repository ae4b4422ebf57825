// src/config/models.rs
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which check (or checks) run on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Web,
    Process,
    Cpu,
    Memory,
    Ping,
    Kubernetes,
    All,
}

impl ServiceKind {
    /// Selector names in the order they are advertised to operators.
    pub const NAMES: [&'static str; 7] = ["web", "process", "cpu", "memory", "ping", "k8s", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Web => "web",
            ServiceKind::Process => "process",
            ServiceKind::Cpu => "cpu",
            ServiceKind::Memory => "memory",
            ServiceKind::Ping => "ping",
            ServiceKind::Kubernetes => "k8s",
            ServiceKind::All => "all",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(ServiceKind::Web),
            "process" => Ok(ServiceKind::Process),
            "cpu" => Ok(ServiceKind::Cpu),
            "memory" => Ok(ServiceKind::Memory),
            "ping" => Ok(ServiceKind::Ping),
            "k8s" => Ok(ServiceKind::Kubernetes),
            "all" => Ok(ServiceKind::All),
            other => Err(ConfigError::UnknownService(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Verbose,
    Silent,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown service type: {0}. Supported types: web, process, cpu, memory, ping, k8s, all")]
    UnknownService(String),
}

/// Immutable monitoring configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Raw service selector as given on the command line.
    pub service: String,
    pub interval_secs: u64,
    pub check_timeout_secs: u64,
    pub log_mode: LogMode,

    // Per-check targets
    pub url: Option<String>,
    pub pid: Option<u32>,
    pub process_name: Option<String>,
    pub host: Option<String>,
    pub kubeconfig: Option<String>,
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_secs.max(1))
    }

    pub fn is_silent(&self) -> bool {
        self.log_mode == LogMode::Silent
    }

    pub fn service_kind(&self) -> Result<ServiceKind, ConfigError> {
        self.service.parse()
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            service: "all".to_string(),
            interval_secs: 30,
            check_timeout_secs: 15,
            log_mode: LogMode::Verbose,
            url: None,
            pid: None,
            process_name: None,
            host: None,
            kubeconfig: None,
        }
    }
}
