// src/checks/process.rs
use super::strategy::{CheckOutcome, CheckStrategy};
use crate::config::{MonitorConfig, ServiceKind};
use async_trait::async_trait;
use std::sync::Arc;
use sysinfo::{Pid, ProcessStatus, System};

/// A process as seen through the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: u32,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("process {0} not found")]
    NotFound(u32),

    #[error("process table unavailable on this platform")]
    Unsupported,

    #[error("process query failed: {0}")]
    Query(String),
}

/// OS process table accessor.
pub trait ProcessTable: Send + Sync {
    fn lookup(&self, pid: u32) -> Result<ProcessHandle, ProcessError>;

    /// All running processes, in whatever order the OS reports them.
    fn list(&self) -> Result<Vec<ProcessHandle>, ProcessError>;

    fn is_running(&self, handle: &ProcessHandle) -> Result<bool, ProcessError>;
}

/// `sysinfo`-backed process table. Every call takes a fresh snapshot.
#[derive(Debug, Default)]
pub struct SysinfoProcessTable;

impl SysinfoProcessTable {
    fn snapshot_of(pid: u32) -> Result<Option<(ProcessHandle, ProcessStatus)>, ProcessError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ProcessError::Unsupported);
        }

        let mut sys = System::new();
        let pid = Pid::from_u32(pid);
        if !sys.refresh_process(pid) {
            return Ok(None);
        }

        Ok(sys.process(pid).map(|p| {
            let handle = ProcessHandle {
                pid: p.pid().as_u32(),
                name: p.name().to_string(),
            };
            (handle, p.status())
        }))
    }
}

impl ProcessTable for SysinfoProcessTable {
    fn lookup(&self, pid: u32) -> Result<ProcessHandle, ProcessError> {
        Self::snapshot_of(pid)?
            .map(|(handle, _)| handle)
            .ok_or(ProcessError::NotFound(pid))
    }

    fn list(&self) -> Result<Vec<ProcessHandle>, ProcessError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ProcessError::Unsupported);
        }

        let mut sys = System::new();
        sys.refresh_processes();

        Ok(sys
            .processes()
            .values()
            .map(|p| ProcessHandle {
                pid: p.pid().as_u32(),
                name: p.name().to_string(),
            })
            .collect())
    }

    fn is_running(&self, handle: &ProcessHandle) -> Result<bool, ProcessError> {
        Ok(match Self::snapshot_of(handle.pid)? {
            Some((_, status)) => !matches!(status, ProcessStatus::Zombie | ProcessStatus::Dead),
            None => false,
        })
    }
}

/// Liveness of a process selected by PID or, failing that, by exact name.
pub struct ProcessCheck {
    table: Arc<dyn ProcessTable>,
}

impl ProcessCheck {
    pub fn new(table: Arc<dyn ProcessTable>) -> Self {
        Self { table }
    }

    /// Blocking; the strategy wrapper moves it off the async runtime.
    pub fn check(&self, pid: Option<u32>, name: &str) -> CheckOutcome {
        let label = target_label(pid, name);

        let handle = if let Some(pid) = pid {
            match self.table.lookup(pid) {
                Ok(handle) => handle,
                Err(e) => {
                    return CheckOutcome::error(format!(
                        "Error finding process by PID {}: {}",
                        pid, e
                    ))
                }
            }
        } else if !name.is_empty() {
            let processes = match self.table.list() {
                Ok(processes) => processes,
                Err(e) => return CheckOutcome::error(format!("Error listing processes: {}", e)),
            };
            match processes.into_iter().find(|p| p.name == name) {
                Some(handle) => handle,
                None => {
                    return CheckOutcome::unreachable(format!(
                        "Process with name '{}' not found.",
                        name
                    ))
                }
            }
        } else {
            return CheckOutcome::indeterminate(
                "Process monitoring requires either --pid or --process-name flag.",
            );
        };

        match self.table.is_running(&handle) {
            Ok(true) => CheckOutcome::reachable(format!(
                "Process {} (PID: {}) is running.",
                handle.name, handle.pid
            )),
            Ok(false) => CheckOutcome::unreachable(format!(
                "Process {} is not running.",
                label
            )),
            Err(e) => CheckOutcome::error(format!(
                "Error checking status for process {}: {}",
                label, e
            )),
        }
    }
}

/// `pid/name` when both were given, otherwise whichever one was.
fn target_label(pid: Option<u32>, name: &str) -> String {
    match (pid, name.is_empty()) {
        (Some(pid), false) => format!("{}/{}", pid, name),
        (Some(pid), true) => pid.to_string(),
        (None, _) => name.to_string(),
    }
}

#[async_trait]
impl CheckStrategy for ProcessCheck {
    async fn run(&self, config: &MonitorConfig) -> CheckOutcome {
        let table = self.table.clone();
        let pid = config.pid;
        let name = config.process_name.clone().unwrap_or_default();

        tokio::task::spawn_blocking(move || ProcessCheck { table }.check(pid, &name))
            .await
            .unwrap_or_else(|e| CheckOutcome::error(format!("Process check task failed: {}", e)))
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Process
    }
}
