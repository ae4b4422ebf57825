// src/checks/strategy.rs
use crate::config::{MonitorConfig, ServiceKind};
use async_trait::async_trait;
use std::fmt;

/// Classification of a single check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Reachable,
    Unreachable,
    Error,
    /// A required target was not configured; nothing was probed.
    Indeterminate,
}

/// Produced by a strategy, logged by the scheduler, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckOutcome {
    pub fn reachable(detail: impl Into<String>) -> Self {
        Self::new(CheckStatus::Reachable, detail)
    }

    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self::new(CheckStatus::Unreachable, detail)
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self::new(CheckStatus::Error, detail)
    }

    pub fn indeterminate(detail: impl Into<String>) -> Self {
        Self::new(CheckStatus::Indeterminate, detail)
    }

    fn new(status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// A stateless probe of one target kind.
#[async_trait]
pub trait CheckStrategy: Send + Sync {
    async fn run(&self, config: &MonitorConfig) -> CheckOutcome;

    fn kind(&self) -> ServiceKind;
}
