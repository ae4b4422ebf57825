// src/checks/host.rs
use super::strategy::{CheckOutcome, CheckStrategy};
use crate::config::{MonitorConfig, ServiceKind};
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Ports probed in order; the first that accepts a connection wins.
pub const PROBE_PORTS: [u16; 2] = [80, 443];
pub const DIAL_TIMEOUT: Duration = Duration::from_secs(2);

/// TCP dialer. A successful dial closes the connection before returning.
#[async_trait]
pub trait TcpDialer: Send + Sync {
    async fn dial(&self, addr: &str, timeout: Duration) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct TokioDialer;

#[async_trait]
impl TcpDialer for TokioDialer {
    async fn dial(&self, addr: &str, limit: Duration) -> io::Result<()> {
        let stream = timeout(limit, TcpStream::connect(addr))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connection timed out"))??;
        drop(stream);
        Ok(())
    }
}

/// `host:port`, bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Reachability heuristic: something accepts TCP on a common port.
pub struct HostCheck {
    dialer: Arc<dyn TcpDialer>,
    ports: Vec<u16>,
}

impl HostCheck {
    pub fn new(dialer: Arc<dyn TcpDialer>) -> Self {
        Self {
            dialer,
            ports: PROBE_PORTS.to_vec(),
        }
    }

    pub fn with_ports(mut self, ports: Vec<u16>) -> Self {
        self.ports = ports;
        self
    }

    pub async fn check(&self, host: &str) -> CheckOutcome {
        if host.is_empty() {
            return CheckOutcome::indeterminate(
                "Host/IP monitoring requires the --host flag to be set.",
            );
        }

        for &port in &self.ports {
            let addr = join_host_port(host, port);
            match self.dialer.dial(&addr, DIAL_TIMEOUT).await {
                Ok(()) => {
                    return CheckOutcome::reachable(format!(
                        "Host {} is reachable (checked port {})",
                        host, port
                    ))
                }
                Err(e) => tracing::debug!("Dial {} failed: {}", addr, e),
            }
        }

        CheckOutcome::unreachable(format!(
            "Host {} appears unreachable (checked ports: {:?})",
            host, self.ports
        ))
    }
}

#[async_trait]
impl CheckStrategy for HostCheck {
    async fn run(&self, config: &MonitorConfig) -> CheckOutcome {
        self.check(config.host.as_deref().unwrap_or_default()).await
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Ping
    }
}
