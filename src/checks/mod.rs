// src/checks/mod.rs
mod host;
mod kubernetes;
mod process;
mod resources;
mod strategy;
mod web;

pub use host::{join_host_port, HostCheck, TcpDialer, TokioDialer, DIAL_TIMEOUT, PROBE_PORTS};
pub use kubernetes::{ClusterError, ClusterProbe, KubeClusterProbe, KubernetesCheck};
pub use process::{ProcessCheck, ProcessError, ProcessHandle, ProcessTable, SysinfoProcessTable};
pub use resources::{
    CpuCheck, MemoryCheck, MemoryStats, ResourceSampler, SampleError, SysinfoSampler,
    CPU_SAMPLE_WINDOW,
};
pub use strategy::{CheckOutcome, CheckStatus, CheckStrategy};
pub use web::WebCheck;

use anyhow::Result;
use std::sync::Arc;

/// The production strategies, in "all" dispatch order:
/// URL, process, host, Kubernetes, CPU, memory.
pub fn default_strategies() -> Result<Vec<Arc<dyn CheckStrategy>>> {
    let sampler: Arc<dyn ResourceSampler> = Arc::new(SysinfoSampler);

    Ok(vec![
        Arc::new(WebCheck::new()?),
        Arc::new(ProcessCheck::new(Arc::new(SysinfoProcessTable))),
        Arc::new(HostCheck::new(Arc::new(TokioDialer))),
        Arc::new(KubernetesCheck::new(Arc::new(KubeClusterProbe))),
        Arc::new(CpuCheck::new(sampler.clone())),
        Arc::new(MemoryCheck::new(sampler)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceKind;

    #[test]
    fn test_default_order_matches_all_sequence() {
        let kinds: Vec<ServiceKind> = default_strategies()
            .unwrap()
            .iter()
            .map(|s| s.kind())
            .collect();

        assert_eq!(
            kinds,
            vec![
                ServiceKind::Web,
                ServiceKind::Process,
                ServiceKind::Ping,
                ServiceKind::Kubernetes,
                ServiceKind::Cpu,
                ServiceKind::Memory,
            ]
        );
    }
}
