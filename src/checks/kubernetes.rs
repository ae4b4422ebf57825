// src/checks/kubernetes.rs
use super::strategy::{CheckOutcome, CheckStrategy};
use crate::config::{resolve_kubeconfig, MonitorConfig, ServiceKind};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::{Client, Config};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("Error building kubeconfig from {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: KubeconfigError,
    },

    #[error("Error creating Kubernetes client: {source}")]
    Client {
        #[source]
        source: kube::Error,
    },

    #[error("Error connecting to Kubernetes cluster ({host}): {source}")]
    Connect {
        host: String,
        #[source]
        source: kube::Error,
    },
}

/// Kubernetes API liveness probe. Returns the cluster host URL on success.
#[async_trait]
pub trait ClusterProbe: Send + Sync {
    async fn probe(&self, kubeconfig: &Path) -> Result<String, ClusterError>;
}

/// Lists at most one namespace through a client built from the kubeconfig.
#[derive(Debug, Default)]
pub struct KubeClusterProbe;

#[async_trait]
impl ClusterProbe for KubeClusterProbe {
    async fn probe(&self, kubeconfig: &Path) -> Result<String, ClusterError> {
        let config_error = |source: KubeconfigError| ClusterError::Config {
            path: kubeconfig.display().to_string(),
            source,
        };

        let raw = Kubeconfig::read_from(kubeconfig).map_err(config_error)?;
        let mut config = Config::from_custom_kubeconfig(raw, &KubeConfigOptions::default())
            .await
            .map_err(config_error)?;
        config.connect_timeout = Some(CONNECT_TIMEOUT);
        config.read_timeout = Some(READ_TIMEOUT);

        let host = config.cluster_url.to_string();
        let client = Client::try_from(config).map_err(|source| ClusterError::Client { source })?;

        let namespaces: Api<Namespace> = Api::all(client);
        namespaces
            .list(&ListParams::default().limit(1))
            .await
            .map_err(|source| ClusterError::Connect {
                host: host.clone(),
                source,
            })?;

        Ok(host)
    }
}

pub struct KubernetesCheck {
    probe: Arc<dyn ClusterProbe>,
}

impl KubernetesCheck {
    pub fn new(probe: Arc<dyn ClusterProbe>) -> Self {
        Self { probe }
    }

    pub async fn check(&self, kubeconfig: Option<&str>) -> CheckOutcome {
        let path = resolve_kubeconfig(kubeconfig);

        match self.probe.probe(&path).await {
            Ok(host) => CheckOutcome::reachable(format!("Kubernetes cluster ({}) is reachable.", host)),
            Err(e) => CheckOutcome::error(e.to_string()),
        }
    }
}

#[async_trait]
impl CheckStrategy for KubernetesCheck {
    async fn run(&self, config: &MonitorConfig) -> CheckOutcome {
        self.check(config.kubeconfig.as_deref()).await
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Kubernetes
    }
}
