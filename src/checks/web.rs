// src/checks/web.rs
use super::strategy::{CheckOutcome, CheckStrategy};
use crate::config::{MonitorConfig, ServiceKind};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Single GET against the configured URL; 2xx is reachable.
pub struct WebCheck {
    client: Client,
}

impl WebCheck {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    pub async fn check(&self, url: &str) -> CheckOutcome {
        if url.is_empty() {
            return CheckOutcome::indeterminate("URL monitoring requires the --url flag to be set.");
        }

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return CheckOutcome::error(format!("Error checking URL {}: {}", url, e)),
        };

        let status = response.status();
        // Release the connection before reporting.
        drop(response);

        if status.is_success() {
            CheckOutcome::reachable(format!("URL {} is reachable (Status: {})", url, status))
        } else {
            CheckOutcome::unreachable(format!("URL {} returned status: {}", url, status))
        }
    }
}

#[async_trait]
impl CheckStrategy for WebCheck {
    async fn run(&self, config: &MonitorConfig) -> CheckOutcome {
        self.check(config.url.as_deref().unwrap_or_default()).await
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Web
    }
}
