// src/scheduler/runner.rs
use crate::checks::{CheckOutcome, CheckStatus, CheckStrategy};
use crate::config::{ConfigError, MonitorConfig, ServiceKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info, info_span, warn, Instrument, Level};

/// Slack on top of the interval before a tick counts as overrun. Covers the
/// one-second CPU sample at the minimum one-second interval.
pub const OVERRUN_GRACE: Duration = Duration::from_secs(1);

/// Outcomes of one tick, in dispatch order.
pub type TickReport = Vec<(ServiceKind, CheckOutcome)>;

/// Drives the selected checks on a fixed interval.
pub struct Scheduler {
    config: MonitorConfig,
    strategies: Vec<Arc<dyn CheckStrategy>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    overruns: AtomicU64,
}

impl Scheduler {
    /// `strategies` is the ordered set used for "all"; single kinds pick
    /// the matching entries from it.
    pub fn new(config: MonitorConfig, strategies: Vec<Arc<dyn CheckStrategy>>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            strategies,
            shutdown_tx,
            shutdown_rx,
            overruns: AtomicU64::new(0),
        }
    }

    /// Ticks whose dispatch outlasted the interval plus `OVERRUN_GRACE`.
    pub fn overruns(&self) -> u64 {
        self.overruns.load(Ordering::Relaxed)
    }

    /// Lines announced at startup. Empty in silent mode.
    pub fn startup_banner(&self) -> Vec<String> {
        if self.config.is_silent() {
            return Vec::new();
        }

        vec![
            format!("Starting monitoring task: {}", self.config.service),
            format!("Check interval: {} seconds", self.config.interval().as_secs()),
        ]
    }

    /// Runs until `shutdown` is called. Fails only on an unknown service kind.
    pub async fn run(&self) -> Result<(), ConfigError> {
        let kind = match self.config.service_kind() {
            Ok(kind) => kind,
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };

        if self.config.is_silent() {
            println!("Silent mode enabled. No logs will be printed.");
        }
        for line in self.startup_banner() {
            info!("{}", line);
        }

        let period = self.config.interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        let mut shutdown_rx = self.shutdown_rx.clone();
        let mut tick: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }

                    tick += 1;
                    let started = Instant::now();
                    self.run_tick(kind)
                        .instrument(info_span!("tick", tick))
                        .await;

                    let elapsed = started.elapsed();
                    if overran(elapsed, period) {
                        self.overruns.fetch_add(1, Ordering::Relaxed);
                        warn!(
                            "Tick {} overran the {:?} interval (took {:?})",
                            tick, period, elapsed
                        );
                    }
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Monitor shutting down");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// One round of dispatch. Checks run one after another; shutdown is
    /// honoured between checks, never during one.
    pub async fn run_tick(&self, kind: ServiceKind) -> TickReport {
        let batch = kind == ServiceKind::All;
        let mut report = Vec::new();

        if batch {
            info!("--- Monitoring All ---");
        }

        for strategy in self
            .strategies
            .iter()
            .filter(|s| batch || s.kind() == kind)
        {
            if *self.shutdown_rx.borrow() {
                debug!("Shutdown requested, skipping remaining checks");
                break;
            }

            let outcome = self.dispatch(strategy.as_ref()).await;
            log_outcome(&outcome);
            report.push((strategy.kind(), outcome));
        }

        if batch {
            info!("----------------------");
        }

        report
    }

    async fn dispatch(&self, strategy: &dyn CheckStrategy) -> CheckOutcome {
        let kind = strategy.kind();
        let limit = self.config.check_timeout();

        timeout(limit, strategy.run(&self.config))
            .instrument(info_span!("check", check = %kind))
            .await
            .unwrap_or_else(|_| {
                CheckOutcome::error(format!(
                    "{} check timed out after {}s",
                    kind,
                    limit.as_secs()
                ))
            })
    }
}

fn overran(elapsed: Duration, period: Duration) -> bool {
    elapsed > period + OVERRUN_GRACE
}

/// Missing targets and negative results are routine; only failures are errors.
fn outcome_level(status: CheckStatus) -> Level {
    match status {
        CheckStatus::Reachable | CheckStatus::Unreachable | CheckStatus::Indeterminate => {
            Level::INFO
        }
        CheckStatus::Error => Level::ERROR,
    }
}

fn log_outcome(outcome: &CheckOutcome) {
    if outcome_level(outcome.status) == Level::ERROR {
        error!("{}", outcome);
    } else {
        info!("{}", outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct SlowCheck {
        delay: Duration,
    }

    #[async_trait]
    impl CheckStrategy for SlowCheck {
        async fn run(&self, _config: &MonitorConfig) -> CheckOutcome {
            tokio::time::sleep(self.delay).await;
            CheckOutcome::reachable("done")
        }

        fn kind(&self) -> ServiceKind {
            ServiceKind::Web
        }
    }

    struct CountingCheck {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CheckStrategy for CountingCheck {
        async fn run(&self, _config: &MonitorConfig) -> CheckOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CheckOutcome::reachable("counted")
        }

        fn kind(&self) -> ServiceKind {
            ServiceKind::Cpu
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_check_is_bounded() {
        let config = MonitorConfig {
            service: "web".to_string(),
            check_timeout_secs: 5,
            ..MonitorConfig::default()
        };
        let scheduler = Scheduler::new(
            config,
            vec![Arc::new(SlowCheck {
                delay: Duration::from_secs(600),
            })],
        );

        let report = scheduler.run_tick(ServiceKind::Web).await;

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].1.status, CheckStatus::Error);
        assert_eq!(report[0].1.detail, "web check timed out after 5s");
    }

    #[tokio::test]
    async fn test_single_kind_only_runs_matching_strategy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scheduler = Scheduler::new(
            MonitorConfig::default(),
            vec![
                Arc::new(SlowCheck {
                    delay: Duration::ZERO,
                }),
                Arc::new(CountingCheck {
                    calls: calls.clone(),
                }),
            ],
        );

        let report = scheduler.run_tick(ServiceKind::Cpu).await;

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].0, ServiceKind::Cpu);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_skips_pending_checks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scheduler = Scheduler::new(
            MonitorConfig::default(),
            vec![Arc::new(CountingCheck {
                calls: calls.clone(),
            })],
        );

        scheduler.shutdown();
        let report = scheduler.run_tick(ServiceKind::All).await;

        assert!(report.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_only_errors_log_above_info() {
        assert_eq!(outcome_level(CheckStatus::Indeterminate), Level::INFO);
        assert_eq!(outcome_level(CheckStatus::Unreachable), Level::INFO);
        assert_eq!(outcome_level(CheckStatus::Reachable), Level::INFO);
        assert_eq!(outcome_level(CheckStatus::Error), Level::ERROR);
    }

    #[test]
    fn test_overrun_allows_grace() {
        let period = Duration::from_secs(1);

        assert!(!overran(Duration::from_millis(1_001), period));
        assert!(!overran(period + OVERRUN_GRACE, period));
        assert!(overran(Duration::from_millis(2_001), period));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_tick_is_counted_as_overrun() {
        let config = MonitorConfig {
            service: "web".to_string(),
            interval_secs: 10,
            check_timeout_secs: 60,
            ..MonitorConfig::default()
        };
        let scheduler = Arc::new(Scheduler::new(
            config,
            vec![Arc::new(SlowCheck {
                delay: Duration::from_secs(25),
            })],
        ));

        let runner = scheduler.clone();
        let handle = tokio::spawn(async move { runner.run().await });

        // First tick starts at 10s and is still in flight at 30s.
        tokio::time::sleep(Duration::from_secs(30)).await;
        scheduler.shutdown();
        handle.await.unwrap().unwrap();

        assert_eq!(scheduler.overruns(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_within_grace_is_not_overrun() {
        let config = MonitorConfig {
            service: "web".to_string(),
            interval_secs: 1,
            ..MonitorConfig::default()
        };
        let scheduler = Arc::new(Scheduler::new(
            config,
            vec![Arc::new(SlowCheck {
                delay: Duration::from_millis(1_500),
            })],
        ));

        let runner = scheduler.clone();
        let handle = tokio::spawn(async move { runner.run().await });

        tokio::time::sleep(Duration::from_secs(10)).await;
        scheduler.shutdown();
        handle.await.unwrap().unwrap();

        assert_eq!(scheduler.overruns(), 0);
    }

    #[test]
    fn test_banner_reflects_config() {
        let config = MonitorConfig {
            service: "ping".to_string(),
            interval_secs: 5,
            ..MonitorConfig::default()
        };
        let scheduler = Scheduler::new(config, Vec::new());

        assert_eq!(
            scheduler.startup_banner(),
            vec![
                "Starting monitoring task: ping".to_string(),
                "Check interval: 5 seconds".to_string(),
            ]
        );
    }
}
