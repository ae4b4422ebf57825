// src/logging.rs
use crate::config::LogMode;
use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparseable.
pub fn default_directives(mode: LogMode) -> &'static str {
    match mode {
        LogMode::Verbose => "automater=info,kube=warn",
        // Silent: only the fatal configuration path reaches the console.
        LogMode::Silent => "automater=error,kube=error",
    }
}

/// `rust_log` (the `RUST_LOG` value) wins over the mode's defaults.
pub fn env_filter(rust_log: Option<&str>, mode: LogMode) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(mode)))
}

/// Line-oriented logging to stderr.
pub fn init(mode: LogMode) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref(), mode))
        .with_writer(std::io::stderr)
        .init();
}
