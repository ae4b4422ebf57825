// src/cli/mod.rs
use crate::config::{LogMode, MonitorConfig};
use clap::{ArgAction, Args, Parser, Subcommand};

/// Automater - A DevOps automation tool
#[derive(Debug, Parser)]
#[command(name = "automater", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Monitor services, applications, hosts, k8s clusters, or system resources
    Monitor(MonitorArgs),
}

#[derive(Debug, Clone, Args)]
pub struct MonitorArgs {
    /// Service to monitor (web, process, cpu, memory, ping, k8s, all)
    #[arg(short, long, default_value = "all")]
    pub service: String,

    /// Check interval in seconds
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Log output to console; false enables silent mode
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub log: bool,

    /// URL to monitor for 'web' service
    #[arg(long)]
    pub url: Option<String>,

    /// Process ID (PID) to monitor for 'process' service
    #[arg(long, default_value_t = 0)]
    pub pid: u32,

    /// Process name to monitor for 'process' service
    #[arg(long)]
    pub process_name: Option<String>,

    /// Hostname or IP address to check for 'ping' service
    #[arg(long)]
    pub host: Option<String>,

    /// Path to the kubeconfig file (defaults to ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Upper bound in seconds for any single check
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    pub check_timeout: u64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<MonitorArgs> for MonitorConfig {
    fn from(args: MonitorArgs) -> Self {
        Self {
            service: args.service,
            interval_secs: args.interval,
            check_timeout_secs: args.check_timeout,
            log_mode: if args.log {
                LogMode::Verbose
            } else {
                LogMode::Silent
            },
            url: non_empty(args.url),
            pid: (args.pid != 0).then_some(args.pid),
            process_name: non_empty(args.process_name),
            host: non_empty(args.host),
            kubeconfig: non_empty(args.kubeconfig),
        }
    }
}
