use std::fs::read_to_string;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match value {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => return Err(format!("unknown log level: {value}")),
        })
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    pub fn as_level(&self) -> log::Level {
        match *self {
            Self::Error => log::Level::Error,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Log {
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    ///
    /// address this router listens on for NodesFind/List/Heartbeat RPCs.
    ///
    pub listen: SocketAddr,
    ///
    /// the fixed set of storage nodes this router tracks liveness for.
    /// must contain at least `ReplicationFactor` entries.
    ///
    pub nodes: Vec<SocketAddr>,
    ///
    /// a node is forgotten once this many seconds pass without a heartbeat.
    ///
    #[serde(default = "Config::forget_timeout_secs")]
    pub forget_timeout_secs: u64,
    #[serde(default)]
    pub log: Log,
}

impl Config {
    fn forget_timeout_secs() -> u64 {
        30
    }

    pub fn forget_timeout(&self) -> Duration {
        Duration::from_secs(self.forget_timeout_secs)
    }

    ///
    /// Load configuration from the file named by the `--config` CLI flag.
    ///
    pub fn load() -> Result<Self> {
        Ok(toml::from_str::<Self>(&read_to_string(&Cli::parse().config)?)?)
    }
}

#[derive(Parser, Debug)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION"),
)]
struct Cli {
    ///
    /// Specify the configuration file path.
    ///
    /// Example: router --config /etc/quorumkv/router.toml
    ///
    #[arg(long, short)]
    config: String,
}
