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
    /// address this node listens on for Put/Get/Del RPCs.
    ///
    pub listen: SocketAddr,
    ///
    /// address this node advertises to the router and is reached at by
    /// frontends; usually equal to `listen`, but may differ behind NAT.
    ///
    #[serde(default)]
    pub external: Option<SocketAddr>,
    ///
    /// address of the router this node heartbeats to.
    ///
    pub router: SocketAddr,
    ///
    /// interval between heartbeats. Must stay comfortably below the
    /// router's forget timeout.
    ///
    #[serde(default = "Config::heartbeat_secs")]
    pub heartbeat_secs: u64,
    #[serde(default)]
    pub log: Log,
}

impl Config {
    fn heartbeat_secs() -> u64 {
        5
    }

    pub fn heartbeat(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }

    pub fn external_addr(&self) -> SocketAddr {
        self.external.unwrap_or(self.listen)
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
    /// Example: node --config /etc/quorumkv/node.toml
    ///
    #[arg(long, short)]
    config: String,
}
