use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::constants::REPLICATION_FACTOR;
use crate::error::{Error, Result};
use crate::finder::NodesFinder;
use crate::types::{RecordID, ServiceAddr};

/// Construction parameters for a [`Router`].
pub struct RouterOptions<F> {
    pub nodes: Vec<ServiceAddr>,
    pub finder: F,
    /// A node is considered live as long as a heartbeat was accepted from
    /// it within this window.
    pub forget_timeout: Duration,
}

/// Tracks liveness of a fixed set of nodes and answers placement queries
/// over the currently-live subset.
///
/// The node set is fixed at construction; there is no dynamic membership.
/// Freshness is evaluated reactively inside [`Router::nodes_find`] rather
/// than by a background sweeper, keeping the router purely request-driven.
pub struct Router<F> {
    nodes: Vec<ServiceAddr>,
    finder: F,
    forget_timeout: Duration,
    wait: Mutex<HashMap<ServiceAddr, Instant>>,
}

impl<F: NodesFinder> Router<F> {
    /// Build a router. Fails with [`Error::NotEnoughDaemons`] if fewer than
    /// `REPLICATION_FACTOR` nodes are configured.
    ///
    /// Every configured node is seeded with the construction time as its
    /// last-heartbeat instant, giving each one a full `forget_timeout`
    /// grace window before it must heartbeat for the first time.
    pub fn new(options: RouterOptions<F>) -> Result<Self> {
        if options.nodes.len() < REPLICATION_FACTOR {
            return Err(Error::NotEnoughDaemons);
        }

        let start = Instant::now();
        let wait = options.nodes.iter().map(|&addr| (addr, start)).collect();

        Ok(Self {
            nodes: options.nodes,
            finder: options.finder,
            forget_timeout: options.forget_timeout,
            wait: Mutex::new(wait),
        })
    }

    /// Record a heartbeat from `node`. Fails with [`Error::UnknownDaemon`]
    /// if `node` is not part of the configured roster.
    pub fn heartbeat(&self, node: ServiceAddr) -> Result<()> {
        let mut wait = self.wait.lock();
        let slot = wait.get_mut(&node).ok_or(Error::UnknownDaemon)?;
        *slot = Instant::now();
        Ok(())
    }

    /// Find the live candidates for `key`: delegate to the configured
    /// finder over the full roster, then drop any node whose last
    /// heartbeat is older than `forget_timeout`.
    ///
    /// Fails with [`Error::NotEnoughDaemons`] if fewer than `MinRedundancy`
    /// candidates survive the freshness filter.
    pub fn nodes_find(&self, key: RecordID) -> Result<Vec<ServiceAddr>> {
        let wait = self.wait.lock();
        let now = Instant::now();

        let live: Vec<ServiceAddr> = self
            .finder
            .find(key, &self.nodes)
            .into_iter()
            .filter(|addr| {
                wait.get(addr)
                    .is_some_and(|&last| now.duration_since(last) < self.forget_timeout)
            })
            .collect();

        if live.len() < crate::constants::MIN_REDUNDANCY {
            return Err(Error::NotEnoughDaemons);
        }

        Ok(live)
    }

    /// The full configured roster, liveness-independent.
    pub fn list(&self) -> Vec<ServiceAddr> {
        self.nodes.clone()
    }
}
