use std::collections::HashMap;
use std::sync::mpsc::channel;
use std::sync::{Arc, OnceLock};
use std::thread;

use crate::client::{NodeClient, RouterClient};
use crate::constants::{INIT_TIMEOUT, MIN_REDUNDANCY};
use crate::error::{Error, Result};
use crate::finder::NodesFinder;
use crate::types::{Payload, RecordID, ServiceAddr};

/// Construction parameters for a [`Frontend`].
pub struct FrontendOptions<N, R, F> {
    pub router_addr: ServiceAddr,
    pub node_client: N,
    pub router_client: R,
    pub finder: F,
}

#[derive(Clone)]
enum WriteOp {
    Put(Payload),
    Del,
}

/// Accepts client reads/writes and runs the quorum protocol across the
/// nodes found for a given key.
///
/// Holds no data of its own; its only cached state is the node roster it
/// lazily pulls from the router on the first [`Frontend::get`] call.
pub struct Frontend<N, R, F> {
    router_addr: ServiceAddr,
    node_client: Arc<N>,
    router_client: Arc<R>,
    finder: F,
    roster: OnceLock<Vec<ServiceAddr>>,
}

impl<N, R, F> Frontend<N, R, F>
where
    N: NodeClient + 'static,
    R: RouterClient + 'static,
    F: NodesFinder,
{
    pub fn new(options: FrontendOptions<N, R, F>) -> Self {
        Self {
            router_addr: options.router_addr,
            node_client: Arc::new(options.node_client),
            router_client: Arc::new(options.router_client),
            finder: options.finder,
            roster: OnceLock::new(),
        }
    }

    /// Insert `data` under `key` across the quorum of nodes the router
    /// places it on. See the module-level write path contract: all
    /// fan-out responses are observed before a result is returned.
    pub fn put(&self, key: RecordID, data: Payload) -> Result<()> {
        let nodes = self.router_client.nodes_find(self.router_addr, key)?;
        self.write_quorum(nodes, key, WriteOp::Put(data))
    }

    /// Remove `key` across the quorum of nodes the router places it on.
    pub fn del(&self, key: RecordID) -> Result<()> {
        let nodes = self.router_client.nodes_find(self.router_addr, key)?;
        self.write_quorum(nodes, key, WriteOp::Del)
    }

    /// Read `key`, returning as soon as a payload or an error reaches
    /// `MinRedundancy` occurrences; slower in-flight replicas are
    /// abandoned, not cancelled.
    ///
    /// The first call to `get` on a given `Frontend` lazily bootstraps the
    /// cached roster by retrying the router's `List` forever with
    /// `InitTimeout` backoff; concurrent first callers block on the same
    /// initialization and every later call reuses the cached result.
    pub fn get(&self, key: RecordID) -> Result<Payload> {
        let roster = self.roster();
        let nodes = self.finder.find(key, roster);

        if nodes.len() < MIN_REDUNDANCY {
            return Err(Error::NotEnoughDaemons);
        }

        let (tx, rx) = channel::<Result<Payload>>();

        for addr in nodes {
            let client = self.node_client.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let _ = tx.send(client.get(addr, key));
            });
        }
        drop(tx);

        let mut payload_counts: HashMap<Payload, usize> = HashMap::new();
        let mut error_counts: HashMap<Error, usize> = HashMap::new();

        while let Ok(result) = rx.recv() {
            match result {
                Ok(payload) => {
                    let count = payload_counts.entry(payload.clone()).or_insert(0);
                    *count += 1;
                    if *count >= MIN_REDUNDANCY {
                        return Ok(payload);
                    }
                }
                Err(e) => {
                    let count = error_counts.entry(e).or_insert(0);
                    *count += 1;
                    if *count >= MIN_REDUNDANCY {
                        return Err(e);
                    }
                }
            }
        }

        Err(Error::QuorumNotReached)
    }

    fn roster(&self) -> &[ServiceAddr] {
        self.roster.get_or_init(|| loop {
            match self.router_client.list(self.router_addr) {
                Ok(nodes) => return nodes,
                Err(e) => {
                    log::warn!("frontend bootstrap: router list failed: {e}, retrying");
                    thread::sleep(INIT_TIMEOUT);
                }
            }
        })
    }

    fn write_quorum(&self, nodes: Vec<ServiceAddr>, key: RecordID, op: WriteOp) -> Result<()> {
        if nodes.len() < MIN_REDUNDANCY {
            return Err(Error::NotEnoughDaemons);
        }

        let (tx, rx) = channel::<Result<()>>();
        let op = Arc::new(op);
        let total = nodes.len();

        for addr in nodes {
            let client = self.node_client.clone();
            let op = op.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let result = match op.as_ref() {
                    WriteOp::Put(data) => client.put(addr, key, data.clone()),
                    WriteOp::Del => client.del(addr, key),
                };
                let _ = tx.send(result);
            });
        }
        drop(tx);

        let mut successes = 0usize;
        let mut error_counts: HashMap<Error, usize> = HashMap::new();

        // Unlike the read path, every fan-out response is observed before a
        // decision is made: the write path never returns early.
        for _ in 0..total {
            let result = rx.recv().expect("a fan-out thread dropped its sender without replying");
            match result {
                Ok(()) => successes += 1,
                Err(e) => *error_counts.entry(e).or_insert(0) += 1,
            }
        }

        if let Some((&e, _)) = error_counts.iter().find(|&(_, &count)| count >= MIN_REDUNDANCY) {
            return Err(e);
        }

        if successes >= MIN_REDUNDANCY {
            Ok(())
        } else {
            Err(Error::QuorumNotReached)
        }
    }
}
