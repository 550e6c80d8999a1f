use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{RecvTimeoutError, SyncSender, sync_channel};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::client::RouterClient;
use crate::error::{Error, Result};
use crate::types::{Payload, RecordID, ServiceAddr};

/// Construction parameters for a [`Node`].
pub struct NodeOptions<R> {
    pub addr: ServiceAddr,
    pub router_addr: ServiceAddr,
    pub router: R,
    /// Interval between heartbeats once [`Node::heartbeats`] is running.
    pub heartbeat: Duration,
}

struct Inner<R> {
    addr: ServiceAddr,
    router_addr: ServiceAddr,
    router: R,
    heartbeat: Duration,
    data: Mutex<HashMap<RecordID, Payload>>,
}

/// Lifecycle of the background heartbeat activity.
///
/// A plain `Option<SyncSender<()>>` can't tell "never started" apart from
/// "already stopped", which let a stopped node silently restart. Keeping
/// the three states distinct makes the one-way Running -> Stopped
/// transition enforceable.
enum HeartbeatState {
    NotStarted,
    Running(SyncSender<()>),
    Stopped,
}

/// A single storage replica: an in-memory `RecordID -> Payload` map plus a
/// background activity that heartbeats to a [`crate::Router`].
///
/// All data-plane operations serialize on one mutex; there is no sharding.
/// This makes Put/Get/Del linearizable per node, which is the property the
/// frontend's quorum protocol is built on top of.
pub struct Node<R> {
    inner: Arc<Inner<R>>,
    heartbeat_state: Mutex<HeartbeatState>,
}

impl<R: RouterClient + 'static> Node<R> {
    pub fn new(options: NodeOptions<R>) -> Self {
        Self {
            inner: Arc::new(Inner {
                addr: options.addr,
                router_addr: options.router_addr,
                router: options.router,
                heartbeat: options.heartbeat,
                data: Mutex::new(HashMap::new()),
            }),
            heartbeat_state: Mutex::new(HeartbeatState::NotStarted),
        }
    }

    /// Insert `data` under `key`. Fails with [`Error::RecordExists`] if the
    /// key is already present; existing values are never overwritten.
    pub fn put(&self, key: RecordID, data: Payload) -> Result<()> {
        let mut map = self.inner.data.lock();
        if map.contains_key(&key) {
            return Err(Error::RecordExists);
        }

        map.insert(key, data);
        Ok(())
    }

    /// Look up `key`. Fails with [`Error::RecordNotFound`] if absent.
    pub fn get(&self, key: RecordID) -> Result<Payload> {
        let map = self.inner.data.lock();
        map.get(&key).cloned().ok_or(Error::RecordNotFound)
    }

    /// Remove `key`. Fails with [`Error::RecordNotFound`] if absent.
    pub fn del(&self, key: RecordID) -> Result<()> {
        let mut map = self.inner.data.lock();
        map.remove(&key).map(|_| ()).ok_or(Error::RecordNotFound)
    }

    /// Start the background heartbeat activity. Panics if it is already
    /// running, or if it was already stopped — the Running -> Stopped
    /// transition is one-way and cannot be restarted.
    ///
    /// The task waits a full `heartbeat` interval *before* its first tick,
    /// so a freshly started node does not heartbeat immediately; callers
    /// must keep `heartbeat` comfortably below the router's forget timeout.
    /// RPC failures are logged and swallowed — liveness is eventually
    /// consistent and self-heals on the next tick.
    pub fn heartbeats(&self) {
        let mut state = self.heartbeat_state.lock();
        match *state {
            HeartbeatState::NotStarted => {}
            HeartbeatState::Running(_) => panic!("Node::heartbeats is already running"),
            HeartbeatState::Stopped => panic!("Node::heartbeats cannot be restarted after stop"),
        }

        let (tx, rx) = sync_channel::<()>(0);
        *state = HeartbeatState::Running(tx);
        drop(state);

        let inner = self.inner.clone();
        thread::spawn(move || {
            loop {
                match rx.recv_timeout(inner.heartbeat) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        if let Err(e) = inner.router.heartbeat(inner.router_addr, inner.addr) {
                            log::warn!("heartbeat to {} failed: {e}", inner.router_addr);
                        }
                    }
                }
            }
        });
    }

    /// Stop the background heartbeat activity, blocking until the
    /// background thread has observed the signal.
    ///
    /// Single-shot: calling `stop` without a running heartbeat task (either
    /// because one was never started, or because it was already stopped)
    /// panics rather than hanging.
    pub fn stop(&self) {
        let mut state = self.heartbeat_state.lock();
        let sender = match *state {
            HeartbeatState::Running(_) => {
                match std::mem::replace(&mut *state, HeartbeatState::Stopped) {
                    HeartbeatState::Running(tx) => tx,
                    _ => unreachable!(),
                }
            }
            HeartbeatState::NotStarted => {
                panic!("Node::stop called without a running heartbeat task")
            }
            HeartbeatState::Stopped => panic!("Node::stop called twice"),
        };
        drop(state);

        let _ = sender.send(());
    }
}
