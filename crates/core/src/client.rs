use crate::error::Result;
use crate::types::{Payload, RecordID, ServiceAddr};

/// Data-plane RPC surface a [`crate::Frontend`] uses to talk to a remote
/// [`crate::Node`].
///
/// Implemented over gRPC by `quorumkv-rpc`; implemented directly over
/// in-process `Node` handles in tests.
pub trait NodeClient: Send + Sync {
    fn put(&self, addr: ServiceAddr, key: RecordID, data: Payload) -> Result<()>;
    fn get(&self, addr: ServiceAddr, key: RecordID) -> Result<Payload>;
    fn del(&self, addr: ServiceAddr, key: RecordID) -> Result<()>;
}

/// RPC surface a [`crate::Frontend`] and a [`crate::Node`] use to talk to
/// the [`crate::Router`].
pub trait RouterClient: Send + Sync {
    fn nodes_find(&self, addr: ServiceAddr, key: RecordID) -> Result<Vec<ServiceAddr>>;
    fn list(&self, addr: ServiceAddr) -> Result<Vec<ServiceAddr>>;
    fn heartbeat(&self, addr: ServiceAddr, node: ServiceAddr) -> Result<()>;
}
