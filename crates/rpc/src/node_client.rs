use tokio::runtime::Handle;
use tonic::transport::Channel;

use quorumkv_core::{Error, NodeClient, Payload, RecordID, Result, ServiceAddr};

use crate::error::status_to_error;
use crate::node::node_service_client::NodeServiceClient;
use crate::node::{DelRequest, GetRequest, PutRequest};

/// [`NodeClient`] over gRPC.
///
/// Dials a fresh connection per call rather than pooling one per address;
/// the fan-out in `quorumkv_core::Frontend` is already short-lived and
/// per-request, so this keeps the adapter stateless at the cost of one
/// extra round trip per call. A connection-pooling version would cache
/// `NodeServiceClient<Channel>` per address behind a mutex.
#[derive(Clone)]
pub struct GrpcNodeClient {
    runtime: Handle,
}

impl GrpcNodeClient {
    /// `runtime` is the Tokio runtime the blocking core trait methods
    /// dispatch onto; callers typically pass `Handle::current()` from
    /// inside their `#[tokio::main]`.
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    async fn connect(addr: ServiceAddr) -> std::result::Result<NodeServiceClient<Channel>, Error> {
        NodeServiceClient::connect(format!("http://{addr}"))
            .await
            .map_err(|_| Error::NotEnoughDaemons)
    }
}

impl NodeClient for GrpcNodeClient {
    fn put(&self, addr: ServiceAddr, key: RecordID, data: Payload) -> Result<()> {
        self.runtime.block_on(async move {
            let mut client = Self::connect(addr).await?;
            client
                .put(PutRequest { key: key.0, data: data.0.to_vec() })
                .await
                .map(|_| ())
                .map_err(status_to_error)
        })
    }

    fn get(&self, addr: ServiceAddr, key: RecordID) -> Result<Payload> {
        self.runtime.block_on(async move {
            let mut client = Self::connect(addr).await?;
            client
                .get(GetRequest { key: key.0 })
                .await
                .map(|resp| Payload::from(resp.into_inner().data))
                .map_err(status_to_error)
        })
    }

    fn del(&self, addr: ServiceAddr, key: RecordID) -> Result<()> {
        self.runtime.block_on(async move {
            let mut client = Self::connect(addr).await?;
            client
                .del(DelRequest { key: key.0 })
                .await
                .map(|_| ())
                .map_err(status_to_error)
        })
    }
}
