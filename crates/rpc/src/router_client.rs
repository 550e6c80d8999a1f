use tokio::runtime::Handle;
use tonic::transport::Channel;

use quorumkv_core::{Error, RecordID, Result, RouterClient, ServiceAddr};

use crate::error::status_to_error;
use crate::router::router_service_client::RouterServiceClient;
use crate::router::{HeartbeatRequest, ListRequest, NodesFindRequest};

/// [`RouterClient`] over gRPC. See [`crate::node_client::GrpcNodeClient`]
/// for the connect-per-call tradeoff this adapter makes too.
#[derive(Clone)]
pub struct GrpcRouterClient {
    runtime: Handle,
}

impl GrpcRouterClient {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    async fn connect(addr: ServiceAddr) -> std::result::Result<RouterServiceClient<Channel>, Error> {
        RouterServiceClient::connect(format!("http://{addr}"))
            .await
            .map_err(|_| Error::NotEnoughDaemons)
    }

    fn parse_nodes(nodes: Vec<String>) -> Vec<ServiceAddr> {
        nodes.into_iter().filter_map(|s| s.parse().ok()).collect()
    }
}

impl RouterClient for GrpcRouterClient {
    fn nodes_find(&self, addr: ServiceAddr, key: RecordID) -> Result<Vec<ServiceAddr>> {
        self.runtime.block_on(async move {
            let mut client = Self::connect(addr).await?;
            client
                .nodes_find(NodesFindRequest { key: key.0 })
                .await
                .map(|resp| Self::parse_nodes(resp.into_inner().nodes))
                .map_err(status_to_error)
        })
    }

    fn list(&self, addr: ServiceAddr) -> Result<Vec<ServiceAddr>> {
        self.runtime.block_on(async move {
            let mut client = Self::connect(addr).await?;
            client
                .list(ListRequest {})
                .await
                .map(|resp| Self::parse_nodes(resp.into_inner().nodes))
                .map_err(status_to_error)
        })
    }

    fn heartbeat(&self, addr: ServiceAddr, node: ServiceAddr) -> Result<()> {
        self.runtime.block_on(async move {
            let mut client = Self::connect(addr).await?;
            client
                .heartbeat(HeartbeatRequest { node: node.to_string() })
                .await
                .map(|_| ())
                .map_err(status_to_error)
        })
    }
}
