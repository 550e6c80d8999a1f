use std::sync::Arc;

use tonic::{Request, Response, Status};

use quorumkv_core::{NodesFinder, RecordID, Router};

use crate::error::error_to_status;
use crate::router::router_service_server::RouterService;
use crate::router::{
    HeartbeatRequest, HeartbeatResponse, ListRequest, ListResponse, NodesFindRequest, NodesFindResponse,
};

/// Exposes a [`Router`] as a gRPC service so nodes and frontends can reach it.
pub struct RouterServiceImpl<F> {
    router: Arc<Router<F>>,
}

impl<F> RouterServiceImpl<F> {
    pub fn new(router: Arc<Router<F>>) -> Self {
        Self { router }
    }
}

#[tonic::async_trait]
impl<F: NodesFinder + Send + Sync + 'static> RouterService for RouterServiceImpl<F> {
    async fn nodes_find(
        &self,
        request: Request<NodesFindRequest>,
    ) -> std::result::Result<Response<NodesFindResponse>, Status> {
        let req = request.into_inner();

        let nodes = self
            .router
            .nodes_find(RecordID(req.key))
            .map_err(error_to_status)?;

        Ok(Response::new(NodesFindResponse {
            nodes: nodes.iter().map(ToString::to_string).collect(),
        }))
    }

    async fn list(&self, _request: Request<ListRequest>) -> std::result::Result<Response<ListResponse>, Status> {
        Ok(Response::new(ListResponse {
            nodes: self.router.list().iter().map(ToString::to_string).collect(),
        }))
    }

    async fn heartbeat(
        &self,
        request: Request<HeartbeatRequest>,
    ) -> std::result::Result<Response<HeartbeatResponse>, Status> {
        let req = request.into_inner();

        let node = req
            .node
            .parse()
            .map_err(|_| Status::invalid_argument("malformed node address"))?;

        self.router.heartbeat(node).map_err(error_to_status)?;

        Ok(Response::new(HeartbeatResponse {}))
    }
}
