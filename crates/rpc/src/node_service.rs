use std::sync::Arc;

use tonic::{Request, Response, Status};

use quorumkv_core::{Node, Payload, RecordID, RouterClient};

use crate::error::error_to_status;
use crate::node::node_service_server::NodeService;
use crate::node::{DelRequest, DelResponse, GetRequest, GetResponse, PutRequest, PutResponse};

/// Exposes a [`Node`] as a gRPC service so remote frontends can reach it.
pub struct NodeServiceImpl<R> {
    node: Arc<Node<R>>,
}

impl<R> NodeServiceImpl<R> {
    pub fn new(node: Arc<Node<R>>) -> Self {
        Self { node }
    }
}

#[tonic::async_trait]
impl<R: RouterClient + 'static> NodeService for NodeServiceImpl<R> {
    async fn put(&self, request: Request<PutRequest>) -> std::result::Result<Response<PutResponse>, Status> {
        let req = request.into_inner();

        self.node
            .put(RecordID(req.key), Payload::from(req.data))
            .map_err(error_to_status)?;

        Ok(Response::new(PutResponse {}))
    }

    async fn get(&self, request: Request<GetRequest>) -> std::result::Result<Response<GetResponse>, Status> {
        let req = request.into_inner();

        let data = self
            .node
            .get(RecordID(req.key))
            .map_err(error_to_status)?;

        Ok(Response::new(GetResponse { data: data.0.to_vec() }))
    }

    async fn del(&self, request: Request<DelRequest>) -> std::result::Result<Response<DelResponse>, Status> {
        let req = request.into_inner();

        self.node.del(RecordID(req.key)).map_err(error_to_status)?;

        Ok(Response::new(DelResponse {}))
    }
}
