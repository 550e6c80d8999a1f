//! gRPC transport for `quorumkv-core`.
//!
//! Bridges the core's synchronous traits to tonic's async clients by
//! blocking onto a captured [`tokio::runtime::Handle`] — the core never
//! needs to know an async runtime exists. The `node`/`router` modules are
//! the generated protobuf code; everything else adapts it to and from
//! `quorumkv_core`'s trait objects.

mod error;
mod node_client;
mod node_service;
mod router_client;
mod router_service;

pub mod node {
    tonic::include_proto!("node");
}

pub mod router {
    tonic::include_proto!("router");
}

pub use node_client::GrpcNodeClient;
pub use node_service::NodeServiceImpl;
pub use router_client::GrpcRouterClient;
pub use router_service::RouterServiceImpl;
