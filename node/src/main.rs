mod config;

use std::sync::Arc;

use anyhow::Result;
use quorumkv_core::{Node, NodeOptions};
use quorumkv_rpc::node::node_service_server::NodeServiceServer;
use quorumkv_rpc::{GrpcRouterClient, NodeServiceImpl};

use config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    simple_logger::init_with_level(config.log.level.as_level())?;

    let router_client = GrpcRouterClient::new(tokio::runtime::Handle::current());

    let node = Arc::new(Node::new(NodeOptions {
        addr: config.external_addr(),
        router_addr: config.router,
        router: router_client,
        heartbeat: config.heartbeat(),
    }));

    node.heartbeats();
    log::info!(
        "node {} listening on {}, heartbeating to router {} every {:?}",
        config.external_addr(),
        config.listen,
        config.router,
        config.heartbeat(),
    );

    let shutdown = {
        let node = node.clone();
        async move {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down, stopping heartbeats");
            node.stop();
        }
    };

    tonic::transport::Server::builder()
        .add_service(NodeServiceServer::new(NodeServiceImpl::new(node)))
        .serve_with_shutdown(config.listen, shutdown)
        .await?;

    Ok(())
}
