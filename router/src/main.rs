mod config;

use std::sync::Arc;

use anyhow::Result;
use quorumkv_core::{Router, RouterOptions, RendezvousFinder};
use quorumkv_rpc::router::router_service_server::RouterServiceServer;
use quorumkv_rpc::RouterServiceImpl;

use config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    simple_logger::init_with_level(config.log.level.as_level())?;

    if config.nodes.len() < quorumkv_core::REPLICATION_FACTOR {
        log::warn!(
            "configured {} node(s), fewer than the replication factor of {}",
            config.nodes.len(),
            quorumkv_core::REPLICATION_FACTOR,
        );
    }

    let router = Arc::new(Router::new(RouterOptions {
        nodes: config.nodes.clone(),
        finder: RendezvousFinder,
        forget_timeout: config.forget_timeout(),
    })?);

    log::info!("router listening on {}, tracking {} node(s)", config.listen, config.nodes.len());

    tonic::transport::Server::builder()
        .add_service(RouterServiceServer::new(RouterServiceImpl::new(router)))
        .serve(config.listen)
        .await?;

    Ok(())
}
