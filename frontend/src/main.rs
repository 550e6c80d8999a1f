mod api;
mod config;

use std::sync::Arc;

use anyhow::Result;
use quorumkv_core::{Frontend, FrontendOptions, RendezvousFinder};
use quorumkv_rpc::{GrpcNodeClient, GrpcRouterClient};

use config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    simple_logger::init_with_level(config.log.level.as_level())?;

    let handle = tokio::runtime::Handle::current();

    let frontend = Arc::new(Frontend::new(FrontendOptions {
        router_addr: config.router,
        node_client: GrpcNodeClient::new(handle.clone()),
        router_client: GrpcRouterClient::new(handle),
        finder: RendezvousFinder,
    }));

    log::info!("frontend listening on {}, using router {}", config.listen, config.router);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    axum::serve(listener, api::router(frontend)).await?;

    Ok(())
}
