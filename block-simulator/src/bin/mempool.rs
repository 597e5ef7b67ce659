use block_simulator::{
    blocks_client::HttpBlocksClient,
    config,
    delay::TokioDelay,
    orchestrator::Orchestrator,
    startup,
};
use std::{net::TcpListener, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Mempool entry point
///
/// Accepts transactions over HTTP and batches them into the block simulator
/// at `BLOCKS_BASE_URL` on a fixed-delay schedule.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("block_simulator=info".parse().unwrap())
        .add_directive("actix_web=error".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let config = config::Config::from_env().expect("Failed to load config");

    let client = Arc::new(HttpBlocksClient::new(&config.blocks_base_url));
    let orchestrator = Arc::new(Orchestrator::new(client, Arc::new(TokioDelay)));
    actix_web::rt::spawn(orchestrator.clone().run(config.batch_tick()));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)?;
    info!(
        "Starting mempool on {}, submitting to {}...",
        address, config.blocks_base_url
    );

    startup::run_mempool(listener, orchestrator, config.workers)?.await
}
