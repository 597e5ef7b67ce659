use block_simulator::{config, startup};
use std::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point
///
/// Sets up logging, loads configuration, binds the listener and serves
/// until the process is terminated. A failed bind ends the process.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Our crate at info, dependencies quieter
    let filter = EnvFilter::from_default_env()
        .add_directive("block_simulator=info".parse().unwrap())
        .add_directive("actix_web=error".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let config = config::Config::from_env().expect("Failed to load config");

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)?;
    info!("Starting server on {}...", address);

    startup::run(listener, startup::Services::production(), config.workers)?.await
}
