use crate::{
    api,
    delay::{Delay, TokioDelay},
    gate::ProcessingGate,
    orchestrator::Orchestrator,
    pricing::PriceQuoteService,
    random::{RandomSource, ThreadRandom},
    simulator::BlockSimulator,
};
use actix_web::{dev::Server, web, App, HttpServer};
use std::{net::TcpListener, sync::Arc};
use tracing_actix_web::TracingLogger;

/// Request handlers' shared state
#[derive(Clone)]
pub struct Services {
    pub pricing: Arc<PriceQuoteService>,
    pub simulator: Arc<BlockSimulator>,
}

impl Services {
    /// Wire both services to one randomness source, with a fresh gate
    pub fn new(random: Arc<dyn RandomSource>, delay: Arc<dyn Delay>) -> Self {
        let gate = Arc::new(ProcessingGate::new());
        Self {
            pricing: Arc::new(PriceQuoteService::new(random.clone())),
            simulator: Arc::new(BlockSimulator::new(gate, random, delay)),
        }
    }

    /// Thread RNG and real async sleeps
    pub fn production() -> Self {
        Self::new(Arc::new(ThreadRandom), Arc::new(TokioDelay))
    }
}

/// Build the HTTP server on an already bound listener
///
/// The returned [`Server`] must be awaited (or spawned) to start serving.
pub fn run(listener: TcpListener, services: Services, workers: usize) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            // Add logging middleware
            .wrap(TracingLogger::default())
            // Both services are shared between all workers
            .app_data(web::Data::new(services.pricing.clone()))
            .app_data(web::Data::new(services.simulator.clone()))
            .configure(api::configure)
    })
    .workers(workers)
    .listen(listener)?
    .run();

    Ok(server)
}

/// Build the mempool HTTP server on an already bound listener
///
/// The scheduler loop is not started here; see [`Orchestrator::run`].
pub fn run_mempool(
    listener: TcpListener,
    orchestrator: Arc<Orchestrator>,
    workers: usize,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(orchestrator.clone()))
            .configure(api::configure_mempool)
    })
    .workers(workers)
    .listen(listener)?
    .run();

    Ok(server)
}
