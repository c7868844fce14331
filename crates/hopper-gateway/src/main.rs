use clap::Parser;
use hopper_core::{NoopNotifier, Notification, Notifier, Package};
use hopper_gateway::app::App;
use hopper_gateway::cli::CLI;
use hopper_gateway::state::AppState;
use hopper_generator::RandomGenerator;
use hopper_notifier::{HttpLogNotifier, HttpLogSettings};
use hopper_shortener::ShortenerService;
use hopper_storage::InMemoryRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = CLI::parse();

    hopper_telemetry::init(config.log_format)?;

    let listen_addr = config.resolved_listen_addr();
    let base_url = config.resolved_base_url().to_owned();
    info!(
        listen_addr = %listen_addr,
        base_url = %base_url,
        log_format = %config.log_format,
        "starting gateway server"
    );

    let notifier = build_notifier(&config)?;
    let shortener = ShortenerService::new(InMemoryRepository::new(), RandomGenerator::new())
        .with_notifier(Arc::clone(&notifier));
    let state = AppState::new(Arc::new(shortener), base_url);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(listen_addr = %local_addr, "gateway listening");
    notifier.notify(Notification::info(
        Package::Middleware,
        format!("Server running on {}", local_addr),
    ));

    axum::serve(
        listener,
        App::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("gateway stopped");
    Ok(())
}

fn build_notifier(config: &CLI) -> Result<Arc<dyn Notifier>, Box<dyn std::error::Error>> {
    match (&config.log_api_url, &config.log_api_token) {
        (Some(endpoint), Some(token)) => {
            let notifier = HttpLogNotifier::new(
                HttpLogSettings::builder()
                    .endpoint(endpoint)
                    .token(token)
                    .timeout(Duration::from_millis(config.notifier_timeout_ms))
                    .build(),
            )?;
            info!(endpoint = %notifier.endpoint(), "remote log notifier enabled");
            Ok(Arc::new(notifier))
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("log API url and token must both be set, remote log notifier disabled");
            Ok(Arc::new(NoopNotifier))
        }
        (None, None) => Ok(Arc::new(NoopNotifier)),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
