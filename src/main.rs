use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stock_pulse::analytics::AnalyticsClient;
use stock_pulse::api::{run_server, AppState};
use stock_pulse::constants;
use stock_pulse::llm::{LLMClient, LLMQueue, TextModel};
use stock_pulse::{AppConfig, Dashboard, Event, EventBus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Setup Logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env");
    }

    info!("Starting Stock Pulse...");

    // Load Configuration
    let config = AppConfig::load()?;
    info!("Loaded Configuration: {:?}", config.llm);

    let catalog = config.catalog()?;
    let initial = config
        .initial_stock(&catalog)
        .ok_or("stock catalog has no stocks")?;
    info!("📚 Catalog: {} stocks, starting on {}", catalog.len(), initial.ticker);

    if !config.has_credential() {
        warn!("⚠️ No LLM API key configured (set LLM_API_KEY). AI panels will show their failure text.");
    }

    // Initialize Clients
    info!("Using LLM Model: {}", config.llm.model);
    if let Some(url) = &config.llm.base_url {
        info!("Using LLM Base URL: {}", url);
    }
    let llm_client: Arc<dyn TextModel> = Arc::new(LLMClient::from_config(&config.llm));

    info!(
        "📬 Initializing LLM Queue (max concurrent: {}, size: {})...",
        config.llm_max_concurrent, config.llm_queue_size
    );
    let llm: Arc<dyn TextModel> = Arc::new(LLMQueue::new(
        llm_client,
        config.llm_max_concurrent,
        config.llm_queue_size,
    ));

    let analytics = AnalyticsClient::new(&config.analytics)?;

    let bus = EventBus::new(constants::server::EVENT_BUS_CAPACITY);
    spawn_event_logger(&bus);

    let dashboard = Dashboard::new(catalog, initial, llm, analytics, config.charts.clone(), bus);
    let app_state = Arc::new(AppState { dashboard });

    // Start API Server
    info!("Initializing API Server...");
    run_server(app_state, &config.server.bind_addr).await?;

    Ok(())
}

fn spawn_event_logger(bus: &EventBus) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(Event::Panel(t)) => info!(
                    "📣 [EVENT] {} stock={} phase={:?} gen={} cache={}",
                    t.category, t.stock_id, t.phase, t.generation, t.from_cache
                ),
                Ok(other) => info!("📣 [EVENT] {:?}", other),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!("📣 [EVENT] Logger lagged, skipped {} events", n)
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
        error!("❌ Event logger terminated");
    });
}
