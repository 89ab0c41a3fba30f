use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tailor_billing::config::Config;
use tailor_billing::core::traits::{PersistenceStore, ScannableCodeEncoder};
use tailor_billing::middleware::{json_error_handler, ErrorHandler, RequestId};
use tailor_billing::modules::artifacts::models::PayeeDetails;
use tailor_billing::modules::artifacts::services::QrCodeEncoder;
use tailor_billing::modules::bills::repositories::{InMemoryStore, SETTINGS};
use tailor_billing::modules::bills::services::BillService;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.app.default_log_filter()));
    let registry = tracing_subscriber::registry().with(filter);

    if config.app.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting Tailor Shop Billing");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Seed payee settings so the settings provider has something to read
    let memory_store = Arc::new(InMemoryStore::new());
    let payee = PayeeDetails::from(&config.payee);
    memory_store
        .put(SETTINGS, "payment", serde_json::to_value(&payee)?)
        .await;

    let store: Arc<dyn PersistenceStore> = memory_store;
    let encoder: Arc<dyn ScannableCodeEncoder> = Arc::new(QrCodeEncoder::new());
    let service = Arc::new(BillService::with_store(
        store.clone(),
        encoder,
        &config.billing,
        &config.payee,
    ));

    tracing::info!(
        "Bill service ready (prefix {}, currency {})",
        config.billing.bill_number_prefix,
        config.payee.currency
    );

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(service.clone()))
            .configure(tailor_billing::configure_routes)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
