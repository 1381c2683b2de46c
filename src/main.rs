use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use partner_match::config::{CatalogBackend, Settings};
use partner_match::routes::{self, AppState};
use partner_match::services::{CachedCatalog, CatalogError, InMemoryCatalog, PartnerCatalog, PostgresCatalog};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn build_catalog(settings: &Settings) -> Result<Arc<dyn PartnerCatalog>, CatalogError> {
    let catalog: Arc<dyn PartnerCatalog> = match settings.catalog.backend {
        CatalogBackend::Memory => {
            let catalog = InMemoryCatalog::from_json_file(&settings.catalog.seed_path)?;
            info!("In-memory catalog ready ({} partners)", catalog.len());
            Arc::new(catalog)
        }
        CatalogBackend::Postgres => {
            let db = &settings.database;
            let catalog = PostgresCatalog::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await?;
            info!("PostgreSQL catalog ready (max: {} connections)", db.max_connections.unwrap_or(10));
            Arc::new(catalog)
        }
    };

    if !settings.cache.enabled {
        return Ok(catalog);
    }

    info!(
        "Partner lookup cache enabled ({} entries, TTL: {}s)",
        settings.cache.capacity, settings.cache.ttl_secs
    );
    Ok(Arc::new(CachedCatalog::new(
        catalog,
        settings.cache.capacity,
        settings.cache.ttl_secs,
    )))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting partner matching service...");

    let catalog = build_catalog(&settings).await.map_err(|e| {
        error!("Failed to initialize partner catalog: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let app_state = AppState::new(catalog, settings.matching.result_limit);

    info!("Matcher initialized: {:?}", app_state.matcher);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
