use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use matchmaker_hub::config::{LoggingSettings, Settings};
use matchmaker_hub::core::{Matcher, PageLimits, ProfileLinks};
use matchmaker_hub::routes::{self, AppState};
use matchmaker_hub::services::{EmailClient, JwtVerifier, LlmClient, PostgresClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Matchmaker Hub...");

    let postgres = PostgresClient::from_settings(&settings.database)
        .await
        .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;

    info!(
        "PostgreSQL client initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let llm = LlmClient::new(&settings.llm).map_err(|e| startup_error("Failed to create LLM client", e))?;
    let mailer =
        EmailClient::new(&settings.email).map_err(|e| startup_error("Failed to create email client", e))?;

    let limits = PageLimits::from(&settings.matching);
    info!(
        "Matcher initialized (default page size: {}, max: {})",
        limits.default_page_size, limits.max_page_size
    );

    let app_state = AppState {
        store: Arc::new(postgres),
        insights: Arc::new(llm),
        mailer: Arc::new(mailer),
        auth: Arc::new(JwtVerifier::new(&settings.auth.jwt_secret)),
        matcher: Matcher::new(limits),
        links: ProfileLinks::new(settings.app.public_url.clone()),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_app)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
