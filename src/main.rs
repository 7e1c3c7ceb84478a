mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use db::db::DBClient;
use dotenv::dotenv;
use routes::create_router;
use service::{chat_service::ChatService, ticket_service::TicketService};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub chat_service: Arc<ChatService>,
    pub ticket_service: Arc<TicketService>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("Connection to the database is successful");
            pool
        }
        Err(err) => {
            tracing::error!("Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!("Failed to run database migrations: {:?}", err);
        std::process::exit(1);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let db_client = Arc::new(DBClient::new(pool));
    let app_state = AppState {
        env: config.clone(),
        chat_service: Arc::new(ChatService::new(db_client.clone())),
        ticket_service: Arc::new(TicketService::new(db_client.clone())),
        db_client,
    };

    let app = create_router(Arc::new(app_state)).layer(cors);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind port {}: {:?}", config.port, err);
            std::process::exit(1);
        }
    };

    tracing::info!("Server is running on http://localhost:{}", config.port);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server error: {:?}", err);
    }
}
