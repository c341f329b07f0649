mod auth;
mod companies;
mod config;
mod db;
mod errors;
mod formatting;
mod interview;
mod models;
mod resumes;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::ClerkAuth;
use crate::config::Config;
use crate::db::create_pool;
use crate::interview::retell::RetellClient;
use crate::resumes::store::PgResumeStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Session token verification
    let auth = ClerkAuth::from_rsa_pem(&config.clerk_jwt_key, config.clerk_issuer.as_deref())
        .context("CLERK_JWT_KEY must be an RSA public key in PEM format")?;
    info!("Clerk session verification initialized");

    // Call provider client
    let calls = RetellClient::new(config.retell_api_key.clone(), &config.retell_base_url)?;
    info!("Retell client initialized ({})", config.retell_base_url);
    if config.retell_agent_id.is_none() {
        info!("RETELL_AGENT_ID not set; register-call requests must name an agent");
    }

    // Build app state
    let state = AppState {
        resumes: Arc::new(PgResumeStore::new(db)),
        auth: Arc::new(auth),
        calls: Arc::new(calls),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web app's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
