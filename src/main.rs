use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod date_window;
mod db;
mod error;
mod response;
mod state;
mod crypto {
    pub mod token;
}

mod models {
    pub mod customer;
    pub mod identity;
    pub mod product;
    pub mod report;
}

mod repositories {
    pub mod customer;
    pub mod product;
    pub mod report;
}

mod services {
    pub mod auth;
    pub mod catalog;
    pub mod reports;
}

mod handlers {
    pub mod auth;
    pub mod catalog;
    pub mod reports;
    pub mod status;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod auth;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");
    tracing::info!("🕰️ Date windows anchored at {}", config.reference_date);

    let state = AppState::new(&config)?;
    tracing::info!("✅ AppState initialized");

    let app = app::build_router(state)?;

    let addr = config.bind_addr;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
