use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod routes;
mod signature;

use config::RelayConfig;
use storybell::formatter::EventFormatter;
use storybell::ports::ChatIntegration;
use storybell_integration_rocketchat::{RocketChatConfig, RocketChatIntegration};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub formatter: Arc<EventFormatter>,
    pub integration: Option<Arc<dyn ChatIntegration>>,
    pub signing_secret: Option<String>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Storybell relay is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storybell=info,storybell_server=info".into()),
        )
        .init();

    tracing::info!("🔔 Storybell relay initializing...");

    let relay_config = RelayConfig::from_env()?;
    let formatter = Arc::new(EventFormatter::new(relay_config.formatter_config()?));

    tracing::info!(
        workspace = %relay_config.workspace_name,
        members = formatter.config().members.len(),
        "Formatter configured"
    );

    if relay_config.signing_secret.is_some() {
        tracing::info!("🔐 Webhook signature verification enabled");
    } else {
        tracing::warn!("⚠️  No STORYBELL_SIGNING_SECRET set - signature verification disabled");
    }

    let integration: Option<Arc<dyn ChatIntegration>> = match &relay_config.rocketchat_url {
        Some(url) => {
            let integration = RocketChatIntegration::new(RocketChatConfig::new(url))
                .context("Failed to build Rocket.Chat integration")?;
            tracing::info!("🚀 Rocket.Chat delivery enabled");
            Some(Arc::new(integration))
        }
        None => {
            tracing::info!("Rocket.Chat delivery disabled - relay answers with the message only");
            None
        }
    };

    let state = AppState {
        formatter,
        integration,
        signing_secret: relay_config.signing_secret.clone(),
    };

    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::hook::router())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&relay_config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", relay_config.bind_addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!(addr = %relay_config.bind_addr, "✅ Storybell relay ready");

    axum::serve(listener, router).await?;

    Ok(())
}
