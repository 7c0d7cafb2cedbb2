use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use recipebook::logging::init_tracing;
use recipebook::router::init_router;
use recipebook::state::init_app_state;
use recipebook_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to create logs directory")?;

    let server = ServerConfig::from_env();
    let state = init_app_state().await?;
    let app = init_router(state);

    let address = server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "server listening");
    println!("🚀 Server running on http://{address}");
    println!("📚 Swagger UI available at http://{address}/swagger-ui");
    println!("📖 Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
