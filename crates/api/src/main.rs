use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bizdash_observability::init();

    let config = bizdash_api::AppConfig::from_env().context("invalid configuration")?;
    let app = bizdash_api::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
