use std::sync::Arc;

use anyhow::Context;

use saddlebook_infra::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    saddlebook_observability::init();

    let settings = Settings::from_env().context("invalid configuration")?;
    let services = Arc::new(saddlebook_api::app::services::build_services(&settings));
    let app = saddlebook_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        data_file = %settings.data_file.display(),
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
