use anyhow::Result;
use tokio_util::sync::CancellationToken;

use server::api::run_api;
use server::config::loader::load_with_discovery;
use server::db::init_pool;
use server::graphql::build_schema;
use server::metrics_exporter::init_metrics;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = load_with_discovery()?;

    let (pool, db_root_path) = init_pool(&config.database).await?;
    tracing::info!("registry database at {}", db_root_path.display());

    init_metrics();

    let schema = build_schema(pool);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            signal_token.cancel();
        }
    });

    run_api(&config.server.listen_addr, schema, shutdown).await
}
