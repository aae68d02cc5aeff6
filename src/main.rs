use anyhow::Result;
use tracing_subscriber::EnvFilter;

use spa_file_server::config::app::AppConfig;
use spa_file_server::web::file_server::{router, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = AppConfig::from_env()?;
    tracing::info!(env = %cfg.app_env, "starting spa-file-server");

    let app = router(cfg.server.clone());
    serve(app, &cfg.http).await?;
    Ok(())
}
