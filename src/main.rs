use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tidb_quickstart::config::Config;
use tidb_quickstart::db::{self, PlayerStore};
use tidb_quickstart::error::QuickstartError;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "quickstart failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), QuickstartError> {
    let cfg = Config::from_env()?;

    info!(
        host = %cfg.host,
        port = cfg.port,
        user = %cfg.user,
        db_name = %cfg.db_name,
        tls = cfg.ca_path.is_some(),
        "connecting"
    );

    let pool = db::connect(&cfg).await?;
    let store = PlayerStore::new(pool.clone());

    let outcome = tidb_quickstart::demo::run(&store).await;

    // Release the session on both success and failure paths.
    pool.close().await;
    outcome
}
