use dbconnect::{ConnectionHandle, ConnectionProvider, config::Config};
use mimalloc::MiMalloc;
use std::error::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        location = %cfg.location,
        create_if_missing = cfg.create_if_missing,
        loglevel = %cfg.loglevel
    );

    let provider = ConnectionProvider::from_config(&cfg);
    let version = provider
        .with_connection(async |handle: &mut ConnectionHandle| -> Result<String, BoxError> {
            Ok(handle.engine_version().await?)
        })
        .await?;

    info!(location = %provider.location(), sqlite_version = %version, "database ready");
    Ok(())
}
