use anyhow::{Context, Result};
use cafe_orders::{
    clock::{DynClock, SystemClock},
    config::{Config, StoreBackend},
    di::Storage,
    handler::AppRouter,
    repository::InMemoryStore,
    state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "cafe-orders";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry =
        Telemetry::init(SERVICE_NAME, &config.otel_endpoint).context("Failed to init telemetry")?;
    let _log_guard = init_logger(
        telemetry.logger_provider(),
        SERVICE_NAME,
        config.dev_mode,
        config.enable_file_log,
    )
    .context("Failed to init logger")?;

    let clock: DynClock = Arc::new(SystemClock);
    let storage = setup_storage(&config, clock.clone()).await?;
    let state = AppState::new(storage, clock);

    info!("✅ Application setup completed successfully.");

    let served = AppRouter::serve(config.port, state).await;
    if let Err(e) = &served {
        error!("❌ Server stopped with error: {e:?}");
    }

    info!("🛑 Shutting down telemetry...");
    if let Err(e) = telemetry.shutdown() {
        warn!("⚠️ Failed to shutdown telemetry: {e:?}");
    }

    served
}

async fn setup_storage(config: &Config, clock: DynClock) -> Result<Storage> {
    match config.store_backend {
        StoreBackend::Memory => {
            warn!("⚠️ Using the in-memory store; data is lost on restart");
            Ok(Storage::Memory(Arc::new(
                InMemoryStore::with_demo_menu(clock).await,
            )))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("Missing environment variable: DATABASE_URL")?;

            let pool = ConnectionManager::new_pool(url, config.db_min_conn, config.db_max_conn)
                .await
                .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
            }

            Ok(Storage::Postgres(pool))
        }
    }
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Database migrations applied");
    Ok(())
}
