mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    DeleteResult, IEventJoinRequestRepo, IEventRepo, InMemoryEventJoinRequestRepo,
    InMemoryEventRepo, Repos,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, InstantSys, RealSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ConnectuContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl ConnectuContext {
    async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            repos: Repos::create_postgres(pool),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ConnectuContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => ConnectuContext::create_postgres(&connection_string).await,
        Err(_) => {
            warn!(
                "{} env var is not set. Going to use inmemory repositories, nothing will be persisted.",
                PSQL_CONNECTION_STRING
            );
            Ok(ConnectuContext::create_inmemory())
        }
    }
}
