//! Forum backend entry-point: loads settings, prepares storage and serves
//! the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use forum_backend::inbound::http::health::HealthState;
use forum_backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let mut config = ServerConfig::new(settings.bind_addr()?)
        .with_password_cost(settings.password_cost());

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            run_pending_migrations(pool_config.database_url())
                .await
                .wrap_err("apply database migrations")?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("create database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr, "starting forum backend");
    create_server(health_state, config)?
        .await
        .wrap_err("run server")
}
