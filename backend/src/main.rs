//! Directory entry-point: loads settings, prepares storage, seeds example
//! data and serves the REST API.

mod server;
mod settings;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_http_state, create_server};
use settings::DirectorySettings;
use tenant_directory::example_data::{ExampleDataSettings, seed_example_data_on_startup};
use tenant_directory::inbound::http::health::HealthState;
use tenant_directory::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tenant_directory::outbound::security::JwtTokenService;

/// Application bootstrap.
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

    let settings =
        DirectorySettings::load_from_iter(std::env::args_os()).wrap_err("loading settings")?;
    let example_data = ExampleDataSettings::load_from_iter([OsString::from("tenant-directory")])
        .wrap_err("loading example data settings")?;

    let allow_ephemeral = cfg!(debug_assertions);
    if settings.jwt_secret.is_none() && allow_ephemeral {
        warn!("no token secret configured; using an ephemeral one (dev only)");
    }
    let secret = settings.jwt_secret(allow_ephemeral)?;
    let tokens = JwtTokenService::new(
        secret.as_slice(),
        settings.token_issuer(),
        settings.token_ttl_secs(),
    );

    let mut config = ServerConfig::new(settings.bind_addr()?, tokens);
    match settings.database_url() {
        Some(url) => {
            run_migrations(url).await.wrap_err("applying migrations")?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
                .await
                .wrap_err("building database pool")?;
            info!("using postgres store");
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; data lives in memory"),
    }

    let http_state = build_http_state(&config);
    seed_example_data_on_startup(
        &example_data,
        http_state.companies_command.as_ref(),
        http_state.users_command.as_ref(),
    )
    .await
    .wrap_err("seeding example data")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, &config)?;
    info!(addr = %config.bind_addr, "listening");
    server.await?;
    Ok(())
}
