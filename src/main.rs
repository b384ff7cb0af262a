//! HTTP server for the Net Salary Engine.
//!
//! Environment:
//! - `SALARY_ENGINE_CONFIG_DIR`: directory holding `tax_table.yaml` and
//!   `statutory.yaml`. The built-in Finance Act 2023 table is used when unset.
//! - `SALARY_ENGINE_BIND_ADDR`: listen address, `127.0.0.1:3000` by default.
//! - `RUST_LOG`: log filter, `info` by default.

use std::env;
use std::error::Error;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_config() -> Result<ConfigLoader, salary_engine::error::EngineError> {
    match env::var("SALARY_ENGINE_CONFIG_DIR") {
        Ok(dir) => ConfigLoader::load(dir),
        Err(_) => Ok(ConfigLoader::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = load_config()?;
    info!(
        tax_table = %config.tax_table().name,
        version = %config.tax_table().version,
        "Loaded payroll configuration"
    );

    let bind_addr =
        env::var("SALARY_ENGINE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Net salary engine listening");

    axum::serve(listener, create_router(AppState::new(config))).await?;
    Ok(())
}
