mod config;
mod main_lib;
mod shell;

use config::Config;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let state = build_state(&config).await?;
    shell::run(state).await;

    Ok(())
}
