//! refind server binary.
//!
//! Loads configuration from `refind.toml` / `REFIND_SERVER__*` environment
//! variables (with `.env` support) and runs the HTTP server until SIGTERM
//! or Ctrl+C.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up .env before the config layer reads the environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;
    server::start_server(config).await?;

    Ok(())
}
