use clap::Parser;

use zillaforge::config;
use zillaforge::log::init_logger;

/// Terraform provider reconciliation engine for ZillaForge cloud VPS
/// resources. The plugin-protocol handshake and RPC framing are out of
/// scope for this binary (they belong to the surrounding provider SDK);
/// this entry point resolves configuration and starts logging, the same
/// two jobs `zeronsd`'s `cli::init` performs before handing off to its
/// authority loop.
#[derive(Parser, Debug)]
#[clap(name = "terraform-provider-zillaforge", version)]
struct Opts {
    /// Minimum log level. Falls back to ZILLAFORGE_LOG, then `info`.
    #[clap(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let opts = Opts::parse();

    let level = opts
        .log_level
        .as_deref()
        .and_then(|s| s.parse::<tracing::Level>().ok());
    init_logger(level);

    let provider_config = config::resolve_from_env()?;
    tracing::info!(endpoint = %provider_config.api_endpoint, "starting zillaforge provider");

    // The Terraform plugin protocol's serve loop lives in the surrounding
    // provider SDK, out of scope here; this binary's job ends at
    // configuration resolution plus logging setup.
    Ok(())
}
