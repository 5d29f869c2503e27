//! jotter - a personal blog server.

mod article;
mod auth;
mod cli;
mod config;
mod greeting;
mod http;
mod init;
mod render;
mod router;
mod serve;
mod store;
mod utils;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use greeting::{GeoLocator, IpApiClient, TYPE_DELAY, greeting_message};
use init::new_site;
use serve::serve_site;
use std::net::IpAddr;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(load_config(cli)?);

    match &cli.command {
        Commands::Init { name } => new_site(&cfg(), name.is_some()),
        Commands::Serve { .. } => serve_site(cfg()),
        Commands::Greet { ip } => greet(&cfg(), ip.as_deref()),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) if cli.is_serve() => {
            bail!("Config file not found. Run `jotter init` first.")
        }
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Print the greeting for `ip`, or for this machine's public address, with
/// the typewriter effect.
///
/// Lookup failures are logged and otherwise ignored.
fn greet(config: &SiteConfig, ip: Option<&str>) -> Result<()> {
    let ip = ip
        .map(|ip| ip.parse::<IpAddr>())
        .transpose()
        .context("Invalid IP address")?;
    let locator = IpApiClient::new(&config.greeting.endpoint)?;

    let located = match ip {
        Some(ip) => locator.locate(ip),
        None => locator.locate_own(),
    };
    match located {
        Ok(info) => greeting::typewriter::play(&greeting_message(&info), TYPE_DELAY)?,
        Err(err) => log!("greet"; "{err}"),
    }
    Ok(())
}
