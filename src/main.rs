use std::{net::SocketAddr, path::PathBuf};

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use tunepage::{config, error, server};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Address to listen on (overrides SERVER_ADDRESS)
    #[clap(long)]
    address: Option<SocketAddr>,

    /// Additional .env file to load before reading settings
    #[clap(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.env_file {
        if let Err(e) = config::load_env_file(path) {
            error!("Cannot load environment file. Err: {}", e);
        }
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let mut settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(address) = cli.address {
        settings.server_addr = address;
    }

    if let Err(e) = server::start_api_server(settings).await {
        error!("Server failed: {}", e);
    }
}
