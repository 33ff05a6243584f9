use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use example_spa::config::Config;
use example_spa::logging::{init_client_tracing, init_server_tracing};
use example_spa::server::AppServer;
use example_spa::ui::router::APP_PATH_PREFIX;
use example_spa::ui::runtime;

#[derive(Parser)]
#[command(
    name = "example-spa",
    version,
    about = "Single-page app demo: user directory server and terminal client"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Path to config.toml")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Run the HTTP server.
    Serve {
        #[arg(long, help = "Bind address (host:port)")]
        bind: Option<String>,

        #[arg(long, help = "Directory holding screens/ and templates/")]
        assets_dir: Option<PathBuf>,
    },
    /// Run the terminal client against a server.
    Browse {
        #[arg(long, help = "Server base URL")]
        base_url: Option<String>,

        #[arg(long, default_value = APP_PATH_PREFIX, help = "Start path, e.g. /app/foods")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    match cli.command {
        Mode::Serve { bind, assets_dir } => {
            init_server_tracing();
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            if let Some(dir) = assets_dir {
                config.server.assets_dir = dir;
            }
            config.validate()?;

            let mut server = AppServer::new(&config)?;
            server.try_bind().await?;
            server.run().await?;
        }
        Mode::Browse { base_url, path } => {
            init_client_tracing();
            if let Some(url) = base_url {
                config.client.base_url = url;
            }
            config.validate()?;

            runtime::run(&config.client, &path).await?;
        }
    }

    Ok(())
}
