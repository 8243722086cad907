mod repl;

use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minidb::{engine::Engine, server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minidb", about = "A single-table row store backed by a paged file")]
struct Config {
    #[arg(long, default_value = "mydb.db", help = "Path of the database file")]
    db: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive prompt (the default)
    Repl {
        #[arg(long, help = "File to load and save line history")]
        history: Option<PathBuf>,
    },
    /// HTTP endpoint accepting POST /query
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
    },
}

fn init_tracing(default_directive: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    let command = config.command.unwrap_or(Command::Repl { history: None });

    match &command {
        Command::Repl { .. } => init_tracing("warn"),
        Command::Serve { .. } => init_tracing("info"),
    }

    let engine = Engine::open(&config.db)
        .with_context(|| format!("Failed to open database {}", config.db.display()))?;

    match command {
        Command::Repl { history } => repl::run(engine, history.as_deref()),
        Command::Serve { bind } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start runtime")?;
            runtime
                .block_on(server::serve(engine, bind))
                .context("Server failed")
        }
    }
}
