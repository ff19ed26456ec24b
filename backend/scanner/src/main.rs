use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use payload::{ClassifiedPayload, FileStore};
use scanner::{
    Scanner, render,
    utils::{default_store_path, read_payload},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// History storage file
    #[arg(long, env = "SCANEO_STORE", global = true)]
    store: Option<PathBuf>,

    /// Print JSON instead of the result panel
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify payloads given as arguments, or stdin when none (or `-`) is given
    Classify { payloads: Vec<String> },

    /// Read stdin until the first non-blank line and classify it
    Watch,

    /// Classify every non-blank line of a decoded-payload file
    Batch { file: PathBuf },

    /// Show the most recent scans
    History {
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let store_path = args.store.unwrap_or_else(default_store_path);
    info!("Using history store {}", store_path.display());

    let mut scanner = Scanner::open(FileStore::new(store_path))?;

    match args.command {
        Command::Classify { payloads } => {
            let payloads = if payloads.is_empty() || payloads == ["-"] {
                vec![read_payload(io::stdin().lock()).context("Error al leer la entrada")?]
            } else {
                payloads
            };

            for raw in payloads {
                let payload = scanner.process(&raw)?;
                show(&payload, args.json)?;
            }
        }
        Command::Watch => {
            let payload = scanner.watch(io::stdin().lock())?;
            show(&payload, args.json)?;
        }
        Command::Batch { file } => {
            for payload in scanner.batch(&file)? {
                show(&payload, args.json)?;
            }
        }
        Command::History { clear: true } => {
            scanner.clear_history()?;
            println!("Historial borrado");
        }
        Command::History { clear: false } => {
            if args.json {
                let entries: Vec<_> = scanner.history().entries().collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render::history_list(scanner.history()));
            }
        }
    }

    Ok(())
}

fn show(payload: &ClassifiedPayload, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(payload)?);
    } else {
        println!("{}", render::panel(payload, Local::now().naive_local()));
    }

    Ok(())
}
