mod api;
mod core;
mod storage;
mod ui;
mod utils;

use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::core::chat::SessionContext;
use crate::core::config::Config;
use crate::core::store::ConversationStore;
use crate::storage::{FileStorage, MemoryStorage, Storage};

#[derive(Parser)]
#[command(name = "causette")]
#[command(version)]
#[command(about = "A full-screen terminal chat client with named conversations")]
#[command(long_about = "Causette is a full-screen terminal chat client. It keeps any number of \
named conversations, sends your messages to a Gemini-style generateContent API, renders replies \
with a small markdown subset, and stores history locally.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    API key for the generation endpoint (required unless set in config)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Tab               Switch between the input and the conversation list\n\
  Ctrl+N            New conversation\n\
  Ctrl+Y            Copy the latest code block to the clipboard\n\
  Up/Down/Mouse     Scroll the timeline\n\
  Ctrl+C            Quit")]
struct Args {
    #[arg(short, long, help = "Model used for replies (overrides config)")]
    model: Option<String>,

    #[arg(long, help = "API base URL (overrides config)")]
    base_url: Option<String>,

    #[arg(
        long,
        help = "Directory for conversation history (defaults to the platform data dir)"
    )]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Keep history in memory only; nothing touches disk")]
    ephemeral: bool,

    #[arg(long, help = "Append diagnostics to this file")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not read config: {e}");
        Config::default()
    });

    let session = match SessionContext::resolve(&config, args.model, args.base_url) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let storage: Box<dyn Storage> = if args.ephemeral {
        Box::new(MemoryStorage::default())
    } else {
        match args.data_dir {
            Some(dir) => Box::new(FileStorage::new(dir)),
            None => Box::new(FileStorage::default_location()),
        }
    };
    let mut store = ConversationStore::load_or_default(storage);

    tracing::info!(model = %session.model, "starting causette");
    ui::chat_loop::run(&mut store, session).await
}

/// Diagnostics go to a file or nowhere: the terminal itself is in raw
/// mode and would garble any stray output.
fn init_tracing(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
