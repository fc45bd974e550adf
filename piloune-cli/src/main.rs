mod app;
mod input;
mod render;
mod storage;

use anyhow::Result;
use clap::Parser;
use piloune_game::{ActionId, PilouneEngine, SystemClock};
use std::path::PathBuf;

use storage::FileStorage;

#[derive(Debug, Parser)]
#[command(name = "piloune", version)]
#[command(about = "Piloune, le fantôme de compagnie - in your terminal")]
struct Args {
    /// Seed for the rare-event RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Save file path (defaults to the platform data directory)
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Seconds between decay ticks
    #[arg(long, default_value_t = piloune_game::DECAY_PERIOD_SECS)]
    decay_secs: u64,

    /// Seconds between autosaves
    #[arg(long, default_value_t = 30)]
    autosave_secs: u64,

    /// Ignore any existing save and start fresh
    #[arg(long)]
    fresh: bool,

    /// Perform one action, print the result and exit (shortcut mode)
    #[arg(long)]
    action: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let save_path = match args.save_path {
        Some(path) => path,
        None => storage::default_save_path()?,
    };
    log::debug!("seed {seed}, save file {}", save_path.display());
    let store = FileStorage::new(save_path);

    let mut engine = if args.fresh {
        PilouneEngine::new(store, SystemClock, seed)
    } else {
        PilouneEngine::load_or_new(store, SystemClock, seed)
    };

    if let Some(name) = args.action.as_deref() {
        let action: ActionId = name
            .parse()
            .map_err(|()| anyhow::anyhow!("unknown action: {name}"))?;
        engine.perform(action);
        engine.save();
        println!("{}", engine.state().message);
        return Ok(());
    }

    app::run(engine, args.decay_secs, args.autosave_secs)
}
