use std::io;
use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use uttt_bot::protocol::Session;
use uttt_bot::{Engine, EngineConfig, Player, SafetyMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rule-based ultimate tic-tac-toe bot speaking the line protocol on stdin/stdout", long_about = None)]
struct Args {
    /// JSON engine config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed seed for the tie-break shuffle (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Turn off the safety filter
    #[arg(long)]
    no_safety: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() { config.seed = args.seed; }
    if args.no_safety { config.safety = SafetyMode::Off; }

    // Real id arrives with `settings your_botid`.
    let engine = Engine::new(Player::One, config);
    let mut session = Session::new(engine);
    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run_loop(stdin.lock(), stdout.lock())?;
    Ok(())
}
