//! Headless self-play driver.
//!
//! Plays full matches with a scripted human side against the configured
//! opponent and logs every event. Run with `RUST_LOG=debug` to see search
//! and economy detail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use gridlock::{GameConfig, GameEvent, GameRng, MovePolicy, MoveSelector, Orchestrator, PlayMode, Side, TurnState};

/// Play gridlock matches without a frontend
#[derive(Parser)]
#[command(name = "autoplay")]
#[command(about = "Self-play driver for the gridlock rules engine", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with a full or partial game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent skill in [0, 1] (overrides the config file)
    #[arg(long)]
    skill: Option<f64>,

    /// Skill of the scripted human side
    #[arg(long, default_value_t = 0.5)]
    player_skill: f64,

    /// Play with cards instead of direct placement
    #[arg(long)]
    cards: bool,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Human turns before a game is abandoned
    #[arg(long, default_value_t = 200)]
    max_turns: u32,
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(?config, "starting autoplay");

    let mut human = MoveSelector::new(cli.player_skill, GameRng::new(config.seed).for_context("human"));
    let mut game = Orchestrator::new(config).context("invalid game configuration")?;
    game.subscribe(Box::new(log_event));

    for round in 1..=cli.games {
        if round > 1 {
            game.request_reset();
        }
        play_one(&mut game, &mut human, cli.max_turns);
        info!(round, score = %game.score_snapshot(), "round finished");
    }

    let snapshot = game.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(skill) = cli.skill {
        config = config.with_skill(skill);
    }
    if cli.cards {
        config = config.with_mode(PlayMode::Cards);
    }
    config.validate()?;
    Ok(config)
}

fn play_one(game: &mut Orchestrator, human: &mut MoveSelector, max_turns: u32) {
    for _ in 0..max_turns {
        game.run_until_idle();
        if game.current_state() == TurnState::GameOver {
            return;
        }
        if let Err(rejection) = human_turn(game, human) {
            warn!(%rejection, "scripted move rejected");
            return;
        }
        game.drain_events();
    }
    warn!(max_turns, "game abandoned after turn limit");
}

fn human_turn(game: &mut Orchestrator, human: &mut MoveSelector) -> Result<(), gridlock::Rejection> {
    let board = game.board_snapshot();
    let Some(index) = human.choose_move(&board, Side::Player.mark()) else {
        return Ok(());
    };

    match game.config().mode {
        PlayMode::Direct => game.request_player_move(index),
        PlayMode::Cards => {
            let Some(card) = game.hand_snapshot(Side::Player).first().map(|card| card.id) else {
                warn!("human hand is empty");
                return Ok(());
            };
            game.request_play_card(card, index)?;
            if game.current_state() == TurnState::WaitingForEndTurn {
                game.request_end_turn()?;
            }
            Ok(())
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameOver { winner } => info!(%winner, "winner decided"),
        GameEvent::DamageApplied { target, amount } => info!(%target, amount, "damage"),
        other => tracing::debug!(?other, "event"),
    }
}
