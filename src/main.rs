//! Tilt Arcade headless driver
//!
//! Plays one round of a variant on the virtual-time platform with a scripted
//! tilt, then prints the final snapshot as JSON.

use anyhow::Context;
use clap::Parser;

use tilt_arcade::sim::{OrientationSample, Phase};
use tilt_arcade::{Bounds, GameVariant, Session, SessionEvent, Settings, VirtualPlatform};

/// Virtual time advanced between event drains
const FRAME_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(name = "tilt-arcade", about = "Play a scripted tilt round headlessly")]
struct Cli {
    /// orb-free-play | orb-collector | space-runner
    #[arg(long, default_value = "orb-collector", value_parser = parse_variant)]
    variant: GameVariant,

    /// Screen width in pixels
    #[arg(long, default_value_t = 400.0)]
    width: f32,

    /// Screen height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Stop after this much virtual time even if the round is still running
    #[arg(long, default_value_t = 60_000)]
    duration_ms: u64,
}

fn parse_variant(s: &str) -> Result<GameVariant, String> {
    GameVariant::from_str(s).ok_or_else(|| format!("unknown variant '{s}'"))
}

/// Slow figure-eight wobble, in gyroscope units
fn scripted_tilt(at_ms: u64) -> OrientationSample {
    let t = at_ms as f32 / 1000.0;
    OrientationSample::new(0.6 * (t * 1.3).sin(), 0.8 * (t * 2.1).sin(), 0.0)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Tilt Arcade (headless) starting...");

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let bounds = Bounds::new(cli.width, cli.height);
    let mut session = Session::new(cli.variant, settings, bounds, VirtualPlatform::new())?;
    session.start_round();

    let mut elapsed = 0;
    while session.phase() == Phase::Playing && elapsed < cli.duration_ms {
        session.run_for(FRAME_MS, scripted_tilt);
        elapsed += FRAME_MS;

        for event in session.drain_events() {
            match event {
                SessionEvent::OrbCollected { score } => log::info!("Orb! score {score}"),
                SessionEvent::ObstacleHit => log::info!("Rocket hit an asteroid"),
                SessionEvent::TimeExpired => log::info!("Time up"),
                other => log::debug!("{other:?}"),
            }
        }
    }

    if session.phase() == Phase::Playing {
        log::info!("Stopped after {}ms of virtual time", elapsed);
    }

    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    session.acknowledge_game_over();
    Ok(())
}
