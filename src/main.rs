//! Nyan Shooter headless runner
//!
//! Drives the simulation through the platform layer with the autopilot at
//! the controls. Useful for soak-testing catalogs and reproducing seeds.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use nyan_shooter::consts::SIM_DT;
use nyan_shooter::platform::GameHost;
use nyan_shooter::settings::Settings;
use nyan_shooter::sim::{GameEvent, GamePhase, StageCatalog};

#[derive(Parser, Debug)]
#[command(name = "nyan-shooter")]
#[command(about = "Run the shooter simulation headless under the autopilot")]
struct Cli {
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Stage catalog JSON file (built-in stage when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// RNG seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,
    /// Sleep between frames to run at wall-clock speed
    #[arg(long, default_value_t = false)]
    realtime: bool,
    /// Log a HUD line every N ticks (0 = never)
    #[arg(long, default_value_t = 600)]
    hud_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.settings.as_deref())
        .context("loading settings")?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let catalog = match &cli.catalog {
        Some(path) => StageCatalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => StageCatalog::default(),
    };

    log::info!("Nyan Shooter (headless) starting...");
    let mut host = GameHost::new(&settings, catalog);
    host.input.idle_mode = true;

    let frame = Duration::from_secs_f32(SIM_DT);
    let mut last = Instant::now();

    while host.state.time_ticks < cli.max_ticks {
        let elapsed = if cli.realtime {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            dt
        } else {
            SIM_DT
        };

        let report = host.frame(elapsed);
        for event in &report.events {
            match event {
                GameEvent::BossSpawned { health, .. } => {
                    log::info!("Boss fight! ({} health)", health)
                }
                GameEvent::LifeLost { lives } => log::warn!("Life lost, {} left", lives),
                _ => {}
            }
        }

        if cli.hud_every > 0 && report.changed() && host.state.time_ticks % cli.hud_every == 0 {
            log::info!("{}", serde_json::to_string(&host.state.hud())?);
        }

        match report.phase {
            GamePhase::StageClear => {
                if !host.next_stage() {
                    break;
                }
            }
            GamePhase::GameOver => break,
            _ => {}
        }

        if cli.realtime {
            std::thread::sleep(frame.saturating_sub(last.elapsed()));
        }
    }

    let outcome = match host.state.phase {
        GamePhase::StageClear => "all stages clear",
        GamePhase::GameOver => "game over",
        _ => "tick limit reached",
    };
    println!(
        "{} after {} ticks (seed {})",
        outcome, host.state.time_ticks, host.state.seed
    );
    println!("{}", serde_json::to_string_pretty(&host.state.hud())?);
    Ok(())
}
