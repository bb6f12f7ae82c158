//! Cannonade entry point
//!
//! Headless native driver: runs the fixed-timestep simulation behind a
//! render-rate frame loop with a simple autopilot doing the aiming.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cannonade::consts::*;
use cannonade::sim::{CollidableKind, GameEvent, GamePhase, ProjectileKind, TickInput};
use cannonade::{Game, Settings};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Settings file (JSON)
    #[arg(short, long, default_value = "cannonade.json")]
    config: PathBuf,
    /// Player name; resumes the saved profile if one exists
    #[arg(short, long, default_value = "player")]
    username: String,
    /// Projectile the autopilot fires: bullet, bomb or laser
    #[arg(short, long, default_value = "laser", value_parser = parse_kind)]
    weapon: ProjectileKind,
    /// Stop after this many rendered frames
    #[arg(long, default_value_t = 3000)]
    max_frames: u32,
}

fn parse_kind(s: &str) -> Result<ProjectileKind, String> {
    ProjectileKind::ALL
        .into_iter()
        .find(|k| k.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown projectile {:?} (bullet, bomb, laser)", s))
}

/// Frame loop state
struct Driver {
    game: Game,
    weapon: ProjectileKind,
    accumulator: f32,
}

impl Driver {
    /// Input for the next tick: select the weapon, aim at the target and fire
    /// once nothing is in flight
    fn autopilot(&self) -> TickInput {
        let mut input = TickInput::default();
        let Some(state) = self.game.state() else {
            return input;
        };
        if state.phase != GamePhase::Playing {
            return input;
        }

        if state.selected != self.weapon {
            input.cycle_projectile = true;
            return input;
        }

        if let Some(target) = state
            .collidables
            .iter()
            .find(|c| c.kind == CollidableKind::Target)
        {
            input.aim = Some(target.rect.center());
        }
        input.fire = state.projectiles.is_empty();
        input
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        self.accumulator += frame_dt.min(0.1);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.autopilot();
            events.extend(self.game.tick(&input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        events
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    let settings = Settings::load(&args.config);
    let frame_dt = settings.frame_dt();
    let mut game = Game::new(settings);

    let saved = game
        .find_profile(args.username.trim())
        .context("reading profiles")?;
    match saved {
        Some(profile) => game.load_profile(&profile)?,
        None => {
            if !game.new_game(&args.username)? {
                anyhow::bail!("username must not be blank");
            }
        }
    }

    log::info!(
        "Cannonade running ({} Hz render, {} Hz physics)",
        (1.0 / frame_dt).round(),
        (1.0 / SIM_DT).round()
    );

    let mut driver = Driver {
        game,
        weapon: args.weapon,
        accumulator: 0.0,
    };

    for _frame in 0..args.max_frames {
        for event in driver.update(frame_dt) {
            match event {
                GameEvent::ShotsChanged { remaining, max } => {
                    log::info!("Shots: {}/{}", remaining, max)
                }
                GameEvent::LevelWon { level, score } => {
                    println!("You won! Level {} cleared, score: {}", level, score);
                    driver.game.continue_playing()?;
                }
                GameEvent::LevelLost { level, score } => {
                    println!("Out of shots on level {}. Score: {}", level + 1, score);
                    driver.game.save_and_quit()?;
                    return Ok(());
                }
                GameEvent::GameCompleted { score } => {
                    println!("You won the game! Final score: {}", score);
                    if let Ok(hof) = driver.game.hall_of_fame() {
                        print!("{}", hof.to_text());
                    }
                    return Ok(());
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    log::info!("Frame limit reached, saving progress");
    driver.game.save_and_quit()?;
    Ok(())
}
