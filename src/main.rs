//! Epic TD headless runner
//!
//! Plays a run with a simple autopilot at a fixed frame time and reports how
//! far it got. Records are kept in a JSON file between runs.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use epic_td::audio::AudioMixer;
use epic_td::consts::FRAME_MS;
use epic_td::persistence::JsonFileStore;
use epic_td::sim::{Difficulty, GameEvent, GamePhase, GameSpeed, TowerKind};
use epic_td::{Settings, Simulation, Tuning};

#[derive(Debug, Parser)]
#[command(name = "epic-td", about = "Run a headless tower defense game")]
struct Args {
    /// easy, normal, hard or brutal (defaults to the saved setting)
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Tower the autopilot builds
    #[arg(long, default_value = "archer", value_parser = parse_tower)]
    tower: TowerKind,

    /// Seed for enemy composition
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Stop after this many completed waves
    #[arg(long, default_value_t = 10)]
    max_waves: u32,

    /// Wall-clock milliseconds per frame
    #[arg(long, default_value_t = FRAME_MS)]
    frame_ms: f32,

    /// Safety cap on simulated frames
    #[arg(long, default_value_t = 5_000_000)]
    max_frames: u64,

    /// Run at 2x game speed
    #[arg(long)]
    fast: bool,

    /// Record file (high score and longest wave)
    #[arg(long, default_value = "td_records.json")]
    records: PathBuf,

    /// Balance overrides as JSON
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Settings file
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn parse_tower(s: &str) -> Result<TowerKind, String> {
    TowerKind::from_str(s).ok_or_else(|| format!("unknown tower '{s}'"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let tuning = match &args.tuning {
        Some(path) => Tuning::from_json_file(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let difficulty = args.difficulty.unwrap_or(settings.difficulty);
    let mixer = AudioMixer::from_settings(&settings);

    let store = JsonFileStore::open_or_empty(&args.records);
    let mut sim = Simulation::seeded(tuning, args.seed, Box::new(store));
    let before = sim.records();

    log::info!(
        "Epic TD starting: {} difficulty, seed {}, up to {} waves",
        difficulty.as_str(),
        args.seed,
        args.max_waves
    );
    sim.start_game(difficulty);
    if args.fast || settings.fast_forward {
        sim.set_game_speed(GameSpeed::Fast);
    }

    let mut cues = 0usize;
    let mut frames = 0u64;
    while sim.phase() == GamePhase::Playing && sim.wave() <= args.max_waves {
        if frames >= args.max_frames {
            return Err(anyhow!("run did not finish within {} frames", args.max_frames));
        }
        autopilot(&mut sim, args.tower);
        sim.tick(args.frame_ms);
        frames += 1;

        let events = sim.drain_events();
        cues += mixer.collect(&events).len();
        for event in events {
            report(&event);
        }
    }

    let records = sim.records();
    println!(
        "{} after {} frames: wave {}, score {}, gold {}, lives {}, kills {}, damage {}",
        if sim.phase() == GamePhase::GameOver { "Defeated" } else { "Survived" },
        frames,
        sim.wave(),
        sim.score(),
        sim.gold(),
        sim.lives(),
        sim.kill_count(),
        sim.total_damage()
    );
    println!(
        "Records: high score {} (was {}), longest wave {} (was {})",
        records.high_score, before.high_score, records.longest_wave, before.longest_wave
    );
    log::debug!("{} audible sound cues", cues);
    Ok(())
}

/// Build on free spots, otherwise upgrade the cheapest tower, and keep waves
/// coming.
fn autopilot(sim: &mut Simulation, kind: TowerKind) {
    let cost = sim.tuning().tower_costs.for_kind(kind);
    let free_spot = sim.spots().iter().find(|s| !s.is_occupied()).map(|s| s.pos);

    match free_spot {
        Some(pos) if sim.gold() >= cost => {
            if let Err(e) = sim.place_tower(kind, pos) {
                log::debug!("Autopilot could not build: {}", e);
            }
        }
        Some(_) => {}
        None => {
            let cheapest = sim.towers().iter().min_by_key(|t| t.cost).map(|t| (t.pos, t.cost));
            if let Some((pos, tower_cost)) = cheapest {
                let price = epic_td::scale_floor(tower_cost, sim.tuning().upgrade_cost_factor);
                if sim.gold() >= price && sim.select_tower_near(pos).is_some() {
                    if let Err(e) = sim.upgrade_selected_tower() {
                        log::debug!("Autopilot could not upgrade: {}", e);
                    }
                }
            }
        }
    }

    if !sim.wave_active() && sim.wave_timer_ms() <= 0.0 {
        if let Err(e) = sim.start_next_wave() {
            log::debug!("Autopilot could not start a wave: {}", e);
        }
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::WaveStarted { wave, enemies } => {
            log::info!("Wave {} incoming ({} enemies)", wave, enemies)
        }
        GameEvent::Achievement { title, description } => log::info!("{}: {}", title, description),
        GameEvent::GameOver { score, wave } => {
            log::info!("Game over on wave {} with {} points", wave, score)
        }
        GameEvent::Notification(text) => log::debug!("{}", text),
        _ => {}
    }
}
