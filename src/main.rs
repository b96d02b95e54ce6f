//! Headless demo driver
//!
//! Runs the simulation at a synthetic 60 Hz with a small autopilot, logging
//! the event stream. Useful for eyeballing spawn pacing and difficulty
//! without a renderer attached.
//!
//! Environment:
//! - `TULIP_DASH_CONFIG`: path to a JSON config (defaults baked in)
//! - `TULIP_DASH_DATA`: progress/high score directory (default `.tulip-dash`)
//! - `TULIP_DASH_SEED`: RNG seed for reproducible sessions

use std::env;
use std::fs;

use log::{info, warn};

use tulip_dash::sim::{GamePhase, ObstacleKind};
use tulip_dash::{Config, FrameClock, Game, GameEvent, JsonFileStore, Settings};

const RUNS: u32 = 3;
const MAX_FRAMES: u64 = 60 * 60 * 10; // ten simulated minutes, hard stop

fn main() {
    env_logger::init();

    let config = load_config();
    let data_dir = env::var("TULIP_DASH_DATA").unwrap_or_else(|_| ".tulip-dash".to_string());
    let seed = env::var("TULIP_DASH_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mut game = Game::new(
        config,
        Settings::default(),
        Box::new(JsonFileStore::new(&data_dir)),
        seed,
    );
    let mut clock = FrameClock::new(game.config().performance.max_delta_time);

    info!("starting demo session, seed {seed}, data dir {data_dir}");
    game.start();

    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0_f64;
    clock.tick(now);

    let mut runs_finished = 0;
    for _ in 0..MAX_FRAMES {
        now += frame_ms;
        let dt = clock.tick(now);
        autopilot(&mut game);
        game.tick(dt);

        for event in game.take_events() {
            report(&game, event);
        }

        if game.phase() == GamePhase::Crashed {
            runs_finished += 1;
            info!(
                "run {runs_finished} over: score {}, dodges {}, hearts {}",
                game.score(),
                game.dodge_count(),
                game.hearts_collected()
            );
            if runs_finished >= RUNS {
                break;
            }
            game.restart();
        }
    }

    let stats = game.stats();
    info!(
        "session done: high score {}, total jumps {}, total dodges {}, play time {:.1}s",
        game.high_score(),
        stats.total_jumps,
        stats.total_dodges,
        stats.total_play_time / 1000.0
    );
}

fn load_config() -> Config {
    match env::var("TULIP_DASH_CONFIG") {
        Ok(path) => match fs::read_to_string(&path) {
            Ok(json) => Config::from_json(&json),
            Err(e) => {
                warn!("could not read config {path}: {e}");
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}

/// Jump ground obstacles and low flyers, duck the mid-tier butterflies,
/// fast-fall once the hazard is behind. Imperfect on purpose; crashes end
/// runs and exercise the restart path.
fn autopilot(game: &mut Game) {
    if game.phase() != GamePhase::Playing {
        return;
    }
    let px = game.player.x;
    let ground_y = game.config().view.ground_y();
    let next = game
        .obstacles
        .iter()
        .filter(|o| o.x + o.width > px)
        .min_by(|a, b| a.x.total_cmp(&b.x));

    let Some(hazard) = next else {
        game.duck_end();
        return;
    };
    let gap = hazard.x - (px + 40.0);

    match hazard.kind {
        ObstacleKind::Butterfly if hazard.y < ground_y - 75.0 => {
            // passes overhead; nothing to do
            game.duck_end();
        }
        ObstacleKind::Butterfly if hazard.y < ground_y - 50.0 => {
            // mid tier: duck through it
            if gap < 120.0 {
                game.duck_start();
            } else {
                game.duck_end();
            }
        }
        _ => {
            game.duck_end();
            if gap < 90.0 && !game.player.is_jumping() {
                game.jump();
            } else if game.player.is_jumping() && gap < -20.0 {
                game.speed_drop();
            }
        }
    }
}

fn report(game: &Game, event: GameEvent) {
    match event {
        GameEvent::Started => info!("run started"),
        GameEvent::Jumped => {}
        GameEvent::ScoreMilestone(score) => info!("milestone: {score}"),
        GameEvent::HeartCollected => info!("heart collected ({})", game.hearts_collected()),
        GameEvent::CakeCollected => info!("cake collected ({})", game.cakes_collected()),
        GameEvent::NewHighScore(score) => info!("new high score: {score}"),
        GameEvent::AchievementUnlocked(id) => info!("achievement unlocked: {}", id.title()),
        GameEvent::Crashed { score } => info!("crashed at {score}"),
    }
}
