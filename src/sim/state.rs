//! Run controller state and host-facing controls
//!
//! [`Game`] owns the whole simulation: entity pools, spawn timers, the
//! difficulty curve and the persisted progress. Hosts drive it with a small
//! set of semantic triggers plus [`Game::tick`], read entity state for
//! rendering, and drain the per-tick event stream for sound and UI.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::Config;
use crate::progress::{AchievementId, AchievementSystem, RunSnapshot, Stats};
use crate::season::Season;
use crate::settings::{Settings, SPEED_MULTIPLIER_MAX, SPEED_MULTIPLIER_MIN};
use crate::sim::entity::{Cloud, Collectible, Decoration, FallingDecoration, Obstacle};
use crate::sim::particles::Particles;
use crate::sim::player::Player;
use crate::sim::spawn::SpawnController;
use crate::store::ProgressStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start.
    Idle,
    Playing,
    Crashed,
}

/// Things that happened during a tick, in order. Drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Jumped,
    ScoreMilestone(u32),
    HeartCollected,
    CakeCollected,
    NewHighScore(u32),
    AchievementUnlocked(AchievementId),
    Crashed { score: u32 },
}

pub struct Game {
    pub(crate) config: Config,
    pub(crate) rng: Pcg32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub hearts: Vec<Collectible>,
    pub cakes: Vec<Collectible>,
    pub clouds: Vec<Cloud>,
    pub decorations: Vec<Decoration>,
    pub falling: Vec<FallingDecoration>,
    pub particles: Particles,
    pub(crate) spawner: SpawnController,
    pub(crate) progress: AchievementSystem,
    pub(crate) phase: GamePhase,
    pub(crate) season: Season,
    pub(crate) speed_multiplier: f32,
    pub(crate) speed: f32,
    pub(crate) distance: f64,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) hearts_collected: u32,
    pub(crate) cakes_collected: u32,
    pub(crate) dodge_count: u32,
    /// High-water mark of dodged obstacle right edges; guards against
    /// counting the same obstacle twice.
    pub(crate) last_dodged_x: f32,
    pub(crate) run_elapsed_ms: f32,
    /// Playing-phase time not yet folded into the persisted totals.
    pub(crate) pending_play_time_ms: f64,
    pub(crate) run_committed: bool,
    pub(crate) new_high_announced: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: Config, settings: Settings, store: Box<dyn ProgressStore>, seed: u64) -> Self {
        let config = config.sanitized();
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let progress = AchievementSystem::new(store);
        let high_score = progress
            .load_high_score()
            .unwrap_or(0)
            .max(progress.stats().high_score);

        let mut clouds = Vec::new();
        for _ in 0..config.clouds.initial_count {
            let x = rng.random_range(50.0..config.view.width - 50.0);
            clouds.push(Cloud::new(x, &mut rng));
        }

        let player = Player::new(&config);
        let spawner = SpawnController::new(&config, &mut rng);
        let max_particles = config.performance.max_particles;
        let speed = config.difficulty.initial_speed;
        Self {
            config,
            rng,
            player,
            obstacles: Vec::new(),
            hearts: Vec::new(),
            cakes: Vec::new(),
            clouds,
            decorations: Vec::new(),
            falling: Vec::new(),
            particles: Particles::new(max_particles),
            spawner,
            progress,
            phase: GamePhase::Idle,
            season: settings.season,
            speed_multiplier: settings.speed_multiplier,
            speed,
            distance: 0.0,
            score: 0,
            high_score,
            hearts_collected: 0,
            cakes_collected: 0,
            dodge_count: 0,
            last_dodged_x: 0.0,
            run_elapsed_ms: 0.0,
            pending_play_time_ms: 0.0,
            run_committed: false,
            new_high_announced: false,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Base scroll speed, before the multiplier.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Scroll speed actually applied to entities this tick.
    pub fn current_speed(&self) -> f32 {
        self.speed * self.speed_multiplier
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn hearts_collected(&self) -> u32 {
        self.hearts_collected
    }

    pub fn cakes_collected(&self) -> u32 {
        self.cakes_collected
    }

    pub fn dodge_count(&self) -> u32 {
        self.dodge_count
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cumulative persisted stats (not including the in-flight run).
    pub fn stats(&self) -> &Stats {
        self.progress.stats()
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.progress.is_unlocked(id)
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin the first run. No-op unless idle.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.phase = GamePhase::Playing;
        self.player.reset();
        self.run_elapsed_ms = 0.0;
        self.run_committed = false;
        self.events.push(GameEvent::Started);
    }

    /// Begin a fresh run after a crash. The previous run's stats were
    /// already committed at crash time; persisted progress is untouched.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::Crashed {
            return;
        }
        self.commit_run();

        self.phase = GamePhase::Playing;
        self.speed = self.config.difficulty.initial_speed;
        self.distance = 0.0;
        self.score = 0;
        self.hearts_collected = 0;
        self.cakes_collected = 0;
        self.dodge_count = 0;
        self.last_dodged_x = 0.0;
        self.run_elapsed_ms = 0.0;
        self.run_committed = false;
        self.new_high_announced = false;
        self.obstacles.clear();
        self.hearts.clear();
        self.cakes.clear();
        self.decorations.clear();
        self.falling.clear();
        self.particles.clear();
        // the sky starts the same way it did at construction
        self.clouds.clear();
        for _ in 0..self.config.clouds.initial_count {
            let x = self.rng.random_range(50.0..self.config.view.width - 50.0);
            let cloud = Cloud::new(x, &mut self.rng);
            self.clouds.push(cloud);
        }
        self.spawner.reset(&self.config, &mut self.rng);
        self.player.reset();
        self.events.push(GameEvent::Started);
    }

    /// Jump, if the player can. Emits [`GameEvent::Jumped`] on success.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        if self.player.jump() {
            self.events.push(GameEvent::Jumped);
            true
        } else {
            false
        }
    }

    pub fn duck_start(&mut self) {
        if self.phase == GamePhase::Playing {
            self.player.duck(true);
        }
    }

    pub fn duck_end(&mut self) {
        if self.phase == GamePhase::Playing {
            self.player.duck(false);
        }
    }

    /// Fast-fall out of a jump.
    pub fn speed_drop(&mut self) {
        if self.phase == GamePhase::Playing {
            self.player.speed_drop();
        }
    }

    /// Switch season; applies to entities spawned from now on.
    pub fn set_season(&mut self, season: Season) {
        self.season = season;
    }

    /// Validated string form for hosts wiring a settings panel. Unknown
    /// names are rejected and change nothing.
    pub fn set_season_str(&mut self, name: &str) -> bool {
        match Season::from_str(name) {
            Some(season) => {
                self.season = season;
                true
            }
            None => false,
        }
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        let m = if multiplier.is_finite() { multiplier } else { 1.0 };
        self.speed_multiplier = m.clamp(SPEED_MULTIPLIER_MIN, SPEED_MULTIPLIER_MAX);
    }

    pub(crate) fn run_snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            score: self.score,
            jumps: self.player.jump_count,
            dodges: self.dodge_count,
            season: self.season,
        }
    }

    /// Fold the current run's stats into persisted totals, exactly once
    /// per run.
    pub(crate) fn commit_run(&mut self) {
        if self.run_committed {
            return;
        }
        self.run_committed = true;
        let snapshot = self.run_snapshot();
        let play_time = self.pending_play_time_ms;
        self.pending_play_time_ms = 0.0;
        self.progress.commit_run(&snapshot, play_time);
        self.progress.save_high_score(self.high_score);
    }
}
