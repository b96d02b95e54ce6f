//! Immutable game configuration
//!
//! One `Config` value is constructed at startup (defaults or JSON) and passed
//! into the simulation; nothing in the engine mutates it. Missing or
//! non-finite tunables degrade to the built-in defaults rather than failing -
//! a stalled tick loop is the only real availability failure for this engine,
//! so configuration defects are never fatal.

use serde::{Deserialize, Serialize};

/// Viewport geometry, in simulation pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 150.0,
            ground_height: 20.0,
        }
    }
}

impl ViewConfig {
    /// Y of the ground line (entities stand on top of it).
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Player actor tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub width: f32,
    pub height: f32,
    pub duck_height: f32,
    pub start_x: f32,
    /// Full jump arc duration in ms.
    pub jump_duration: f32,
    /// Peak jump height in pixels.
    pub jump_height: f32,
    /// Fraction of `jump_duration` the timer is forced to on a speed drop.
    pub speed_drop_ratio: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 50.0,
            duck_height: 30.0,
            start_x: 50.0,
            jump_duration: 520.0,
            jump_height: 65.0,
            speed_drop_ratio: 0.85,
        }
    }
}

/// Scroll speed progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Speed gained per millisecond while playing.
    pub acceleration: f32,
    /// External tunable, clamped to [0.5, 2.0] when applied.
    pub speed_multiplier: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            initial_speed: 6.0,
            max_speed: 13.0,
            acceleration: 0.0001,
            speed_multiplier: 1.0,
        }
    }
}

/// Tulip cluster composition bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub min_count: u32,
    pub max_count: u32,
    pub spacing: f32,
    pub large_chance: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_count: 2,
            max_count: 4,
            spacing: 6.5,
            large_chance: 0.4,
        }
    }
}

/// Obstacle spawn pressure and kind weights.
///
/// Kind selection is an ordered, non-overlapping draw over one uniform roll:
/// bear, then butterfly, then cluster, then single tulip. When a speed gate
/// fails the roll falls through to the next band without re-rolling, so low
/// speed runs see more tulip clusters. That skew is intended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Spawn interval at zero speed, ms.
    pub base_interval: f32,
    /// Floor on the effective spawn interval, ms.
    pub min_interval: f32,
    /// Interval shrinks by this many ms per unit of current speed.
    pub speed_interval_factor: f32,
    pub bear_chance: f32,
    pub butterfly_chance: f32,
    pub cluster_chance: f32,
    pub min_speed_for_bear: f32,
    pub min_speed_for_butterfly: f32,
    pub single_tulip_large_chance: f32,
    pub cluster: ClusterConfig,
    /// Window from run start during which clusters are constrained, ms.
    pub early_game_duration: f32,
    pub early_game_max_cluster_count: u32,
    pub early_game_small_only: bool,
    pub early_game_large_chance: f32,
    pub early_game_single_tulip_large_chance: f32,
    pub early_game_cluster_spacing: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            base_interval: 1650.0,
            min_interval: 850.0,
            speed_interval_factor: 50.0,
            bear_chance: 0.2,
            butterfly_chance: 0.18,
            cluster_chance: 0.32,
            min_speed_for_bear: 6.0,
            min_speed_for_butterfly: 8.0,
            single_tulip_large_chance: 0.5,
            cluster: ClusterConfig::default(),
            early_game_duration: 20_000.0,
            early_game_max_cluster_count: 2,
            early_game_small_only: true,
            early_game_large_chance: 0.15,
            early_game_single_tulip_large_chance: 0.2,
            early_game_cluster_spacing: 4.5,
        }
    }
}

/// Ambient cloud spawning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub initial_count: u32,
    pub max_count: u32,
    pub spawn_interval: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            initial_count: 3,
            max_count: 5,
            spawn_interval: 3000.0,
        }
    }
}

/// Flying and falling decoration spawning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub max_count: u32,
    pub spawn_interval: f32,
    pub falling_max_count: u32,
    pub falling_spawn_interval: f32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            max_count: 8,
            spawn_interval: 2000.0,
            falling_max_count: 12,
            falling_spawn_interval: 1500.0,
        }
    }
}

/// Heart and cake spawning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleConfig {
    pub heart_min_interval: f32,
    pub heart_max_interval: f32,
    pub max_hearts: u32,
    /// Cakes only start spawning once the run's score reaches this.
    pub cake_start_score: u32,
    pub cake_min_interval: f32,
    pub cake_max_interval: f32,
    pub max_cakes: u32,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            heart_min_interval: 4000.0,
            heart_max_interval: 9000.0,
            max_hearts: 3,
            cake_start_score: 1000,
            cake_min_interval: 12_000.0,
            cake_max_interval: 20_000.0,
            max_cakes: 2,
        }
    }
}

/// Frame-time and particle caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Delta-time spike guard, ms.
    pub max_delta_time: f32,
    pub max_particles: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 34.0,
            max_particles: 160,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub view: ViewConfig,
    pub character: CharacterConfig,
    pub difficulty: DifficultyConfig,
    pub obstacles: ObstacleConfig,
    pub clouds: CloudConfig,
    pub decorations: DecorationConfig,
    pub collectibles: CollectibleConfig,
    pub performance: PerformanceConfig,
}

impl Config {
    /// Parse from JSON, falling back to defaults on any parse failure.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Config>(json) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                log::warn!("invalid config JSON, using defaults: {e}");
                Config::default()
            }
        }
    }

    /// Replace non-finite or nonsensical tunables with their defaults.
    pub fn sanitized(mut self) -> Self {
        fn fix(value: &mut f32, fallback: f32) {
            if !value.is_finite() || *value < 0.0 {
                *value = fallback;
            }
        }

        let d = Config::default();
        fix(&mut self.view.width, d.view.width);
        fix(&mut self.view.height, d.view.height);
        fix(&mut self.view.ground_height, d.view.ground_height);
        fix(&mut self.character.width, d.character.width);
        fix(&mut self.character.height, d.character.height);
        fix(&mut self.character.duck_height, d.character.duck_height);
        fix(&mut self.character.start_x, d.character.start_x);
        fix(&mut self.character.jump_duration, d.character.jump_duration);
        fix(&mut self.character.jump_height, d.character.jump_height);
        fix(
            &mut self.character.speed_drop_ratio,
            d.character.speed_drop_ratio,
        );
        fix(&mut self.difficulty.initial_speed, d.difficulty.initial_speed);
        fix(&mut self.difficulty.max_speed, d.difficulty.max_speed);
        fix(&mut self.difficulty.acceleration, d.difficulty.acceleration);
        fix(
            &mut self.difficulty.speed_multiplier,
            d.difficulty.speed_multiplier,
        );
        fix(&mut self.obstacles.base_interval, d.obstacles.base_interval);
        fix(&mut self.obstacles.min_interval, d.obstacles.min_interval);
        fix(
            &mut self.obstacles.speed_interval_factor,
            d.obstacles.speed_interval_factor,
        );
        fix(&mut self.obstacles.bear_chance, d.obstacles.bear_chance);
        fix(
            &mut self.obstacles.butterfly_chance,
            d.obstacles.butterfly_chance,
        );
        fix(&mut self.obstacles.cluster_chance, d.obstacles.cluster_chance);
        fix(&mut self.obstacles.cluster.spacing, d.obstacles.cluster.spacing);
        fix(
            &mut self.obstacles.cluster.large_chance,
            d.obstacles.cluster.large_chance,
        );
        fix(
            &mut self.obstacles.early_game_duration,
            d.obstacles.early_game_duration,
        );
        fix(
            &mut self.collectibles.heart_min_interval,
            d.collectibles.heart_min_interval,
        );
        fix(
            &mut self.collectibles.heart_max_interval,
            d.collectibles.heart_max_interval,
        );
        fix(
            &mut self.collectibles.cake_min_interval,
            d.collectibles.cake_min_interval,
        );
        fix(
            &mut self.collectibles.cake_max_interval,
            d.collectibles.cake_max_interval,
        );
        fix(
            &mut self.performance.max_delta_time,
            d.performance.max_delta_time,
        );
        if self.obstacles.cluster.min_count == 0 {
            self.obstacles.cluster.min_count = d.obstacles.cluster.min_count;
        }
        if self.obstacles.cluster.max_count < self.obstacles.cluster.min_count {
            self.obstacles.cluster.max_count = self.obstacles.cluster.min_count;
        }
        // ranged interval draws and cloud placement sample half-open or
        // inclusive ranges; inverted bounds or a sub-minimal viewport would
        // make those ranges empty
        if self.view.width <= 100.0 {
            self.view.width = d.view.width;
        }
        let c = &mut self.collectibles;
        if c.heart_min_interval > c.heart_max_interval {
            std::mem::swap(&mut c.heart_min_interval, &mut c.heart_max_interval);
        }
        if c.cake_min_interval > c.cake_max_interval {
            std::mem::swap(&mut c.cake_min_interval, &mut c.cake_max_interval);
        }
        self
    }
}
