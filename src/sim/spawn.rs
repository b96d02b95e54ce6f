//! Spawn scheduling
//!
//! One timer per entity stream. Obstacles spawn on an interval that tightens
//! with speed down to a hard floor; everything else spawns on fixed or
//! rolled intervals and respects a per-stream population cap. A stream at
//! its cap lets the timer keep accumulating, so the next spawn fires as
//! soon as a slot frees up.

use rand::Rng;

use crate::config::{Config, ObstacleConfig};
use crate::season::Season;
use crate::sim::entity::{
    Cloud, ClusterMember, Collectible, Decoration, FallingDecoration, Obstacle,
    TULIP_LARGE_SIZE, TULIP_SMALL_SIZE,
};

/// Outcome bands of the obstacle kind draw, in roll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObstacleDraw {
    Bear,
    Butterfly,
    Cluster,
    Single,
}

/// Single uniform roll walked through cumulative bands. A failed speed gate
/// falls through to the next band without re-rolling.
fn select_draw(roll: f32, speed: f32, o: &ObstacleConfig) -> ObstacleDraw {
    if roll < o.bear_chance && speed > o.min_speed_for_bear {
        ObstacleDraw::Bear
    } else if roll < o.bear_chance + o.butterfly_chance && speed > o.min_speed_for_butterfly {
        ObstacleDraw::Butterfly
    } else if roll < o.bear_chance + o.butterfly_chance + o.cluster_chance {
        ObstacleDraw::Cluster
    } else {
        ObstacleDraw::Single
    }
}

#[derive(Debug, Clone)]
pub struct SpawnController {
    obstacle_timer: f32,
    cloud_timer: f32,
    decoration_timer: f32,
    falling_timer: f32,
    heart_timer: f32,
    next_heart_interval: f32,
    cake_timer: f32,
    next_cake_interval: f32,
}

impl SpawnController {
    pub fn new(config: &Config, rng: &mut impl Rng) -> Self {
        let c = &config.collectibles;
        Self {
            obstacle_timer: 0.0,
            cloud_timer: 0.0,
            decoration_timer: 0.0,
            falling_timer: 0.0,
            heart_timer: 0.0,
            next_heart_interval: rng.random_range(c.heart_min_interval..=c.heart_max_interval),
            cake_timer: 0.0,
            next_cake_interval: rng.random_range(c.cake_min_interval..=c.cake_max_interval),
        }
    }

    /// Zero every timer and re-roll the ranged intervals.
    pub fn reset(&mut self, config: &Config, rng: &mut impl Rng) {
        let c = &config.collectibles;
        self.obstacle_timer = 0.0;
        self.cloud_timer = 0.0;
        self.decoration_timer = 0.0;
        self.falling_timer = 0.0;
        self.heart_timer = 0.0;
        self.next_heart_interval = rng.random_range(c.heart_min_interval..=c.heart_max_interval);
        self.cake_timer = 0.0;
        self.next_cake_interval = rng.random_range(c.cake_min_interval..=c.cake_max_interval);
    }

    /// `base - speed * factor`, floored at the configured minimum.
    pub fn effective_obstacle_interval(speed: f32, o: &ObstacleConfig) -> f32 {
        o.min_interval.max(o.base_interval - speed * o.speed_interval_factor)
    }

    pub fn poll_obstacle(
        &mut self,
        dt_ms: f32,
        speed: f32,
        run_elapsed_ms: f32,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Option<Obstacle> {
        self.obstacle_timer += dt_ms;
        let interval = Self::effective_obstacle_interval(speed, &config.obstacles);
        if self.obstacle_timer < interval {
            return None;
        }
        self.obstacle_timer = 0.0;
        Some(self.build_obstacle(speed, run_elapsed_ms, config, rng))
    }

    fn build_obstacle(
        &self,
        speed: f32,
        run_elapsed_ms: f32,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Obstacle {
        let o = &config.obstacles;
        let ground_y = config.view.ground_y();
        let x = config.view.width;
        let early = run_elapsed_ms < o.early_game_duration;

        let roll: f32 = rng.random();
        match select_draw(roll, speed, o) {
            ObstacleDraw::Bear => Obstacle::bear(x, ground_y, rng),
            ObstacleDraw::Butterfly => Obstacle::butterfly(x, ground_y, rng),
            ObstacleDraw::Cluster => {
                let max_count = if early {
                    o.early_game_max_cluster_count.max(o.cluster.min_count)
                } else {
                    o.cluster.max_count
                };
                let spacing = if early {
                    o.early_game_cluster_spacing
                } else {
                    o.cluster.spacing
                };
                let large_chance = if early {
                    o.early_game_large_chance
                } else {
                    o.cluster.large_chance
                };
                let small_only = early && o.early_game_small_only;

                let count = rng.random_range(o.cluster.min_count..=max_count);
                let mut members = Vec::with_capacity(count as usize);
                let mut offset = 0.0;
                for _ in 0..count {
                    let large = !small_only && rng.random::<f32>() < large_chance;
                    let (width, height) = if large {
                        TULIP_LARGE_SIZE
                    } else {
                        TULIP_SMALL_SIZE
                    };
                    members.push(ClusterMember {
                        offset_x: offset,
                        width,
                        height,
                        large,
                    });
                    offset += width + spacing;
                }
                Obstacle::tulip_cluster(x, ground_y, members)
            }
            ObstacleDraw::Single => {
                let large_chance = if early {
                    o.early_game_single_tulip_large_chance
                } else {
                    o.single_tulip_large_chance
                };
                let large = rng.random::<f32>() < large_chance;
                Obstacle::tulip(x, ground_y, large)
            }
        }
    }

    pub fn poll_cloud(
        &mut self,
        dt_ms: f32,
        cloud_count: usize,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Option<Cloud> {
        self.cloud_timer += dt_ms;
        if self.cloud_timer < config.clouds.spawn_interval
            || cloud_count >= config.clouds.max_count as usize
        {
            return None;
        }
        self.cloud_timer = 0.0;
        Some(Cloud::new(config.view.width, rng))
    }

    pub fn poll_decoration(
        &mut self,
        dt_ms: f32,
        count: usize,
        season: Season,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Option<Decoration> {
        self.decoration_timer += dt_ms;
        if self.decoration_timer < config.decorations.spawn_interval
            || count >= config.decorations.max_count as usize
        {
            return None;
        }
        self.decoration_timer = 0.0;
        let flyers = season.theme().flying;
        if flyers.is_empty() {
            return None;
        }
        let kind = flyers[rng.random_range(0..flyers.len())];
        Some(Decoration::new(kind, config.view.width, rng))
    }

    pub fn poll_falling(
        &mut self,
        dt_ms: f32,
        count: usize,
        season: Season,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Option<FallingDecoration> {
        self.falling_timer += dt_ms;
        if self.falling_timer < config.decorations.falling_spawn_interval
            || count >= config.decorations.falling_max_count as usize
        {
            return None;
        }
        self.falling_timer = 0.0;
        let kinds = season.theme().falling;
        if kinds.is_empty() {
            return None;
        }
        let kind = kinds[rng.random_range(0..kinds.len())];
        Some(FallingDecoration::new(kind, config, rng))
    }

    pub fn poll_heart(
        &mut self,
        dt_ms: f32,
        heart_count: usize,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Option<Collectible> {
        self.heart_timer += dt_ms;
        let c = &config.collectibles;
        if self.heart_timer < self.next_heart_interval
            || heart_count >= c.max_hearts as usize
        {
            return None;
        }
        self.heart_timer = 0.0;
        self.next_heart_interval = rng.random_range(c.heart_min_interval..=c.heart_max_interval);
        let x = config.view.width + rng.random_range(20.0..=120.0);
        Some(Collectible::heart(x, config.view.ground_y(), rng))
    }

    /// Cakes are the endgame reward: the timer only runs once the score has
    /// reached the activation goal, so no credit accrues beforehand.
    pub fn poll_cake(
        &mut self,
        dt_ms: f32,
        score: u32,
        cake_count: usize,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Option<Collectible> {
        let c = &config.collectibles;
        if score < c.cake_start_score {
            return None;
        }
        self.cake_timer += dt_ms;
        if self.cake_timer < self.next_cake_interval || cake_count >= c.max_cakes as usize {
            return None;
        }
        self.cake_timer = 0.0;
        self.next_cake_interval = rng.random_range(c.cake_min_interval..=c.cake_max_interval);
        let x = config.view.width + rng.random_range(60.0..=140.0);
        Some(Collectible::cake(x, config.view.ground_y(), rng))
    }
}
