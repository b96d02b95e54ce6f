//! Scrolling entities
//!
//! Obstacles end the run on contact, collectibles award on contact, and the
//! ambient kinds (clouds, flyers, falling bits) never collide at all. Every
//! entity scrolls leftward, latches `remove` once fully off the left edge
//! and is swept by the tick loop; positions advance by `speed * frames(dt)`
//! so motion stays frame-rate independent.

use rand::Rng;

use crate::config::Config;
use crate::frames;
use crate::season::{FallingKind, FlyerKind};
use crate::sim::collision::Rect;

pub const TULIP_SMALL_SIZE: (f32, f32) = (18.0, 28.0);
pub const TULIP_LARGE_SIZE: (f32, f32) = (26.0, 38.0);
pub const BEAR_SIZE: (f32, f32) = (50.0, 50.0);
pub const BUTTERFLY_SIZE: (f32, f32) = (40.0, 30.0);
pub const HEART_SIZE: (f32, f32) = (24.0, 24.0);
pub const CAKE_SIZE: (f32, f32) = (36.0, 28.0);

/// One tulip inside a cluster, positioned relative to the cluster origin.
#[derive(Debug, Clone)]
pub struct ClusterMember {
    pub offset_x: f32,
    pub width: f32,
    pub height: f32,
    pub large: bool,
}

#[derive(Debug, Clone)]
pub enum ObstacleKind {
    Tulip { large: bool },
    TulipCluster { members: Vec<ClusterMember> },
    Bear,
    Butterfly,
}

/// A run-ending entity. `base_y` anchors the oscillating kinds; ground
/// kinds never move vertically.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub remove: bool,
    base_y: f32,
    phase: f32,
    amplitude: f32,
    frequency: f32,
    speed_variation: f32,
}

impl Obstacle {
    pub fn tulip(x: f32, ground_y: f32, large: bool) -> Self {
        let (width, height) = if large {
            TULIP_LARGE_SIZE
        } else {
            TULIP_SMALL_SIZE
        };
        let y = ground_y - height;
        Self {
            kind: ObstacleKind::Tulip { large },
            x,
            y,
            width,
            height,
            remove: false,
            base_y: y,
            phase: 0.0,
            amplitude: 0.0,
            frequency: 0.0,
            speed_variation: 1.0,
        }
    }

    /// Cluster bounds are the union of its members: width spans the last
    /// member's right edge, height is the tallest member, anchored to ground.
    pub fn tulip_cluster(x: f32, ground_y: f32, members: Vec<ClusterMember>) -> Self {
        let width = members
            .last()
            .map(|m| m.offset_x + m.width)
            .unwrap_or(0.0);
        let height = members.iter().map(|m| m.height).fold(0.0, f32::max);
        let y = ground_y - height;
        Self {
            kind: ObstacleKind::TulipCluster { members },
            x,
            y,
            width,
            height,
            remove: false,
            base_y: y,
            phase: 0.0,
            amplitude: 0.0,
            frequency: 0.0,
            speed_variation: 1.0,
        }
    }

    /// Bears hover at head height and bob gently; the arc apex clears them.
    pub fn bear(x: f32, ground_y: f32, rng: &mut impl Rng) -> Self {
        let (width, height) = BEAR_SIZE;
        let base_y = ground_y - 55.0;
        Self {
            kind: ObstacleKind::Bear,
            x,
            y: base_y,
            width,
            height,
            remove: false,
            base_y,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            amplitude: 5.0,
            frequency: 0.003,
            speed_variation: 1.0,
        }
    }

    pub fn butterfly(x: f32, ground_y: f32, rng: &mut impl Rng) -> Self {
        let (width, height) = BUTTERFLY_SIZE;
        let tiers = [ground_y - 80.0, ground_y - 60.0, ground_y - 40.0];
        let base_y = tiers[rng.random_range(0..tiers.len())];
        Self {
            kind: ObstacleKind::Butterfly,
            x,
            y: base_y,
            width,
            height,
            remove: false,
            base_y,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            amplitude: 15.0 + rng.random::<f32>() * 10.0,
            frequency: 0.002 + rng.random::<f32>() * 0.001,
            speed_variation: 0.8 + rng.random::<f32>() * 0.4,
        }
    }

    pub fn update(&mut self, speed: f32, dt_ms: f32) {
        let step = frames(dt_ms);
        match self.kind {
            ObstacleKind::Tulip { .. } | ObstacleKind::TulipCluster { .. } => {
                self.x -= speed * step;
            }
            ObstacleKind::Bear => {
                self.x -= speed * 0.9 * step;
                self.phase += self.frequency * dt_ms;
                self.y = self.base_y + self.phase.sin() * self.amplitude;
            }
            ObstacleKind::Butterfly => {
                let flutter = 1.0 + (self.phase * 2.0).sin() * 0.2;
                self.x -= speed * 1.2 * self.speed_variation * flutter * step;
                self.phase += self.frequency * dt_ms;
                self.y = self.base_y + self.phase.sin() * self.amplitude;
            }
        }
        if self.x + self.width < 0.0 {
            self.remove = true;
        }
    }

    /// Unshrunk sprite bounds.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn collision_box(&self) -> Rect {
        match self.kind {
            // tulips forgive more at the top of the stem than at the roots
            ObstacleKind::Tulip { .. } | ObstacleKind::TulipCluster { .. } => Rect::new(
                self.x + 2.0,
                self.y + 4.0,
                self.width - 4.0,
                self.height - 6.0,
            ),
            ObstacleKind::Bear => self.bounds().inset(8.0, 8.0),
            ObstacleKind::Butterfly => self.bounds().inset(5.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    Heart,
    Cake,
}

/// Hearts bob between four height tiers; cakes sit just above the ground.
/// A collected one stops colliding but keeps scrolling until culled.
#[derive(Debug, Clone)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub remove: bool,
    pub collected: bool,
    base_y: f32,
    phase: f32,
}

impl Collectible {
    pub fn heart(x: f32, ground_y: f32, rng: &mut impl Rng) -> Self {
        let (width, height) = HEART_SIZE;
        let tiers = [
            ground_y - 80.0,
            ground_y - 60.0,
            ground_y - 40.0,
            ground_y - 20.0,
        ];
        let base_y = tiers[rng.random_range(0..tiers.len())];
        Self {
            kind: CollectibleKind::Heart,
            x,
            y: base_y,
            width,
            height,
            remove: false,
            collected: false,
            base_y,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    pub fn cake(x: f32, ground_y: f32, rng: &mut impl Rng) -> Self {
        let (width, height) = CAKE_SIZE;
        let base_y = ground_y - height - 4.0;
        Self {
            kind: CollectibleKind::Cake,
            x,
            y: base_y,
            width,
            height,
            remove: false,
            collected: false,
            base_y,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    pub fn update(&mut self, speed: f32, dt_ms: f32) {
        let step = frames(dt_ms);
        match self.kind {
            CollectibleKind::Heart => {
                self.x -= speed * 0.8 * step;
                self.phase += 0.003 * dt_ms;
                self.y = self.base_y + self.phase.sin() * 8.0;
            }
            CollectibleKind::Cake => {
                self.x -= speed * 0.6 * step;
                self.phase += 0.004 * dt_ms;
                self.y = self.base_y + self.phase.sin() * 3.0;
            }
        }
        if self.x + self.width < 0.0 {
            self.remove = true;
        }
    }

    pub fn collision_box(&self) -> Rect {
        let bounds = Rect::new(self.x, self.y, self.width, self.height);
        match self.kind {
            CollectibleKind::Heart => bounds.inset(2.0, 2.0),
            CollectibleKind::Cake => bounds.inset(4.0, 4.0),
        }
    }
}

/// Ambient background cloud with its own drift speed.
#[derive(Debug, Clone)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub remove: bool,
}

impl Cloud {
    pub fn new(x: f32, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y: rng.random_range(20.0..60.0),
            width: rng.random_range(40.0..70.0),
            remove: false,
        }
    }

    pub fn update(&mut self, speed: f32, dt_ms: f32) {
        self.x -= (0.5 + speed * 0.1) * frames(dt_ms);
        if self.x + self.width < 0.0 {
            self.remove = true;
        }
    }
}

/// Ambient flyer; drifts slower than the world and bobs gently.
#[derive(Debug, Clone)]
pub struct Decoration {
    pub kind: FlyerKind,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub remove: bool,
    drift: f32,
    float_phase: f32,
}

impl Decoration {
    pub fn new(kind: FlyerKind, x: f32, rng: &mut impl Rng) -> Self {
        Self {
            kind,
            x,
            y: rng.random_range(26.0..90.0),
            scale: 0.8 + rng.random::<f32>() * 0.4,
            remove: false,
            drift: 0.5 + rng.random::<f32>() * 0.4,
            float_phase: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    pub fn update(&mut self, speed: f32, dt_ms: f32) {
        let step = frames(dt_ms);
        self.x -= (self.drift + speed * 0.08) * step;
        self.float_phase += 0.03 * step;
        self.y += self.float_phase.sin() * 0.2 * step;
        if self.x < -40.0 {
            self.remove = true;
        }
    }
}

/// Falling ambient bit (blossom, leaf, snowflake). Spawns above the top
/// edge, sways sideways and is culled below the bottom.
#[derive(Debug, Clone)]
pub struct FallingDecoration {
    pub kind: FallingKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub rotation: f32,
    pub remove: bool,
    anchor_x: f32,
    fall_speed: f32,
    sway_phase: f32,
    sway_speed: f32,
    sway_amount: f32,
    rotation_speed: f32,
}

impl FallingDecoration {
    pub fn new(kind: FallingKind, config: &Config, rng: &mut impl Rng) -> Self {
        let anchor_x = rng.random_range(0.0..config.view.width);
        Self {
            kind,
            x: anchor_x,
            y: -20.0,
            size: rng.random_range(12.0..20.0),
            rotation: 0.0,
            remove: false,
            anchor_x,
            fall_speed: 0.5 + rng.random::<f32>(),
            sway_phase: rng.random_range(0.0..std::f32::consts::TAU),
            sway_speed: 0.002 + rng.random::<f32>() * 0.003,
            sway_amount: 10.0 + rng.random::<f32>() * 20.0,
            rotation_speed: (rng.random::<f32>() - 0.5) * 0.05,
        }
    }

    pub fn update(&mut self, view_height: f32, dt_ms: f32) {
        let step = frames(dt_ms);
        self.y += self.fall_speed * step;
        self.sway_phase += self.sway_speed * dt_ms;
        self.x = self.anchor_x + self.sway_phase.sin() * self.sway_amount;
        self.rotation += self.rotation_speed * step;
        if self.y > view_height {
            self.remove = true;
        }
    }
}
