//! The simulation core
//!
//! Everything that moves lives here. [`state::Game`] is the single entry
//! point: hosts construct one, feed it clamped deltas from the frame clock
//! and read back entity state after each tick.

pub mod collision;
pub mod entity;
pub mod particles;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use entity::{Cloud, Collectible, CollectibleKind, Decoration, FallingDecoration, Obstacle, ObstacleKind};
pub use particles::{Particle, Particles};
pub use player::{Player, PlayerStatus};
pub use spawn::SpawnController;
pub use state::{Game, GameEvent, GamePhase};
