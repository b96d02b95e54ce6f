//! Tulip Dash - a side-scrolling runner simulation engine
//!
//! Core modules:
//! - `sim`: Fixed-cadence simulation (player, entities, spawning, collisions)
//! - `clock`: Frame clock with delta-time spike guard
//! - `config`: Immutable tuning tables constructed once at startup
//! - `season`: Season themes feeding the ambient spawn tables
//! - `progress`: Achievements and cumulative stats
//! - `store`: Abstract persisted-record storage
//!
//! Rendering, audio and input mapping live outside this crate: the engine
//! exposes entity positions/sizes/kinds, a per-tick event stream, and five
//! semantic triggers (start, jump, duck start/end, speed drop).

pub mod clock;
pub mod config;
pub mod progress;
pub mod season;
pub mod settings;
pub mod sim;
pub mod store;

pub use clock::FrameClock;
pub use config::Config;
pub use season::Season;
pub use settings::Settings;
pub use sim::{Game, GameEvent, GamePhase};
pub use store::{JsonFileStore, MemoryStore, ProgressStore};

/// Convert a millisecond delta into 60 Hz frame units.
///
/// The tuning tables are calibrated in pixels-per-frame at 60 fps; scrolling
/// by `speed * frames(dt)` keeps entity motion frame-rate independent while
/// preserving those numbers.
#[inline]
pub fn frames(dt_ms: f32) -> f32 {
    dt_ms * 0.06
}
