//! Season themes
//!
//! A season is purely cosmetic except where it gates spawn tables: each one
//! maps to fixed sets of flying and falling decoration kinds (an empty
//! falling set means that category never spawns). The mapping is a flat
//! table; the spawn controller samples from it.

use serde::{Deserialize, Serialize};

/// The four playable seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Spring,
        Season::Summer,
        Season::Autumn,
        Season::Winter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    /// Parse a season name; unknown names are rejected (used by the season
    /// setter, which must be a no-op on invalid input).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "autumn" | "fall" => Some(Season::Autumn),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn theme(&self) -> &'static SeasonTheme {
        match self {
            Season::Spring => &SPRING,
            Season::Summer => &SUMMER,
            Season::Autumn => &AUTUMN,
            Season::Winter => &WINTER,
        }
    }
}

/// Flying decoration kinds (ambient, never collidable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlyerKind {
    Bird,
    Bee,
    Butterfly,
    Squirrel,
}

/// Falling decoration kinds (ambient, spawn at the top edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallingKind {
    Blossom,
    Leaf,
    MapleLeaf,
    Snowflake,
}

/// Per-season spawn tables plus the static ground decoration glyphs the
/// renderer may use.
#[derive(Debug)]
pub struct SeasonTheme {
    pub decorations: &'static [&'static str],
    pub flying: &'static [FlyerKind],
    pub falling: &'static [FallingKind],
}

static SPRING: SeasonTheme = SeasonTheme {
    decorations: &["🌸", "🌷", "🐝"],
    flying: &[FlyerKind::Bird, FlyerKind::Bee, FlyerKind::Butterfly],
    falling: &[FallingKind::Blossom],
};

static SUMMER: SeasonTheme = SeasonTheme {
    decorations: &["🌻", "☀️", "🦋"],
    flying: &[FlyerKind::Butterfly, FlyerKind::Bee, FlyerKind::Bird],
    falling: &[],
};

static AUTUMN: SeasonTheme = SeasonTheme {
    decorations: &["🍂", "🍁", "🌰"],
    flying: &[FlyerKind::Bird, FlyerKind::Squirrel],
    falling: &[FallingKind::Leaf, FallingKind::MapleLeaf],
};

static WINTER: SeasonTheme = SeasonTheme {
    decorations: &["❄️", "⛄", "🎄"],
    flying: &[FlyerKind::Bird],
    falling: &[FallingKind::Snowflake],
};
