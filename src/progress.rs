//! Achievements and cumulative stats
//!
//! Unlocks are monotonic: once an achievement is persisted as unlocked it is
//! never re-announced or revoked, even across corrupt-store recovery. Stats
//! accumulate across runs; per-run counters are folded in when a run ends
//! (crash or restart), never mid-run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::season::Season;
use crate::store::{AchievementFlag, ProgressBundle, ProgressStore};

/// Every achievement the engine can award.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstJump,
    Jumps10,
    Jumps50,
    Score100,
    Score500,
    Score1000,
    Dodge10,
    Dodge50,
    AllSeasons,
    PlayTime5,
}

impl AchievementId {
    pub const ALL: [AchievementId; 10] = [
        AchievementId::FirstJump,
        AchievementId::Jumps10,
        AchievementId::Jumps50,
        AchievementId::Score100,
        AchievementId::Score500,
        AchievementId::Score1000,
        AchievementId::Dodge10,
        AchievementId::Dodge50,
        AchievementId::AllSeasons,
        AchievementId::PlayTime5,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::FirstJump => "First Hop",
            AchievementId::Jumps10 => "Frequent Flyer",
            AchievementId::Jumps50 => "Leap Legend",
            AchievementId::Score100 => "Century",
            AchievementId::Score500 => "High Roller",
            AchievementId::Score1000 => "Cake Worthy",
            AchievementId::Dodge10 => "Slippery",
            AchievementId::Dodge50 => "Untouchable",
            AchievementId::AllSeasons => "World Traveler",
            AchievementId::PlayTime5 => "Dedicated",
        }
    }
}

/// Cumulative, cross-run statistics as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_jumps: u32,
    pub total_dodges: u32,
    /// Cumulative milliseconds of Playing-phase time.
    pub total_play_time: f64,
    pub high_score: u32,
    pub seasons_played: BTreeSet<Season>,
}

/// Per-run values the achievement check reads. Built by the run controller
/// at the end of each tick; jump/dodge counts are this run's, not totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSnapshot {
    pub score: u32,
    pub jumps: u32,
    pub dodges: u32,
    pub season: Season,
}

const PLAY_TIME_GOAL_MS: f64 = 5.0 * 60.0 * 1000.0;

/// Owns the persisted bundle and the store behind it.
pub struct AchievementSystem {
    store: Box<dyn ProgressStore>,
    bundle: ProgressBundle,
}

impl AchievementSystem {
    /// Load prior progress from the store; corrupt or missing data starts
    /// from an empty bundle.
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        let bundle = store.load_progress().unwrap_or_default();
        Self { store, bundle }
    }

    pub fn stats(&self) -> &Stats {
        &self.bundle.stats
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.bundle.is_unlocked(id)
    }

    /// Fold a finished (or restarted-away) run into the cumulative stats.
    /// `play_time_ms` is the portion of Playing-phase time not yet committed.
    pub fn commit_run(&mut self, snapshot: &RunSnapshot, play_time_ms: f64) {
        let stats = &mut self.bundle.stats;
        stats.total_jumps += snapshot.jumps;
        stats.total_dodges += snapshot.dodges;
        stats.total_play_time += play_time_ms;
        stats.high_score = stats.high_score.max(snapshot.score);
        stats.seasons_played.insert(snapshot.season);
        self.persist();
    }

    /// Evaluate unlock conditions. Score, jump and dodge tiers read the
    /// current run only; play time and seasons add the run onto committed
    /// totals. Returns newly unlocked ids (never ones already persisted);
    /// persists only if something changed.
    pub fn check(&mut self, snapshot: &RunSnapshot, run_play_time_ms: f64) -> Vec<AchievementId> {
        let stats = &self.bundle.stats;
        let play_time = stats.total_play_time + run_play_time_ms;
        let mut seasons = stats.seasons_played.clone();
        seasons.insert(snapshot.season);

        let mut unlocked = Vec::new();
        for id in AchievementId::ALL {
            if self.bundle.is_unlocked(id) {
                continue;
            }
            let earned = match id {
                AchievementId::FirstJump => snapshot.jumps >= 1,
                AchievementId::Jumps10 => snapshot.jumps >= 10,
                AchievementId::Jumps50 => snapshot.jumps >= 50,
                AchievementId::Score100 => snapshot.score >= 100,
                AchievementId::Score500 => snapshot.score >= 500,
                AchievementId::Score1000 => snapshot.score >= 1000,
                AchievementId::Dodge10 => snapshot.dodges >= 10,
                AchievementId::Dodge50 => snapshot.dodges >= 50,
                AchievementId::AllSeasons => seasons.len() >= 4,
                AchievementId::PlayTime5 => play_time >= PLAY_TIME_GOAL_MS,
            };
            if earned {
                self.bundle
                    .achievements
                    .insert(id, AchievementFlag { unlocked: true });
                unlocked.push(id);
            }
        }
        if !unlocked.is_empty() {
            self.persist();
        }
        unlocked
    }

    /// The store also holds the high score record; the run controller reads
    /// and writes it through here so both records share one backend.
    pub fn load_high_score(&self) -> Option<u32> {
        self.store.load_high_score()
    }

    pub fn save_high_score(&mut self, score: u32) {
        if let Err(e) = self.store.save_high_score(score) {
            log::warn!("failed to save high score: {e}");
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save_progress(&self.bundle) {
            log::warn!("failed to save progress: {e}");
        }
    }
}
