//! Player actor state machine
//!
//! The runner has five states: Waiting (pre-run), Running, Jumping, Ducking
//! and Crashed. Jumping follows a fixed-duration eased arc driven by elapsed
//! jump time, not velocity integration, so landings are deterministic. A
//! speed drop fast-forwards the arc timer instead of teleporting the actor.

use crate::config::{CharacterConfig, Config};
use crate::sim::collision::Rect;

use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Waiting,
    Running,
    Jumping,
    Ducking,
    Crashed,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub status: PlayerStatus,
    /// Jumps performed this run.
    pub jump_count: u32,
    jump_time: f32,
    character: CharacterConfig,
    ground_y: f32,
}

impl Player {
    pub fn new(config: &Config) -> Self {
        let character = config.character.clone();
        let ground_y = config.view.ground_y();
        Self {
            x: character.start_x,
            y: ground_y - character.height,
            status: PlayerStatus::Waiting,
            jump_count: 0,
            jump_time: 0.0,
            character,
            ground_y,
        }
    }

    #[inline]
    fn standing_y(&self) -> f32 {
        self.ground_y - self.character.height
    }

    #[inline]
    fn ducking_y(&self) -> f32 {
        self.ground_y - self.character.duck_height
    }

    pub fn is_jumping(&self) -> bool {
        self.status == PlayerStatus::Jumping
    }

    pub fn is_ducking(&self) -> bool {
        self.status == PlayerStatus::Ducking
    }

    pub fn is_crashed(&self) -> bool {
        self.status == PlayerStatus::Crashed
    }

    /// Begin a run (or a new run after a crash).
    pub fn reset(&mut self) {
        self.x = self.character.start_x;
        self.y = self.standing_y();
        self.status = PlayerStatus::Running;
        self.jump_count = 0;
        self.jump_time = 0.0;
    }

    /// Start a jump. Rejected (returns false) while already airborne,
    /// ducking or crashed; a rejected jump does not count.
    pub fn jump(&mut self) -> bool {
        match self.status {
            PlayerStatus::Running | PlayerStatus::Waiting => {
                self.status = PlayerStatus::Jumping;
                self.jump_time = 0.0;
                self.jump_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Enter or leave the duck. Ignored while airborne or crashed; duck(false)
    /// only stands the actor back up if it was actually ducking.
    pub fn duck(&mut self, down: bool) {
        match (down, self.status) {
            (true, PlayerStatus::Running) => {
                self.status = PlayerStatus::Ducking;
                self.y = self.ducking_y();
            }
            (false, PlayerStatus::Ducking) => {
                self.status = PlayerStatus::Running;
                self.y = self.standing_y();
            }
            _ => {}
        }
    }

    /// Fast-fall: jump the arc timer forward so the descent begins at once.
    /// Only meaningful mid-jump; monotone (never rewinds the timer).
    pub fn speed_drop(&mut self) {
        if self.status == PlayerStatus::Jumping {
            let target = self.character.jump_duration * self.character.speed_drop_ratio;
            self.jump_time = self.jump_time.max(target);
        }
    }

    pub fn crash(&mut self) {
        self.status = PlayerStatus::Crashed;
    }

    /// Advance the jump arc. The vertical offset is a smoothstep-eased half
    /// sine: `t = min(elapsed / duration, 1)`, `arc = sin(pi * t)`,
    /// `ease = arc^2 * (3 - 2 * arc)`, `y = standing - ease * jump_height`.
    pub fn update(&mut self, dt_ms: f32) {
        if self.status != PlayerStatus::Jumping {
            return;
        }
        self.jump_time += dt_ms;
        let t = (self.jump_time / self.character.jump_duration).min(1.0);
        if t >= 1.0 {
            self.y = self.standing_y();
            self.status = PlayerStatus::Running;
            return;
        }
        let arc = (PI * t).sin();
        let ease = arc * arc * (3.0 - 2.0 * arc);
        self.y = self.standing_y() - ease * self.character.jump_height;
    }

    /// Hit box, tighter than the sprite. Ducking uses a wider, shorter box.
    pub fn collision_box(&self) -> Rect {
        if self.status == PlayerStatus::Ducking {
            Rect::new(
                self.x + 5.0,
                self.y + 5.0,
                self.character.width,
                self.character.duck_height - 10.0,
            )
        } else {
            Rect::new(
                self.x,
                self.y,
                self.character.width,
                self.character.height,
            )
            .inset(5.0, 5.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        let mut p = Player::new(&Config::default());
        p.reset();
        p
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let mut p = player();
        let ground = p.y;
        assert!(p.jump());
        p.update(260.0); // mid-arc
        assert!(p.y < ground);
        p.update(260.0); // full duration elapsed
        assert_eq!(p.y, ground);
        assert_eq!(p.status, PlayerStatus::Running);
    }

    #[test]
    fn test_apex_reaches_full_height() {
        let mut p = player();
        let ground = p.y;
        p.jump();
        p.update(260.0); // t = 0.5, sin = 1, ease = 1
        assert!((ground - p.y - 65.0).abs() < 0.01);
    }

    #[test]
    fn test_arc_never_dips_below_ground() {
        let mut p = player();
        let ground = p.y;
        p.jump();
        for _ in 0..60 {
            p.update(10.0);
            assert!(p.y <= ground);
        }
        assert_eq!(p.y, ground);
    }

    #[test]
    fn test_jump_rejected_while_airborne() {
        let mut p = player();
        assert!(p.jump());
        p.update(100.0);
        assert!(!p.jump());
        assert_eq!(p.jump_count, 1);
    }

    #[test]
    fn test_jump_rejected_while_ducking_and_crashed() {
        let mut p = player();
        p.duck(true);
        assert!(!p.jump());
        p.duck(false);
        p.crash();
        assert!(!p.jump());
        assert_eq!(p.jump_count, 0);
    }

    #[test]
    fn test_duck_ignored_mid_jump() {
        let mut p = player();
        p.jump();
        p.update(100.0);
        p.duck(true);
        assert_eq!(p.status, PlayerStatus::Jumping);
    }

    #[test]
    fn test_duck_changes_box_shape() {
        let mut p = player();
        let standing = p.collision_box();
        p.duck(true);
        let ducking = p.collision_box();
        assert!(ducking.height < standing.height);
        assert!(ducking.width > standing.width);
        assert!(ducking.y > standing.y);
    }

    #[test]
    fn test_speed_drop_shortens_jump() {
        let mut p = player();
        p.jump();
        p.update(100.0);
        p.speed_drop();
        // 85% of 520ms already elapsed after the drop; 80ms more finishes it
        p.update(80.0);
        assert_eq!(p.status, PlayerStatus::Running);
    }

    #[test]
    fn test_speed_drop_never_rewinds() {
        let mut p = player();
        p.jump();
        p.update(500.0); // past the drop target of 442ms
        let y_before = p.y;
        p.speed_drop();
        p.update(0.0);
        assert_eq!(p.y, y_before);
    }

    #[test]
    fn test_speed_drop_on_ground_is_noop() {
        let mut p = player();
        p.speed_drop();
        assert_eq!(p.status, PlayerStatus::Running);
        p.update(16.0);
        assert_eq!(p.status, PlayerStatus::Running);
    }

    #[test]
    fn test_crash_sticks_through_update() {
        let mut p = player();
        p.jump();
        p.crash();
        p.update(1000.0);
        assert_eq!(p.status, PlayerStatus::Crashed);
    }

    proptest::proptest! {
        #[test]
        fn prop_arc_stays_above_ground_for_any_stepping(
            steps in proptest::collection::vec(1.0f32..50.0, 1..80)
        ) {
            let mut p = player();
            let ground = p.y;
            p.jump();
            for dt in steps {
                p.update(dt);
                proptest::prop_assert!(p.y <= ground);
            }
        }
    }
}
