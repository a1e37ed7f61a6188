//! Pure per-tick movement and pose decisions for the player character.
//!
//! Everything in this module is a total function of the observed frame
//! state: no ECS types, no engine handles, no side effects. The host
//! systems in `control` and `animation` feed these from resources and
//! components; the headless runner in `simulation` calls them directly.
//!
//! Vertical axis convention is downward-positive (room space), so a
//! negative vertical velocity means the body is moving up.

use serde::{Deserialize, Serialize};

/// Vertical-velocity thresholds splitting airborne motion into four
/// bands. Tuned values, carried as configuration rather than constants.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AirBandThresholds {
    /// Below this the body is still launching upward hard.
    pub rising_fast_below: f32,
    /// Below this (but past `rising_fast_below`) it is still ascending.
    pub rising_below: f32,
    /// Below this it is around the apex or starting to drop; at or past
    /// it, it is falling fast.
    pub falling_fast_from: f32,
}

impl Default for AirBandThresholds {
    fn default() -> Self {
        Self {
            rising_fast_below: -220.0,
            rising_below: -20.0,
            falling_fast_from: 190.0,
        }
    }
}

/// Horizontal facing of the sprite.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// One of the four airborne vertical-velocity bands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AirBand {
    RisingFast,
    Rising,
    Apex,
    Falling,
}

impl AirBand {
    /// Position of this band in the ordered airborne frame list.
    pub fn index(self) -> usize {
        match self {
            AirBand::RisingFast => 0,
            AirBand::Rising => 1,
            AirBand::Apex => 2,
            AirBand::Falling => 3,
        }
    }
}

/// What the player body should display this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Idle,
    Run,
    Airborne(AirBand),
}

/// Signed horizontal speed from the left/right hold state.
///
/// Conflicting input cancels: both held (or neither) yields zero rather
/// than picking a priority side.
pub fn horizontal_velocity(left: bool, right: bool, speed: f32) -> f32 {
    let mut dir = 0.0;
    if left {
        dir -= 1.0;
    }
    if right {
        dir += 1.0;
    }
    dir * speed
}

/// Whether a jump impulse applies this tick: only on a fresh press edge
/// while the body is supported. Holding the key or pressing mid-air
/// never triggers.
pub fn should_jump(jump_just_pressed: bool, grounded: bool) -> bool {
    jump_just_pressed && grounded
}

/// Facing update from the hold state. `None` leaves the current facing
/// untouched. Left wins when both directions are held, matching the
/// zero-velocity tie-break (the sprite turns, the body stays put).
pub fn facing_change(left: bool, right: bool) -> Option<Facing> {
    if left {
        Some(Facing::Left)
    } else if right {
        Some(Facing::Right)
    } else {
        None
    }
}

/// Classify a vertical velocity into its airborne band. Total over all
/// finite inputs; each boundary belongs to the band on its right.
pub fn air_band(vy: f32, bands: &AirBandThresholds) -> AirBand {
    if vy < bands.rising_fast_below {
        AirBand::RisingFast
    } else if vy < bands.rising_below {
        AirBand::Rising
    } else if vy < bands.falling_fast_from {
        AirBand::Apex
    } else {
        AirBand::Falling
    }
}

/// Look up the sheet frame for an airborne band in an ordered frame
/// list. Short lists clamp instead of failing: the two falling bands
/// fall back to the last entry, the weak-rise band to the first. An
/// empty list yields `None` and the caller keeps its current frame.
pub fn airborne_frame(frames: &[usize], band: AirBand) -> Option<usize> {
    match band {
        AirBand::RisingFast => frames.first().copied(),
        AirBand::Rising => frames.get(1).or_else(|| frames.first()).copied(),
        AirBand::Apex => frames.get(2).or_else(|| frames.last()).copied(),
        AirBand::Falling => frames.get(3).or_else(|| frames.last()).copied(),
    }
}

/// Full pose decision for one tick. `moving` is the raw hold state
/// (either direction held), not the resulting velocity: opposing keys
/// cancel motion but still read as running while grounded.
pub fn select_pose(grounded: bool, moving: bool, vy: f32, bands: &AirBandThresholds) -> Pose {
    if !grounded {
        Pose::Airborne(air_band(vy, bands))
    } else if moving {
        Pose::Run
    } else {
        Pose::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 220.0;

    #[test]
    fn horizontal_velocity_left_only_is_negative_speed() {
        assert_eq!(horizontal_velocity(true, false, SPEED), -SPEED);
    }

    #[test]
    fn horizontal_velocity_right_only_is_positive_speed() {
        assert_eq!(horizontal_velocity(false, true, SPEED), SPEED);
    }

    #[test]
    fn horizontal_velocity_cancels_on_conflicting_or_missing_input() {
        assert_eq!(horizontal_velocity(true, true, SPEED), 0.0);
        assert_eq!(horizontal_velocity(false, false, SPEED), 0.0);
    }

    #[test]
    fn horizontal_velocity_respects_configured_speed() {
        assert_eq!(horizontal_velocity(false, true, 90.0), 90.0);
        assert_eq!(horizontal_velocity(true, false, 90.0), -90.0);
    }

    #[test]
    fn should_jump_is_logical_and() {
        assert!(should_jump(true, true));
        assert!(!should_jump(true, false));
        assert!(!should_jump(false, true));
        assert!(!should_jump(false, false));
    }

    #[test]
    fn facing_follows_held_direction_and_left_wins_ties() {
        assert_eq!(facing_change(true, false), Some(Facing::Left));
        assert_eq!(facing_change(false, true), Some(Facing::Right));
        assert_eq!(facing_change(true, true), Some(Facing::Left));
        assert_eq!(facing_change(false, false), None);
    }

    #[test]
    fn air_band_boundaries_belong_to_the_right_band() {
        let bands = AirBandThresholds::default();
        assert_eq!(air_band(-220.1, &bands), AirBand::RisingFast);
        assert_eq!(air_band(-220.0, &bands), AirBand::Rising);
        assert_eq!(air_band(-20.1, &bands), AirBand::Rising);
        assert_eq!(air_band(-20.0, &bands), AirBand::Apex);
        assert_eq!(air_band(189.9, &bands), AirBand::Apex);
        assert_eq!(air_band(190.0, &bands), AirBand::Falling);
    }

    #[test]
    fn air_band_partitions_the_velocity_line() {
        // Band index must be monotone in velocity with no gaps.
        let bands = AirBandThresholds::default();
        let mut last = 0;
        let mut v = -600.0;
        while v <= 600.0 {
            let idx = air_band(v, &bands).index();
            assert!(idx >= last, "band regressed at v={v}");
            assert!(idx - last <= 1, "band skipped at v={v}");
            last = idx;
            v += 0.5;
        }
        assert_eq!(last, AirBand::Falling.index());
    }

    #[test]
    fn airborne_frame_uses_full_list_when_present() {
        let frames = [10, 11, 12, 13];
        assert_eq!(airborne_frame(&frames, AirBand::RisingFast), Some(10));
        assert_eq!(airborne_frame(&frames, AirBand::Rising), Some(11));
        assert_eq!(airborne_frame(&frames, AirBand::Apex), Some(12));
        assert_eq!(airborne_frame(&frames, AirBand::Falling), Some(13));
    }

    #[test]
    fn airborne_frame_clamps_short_lists() {
        let one = [10];
        assert_eq!(airborne_frame(&one, AirBand::Rising), Some(10));
        assert_eq!(airborne_frame(&one, AirBand::Apex), Some(10));
        assert_eq!(airborne_frame(&one, AirBand::Falling), Some(10));

        let two = [10, 11];
        assert_eq!(airborne_frame(&two, AirBand::Rising), Some(11));
        assert_eq!(airborne_frame(&two, AirBand::Apex), Some(11));
        assert_eq!(airborne_frame(&two, AirBand::Falling), Some(11));

        let three = [10, 11, 12];
        assert_eq!(airborne_frame(&three, AirBand::Falling), Some(12));
    }

    #[test]
    fn airborne_frame_tolerates_empty_list() {
        assert_eq!(airborne_frame(&[], AirBand::RisingFast), None);
        assert_eq!(airborne_frame(&[], AirBand::Falling), None);
    }

    #[test]
    fn select_pose_grounded_follows_hold_state() {
        let bands = AirBandThresholds::default();
        assert_eq!(select_pose(true, true, 0.0, &bands), Pose::Run);
        assert_eq!(select_pose(true, false, 0.0, &bands), Pose::Idle);
    }

    #[test]
    fn select_pose_airborne_ignores_hold_state() {
        let bands = AirBandThresholds::default();
        assert_eq!(
            select_pose(false, true, -560.0, &bands),
            Pose::Airborne(AirBand::RisingFast)
        );
        assert_eq!(
            select_pose(false, false, 400.0, &bands),
            Pose::Airborne(AirBand::Falling)
        );
    }
}
