use bevy::prelude::*;

use crate::control_core::{AirBandThresholds, Pose};

/// Marks the player entity
#[derive(Component)]
pub struct Player;

/// Position in room space (pixels, origin top-left, y grows downward)
#[derive(Component, Clone, Copy, Default, Debug)]
pub struct GamePosition {
    pub x: f32,
    pub y: f32,
}

/// Velocity in room-space units per second (positive y = downward)
#[derive(Component, Clone, Copy, Default, Debug)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Whether the entity is resting on a support below it
#[derive(Component, Clone, Copy, Default)]
pub struct Grounded(pub bool);

/// Axis-aligned collision box, centered on the entity's GamePosition
#[derive(Component, Clone, Copy)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
}

/// Active animation state for a sprite-sheet driven entity.
/// `frame` indexes into the active clip's frame list, not the sheet.
#[derive(Component, Clone)]
pub struct AnimationController {
    pub pose: Pose,
    pub frame: usize,
    pub timer: f32,
    pub playing: bool,
    pub facing_right: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            pose: Pose::Idle,
            frame: 0,
            timer: 0.0,
            playing: true,
            facing_right: true,
        }
    }
}

/// True when running without a window (no rendering, no keyboard)
#[derive(Resource, Clone, Copy)]
pub struct HeadlessMode(pub bool);

/// Movement tuning (as a resource so it can be adjusted in one place)
#[derive(Resource, Clone, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    pub move_speed: f32,
    /// Applied to vertical velocity on a jump; negative = upward.
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Terminal velocity cap, keeps fast falls from tunneling platforms.
    pub max_fall_speed: f32,
    pub air_bands: AirBandThresholds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_speed: 220.0,
            jump_velocity: -560.0,
            gravity: 900.0,
            max_fall_speed: 1000.0,
            air_bands: AirBandThresholds::default(),
        }
    }
}
