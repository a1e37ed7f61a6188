use bevy::prelude::*;

use crate::components::*;
use crate::control_core::{self, Facing};
use crate::input::PlayerControls;

/// Per-tick decision step: turns the observed input and support state
/// into this tick's motion command (horizontal velocity, facing, jump
/// impulse). Runs inside the physics chain, between gravity and
/// integration.
pub fn player_control(
    config: Res<GameConfig>,
    mut controls: ResMut<PlayerControls>,
    mut query: Query<(&mut Velocity, &Grounded, &mut AnimationController), With<Player>>,
) {
    // The edge is consumed whether or not a jump results; a press spent
    // in mid-air must not fire later on landing.
    let jump_edge = controls.take_jump_press();
    for (mut vel, grounded, mut anim) in query.iter_mut() {
        vel.x = control_core::horizontal_velocity(controls.left, controls.right, config.move_speed);

        if let Some(facing) = control_core::facing_change(controls.left, controls.right) {
            anim.facing_right = facing == Facing::Right;
        }

        if control_core::should_jump(jump_edge, grounded.0) {
            vel.y = config.jump_velocity;
        }
    }
}
