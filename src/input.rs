use bevy::prelude::*;

/// Abstraction layer between raw input and the simulation.
/// Both keyboard (windowed) and scripted drivers (headless, tests) write
/// to this; the control systems only ever read it.
///
/// Jump presses latch as a one-shot edge: render frames and fixed ticks
/// don't align 1:1, so the released-to-pressed transition is recorded
/// here and consumed by exactly one simulation tick.
#[derive(Resource, Default, Clone)]
pub struct PlayerControls {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    pending_jump_press: bool,
}

impl PlayerControls {
    /// Record a released-to-pressed transition on the jump control.
    pub fn press_jump(&mut self) {
        self.jump_held = true;
        self.pending_jump_press = true;
    }

    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    /// Consume the latched press edge. Yields true at most once per
    /// press, no matter how many ticks elapse while the key stays down.
    pub fn take_jump_press(&mut self) -> bool {
        std::mem::take(&mut self.pending_jump_press)
    }

    /// Either direction held.
    pub fn moving(&self) -> bool {
        self.left || self.right
    }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PlayerControls::default()).add_systems(
            PreUpdate,
            keyboard_controls.run_if(resource_exists::<ButtonInput<KeyCode>>),
        );
    }
}

/// Translate keyboard state into PlayerControls
fn keyboard_controls(keyboard: Res<ButtonInput<KeyCode>>, mut controls: ResMut<PlayerControls>) {
    controls.left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    controls.right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);

    let jump_down = keyboard.pressed(KeyCode::Space)
        || keyboard.pressed(KeyCode::KeyW)
        || keyboard.pressed(KeyCode::ArrowUp);
    let jump_edge = keyboard.just_pressed(KeyCode::Space)
        || keyboard.just_pressed(KeyCode::KeyW)
        || keyboard.just_pressed(KeyCode::ArrowUp);

    if jump_edge {
        controls.press_jump();
    } else if jump_down {
        controls.jump_held = true;
    } else {
        controls.release_jump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_press_edge_is_consumed_once() {
        let mut controls = PlayerControls::default();
        controls.press_jump();
        assert!(controls.jump_held);
        assert!(controls.take_jump_press());
        // Still held, but the edge is spent.
        assert!(controls.jump_held);
        assert!(!controls.take_jump_press());
        assert!(!controls.take_jump_press());
    }

    #[test]
    fn releasing_and_pressing_again_arms_a_new_edge() {
        let mut controls = PlayerControls::default();
        controls.press_jump();
        assert!(controls.take_jump_press());
        controls.release_jump();
        assert!(!controls.jump_held);
        assert!(!controls.take_jump_press());
        controls.press_jump();
        assert!(controls.take_jump_press());
    }

    #[test]
    fn edge_latches_across_unconsumed_updates() {
        // A press that lands between two simulation ticks must survive
        // until the next tick consumes it.
        let mut controls = PlayerControls::default();
        controls.press_jump();
        controls.left = true;
        controls.left = false;
        assert!(controls.take_jump_press());
    }
}
