use bevy::prelude::*;

use crate::components::*;
use crate::room::Room;

pub const PLAYER_WIDTH: f32 = 24.0;
pub const PLAYER_HEIGHT: f32 = 32.0;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player);
    }
}

fn spawn_player(
    mut commands: Commands,
    room: Res<Room>,
    headless: Res<HeadlessMode>,
) {
    let (sx, sy) = room.player_spawn;

    let mut entity = commands.spawn((
        Player,
        GamePosition { x: sx, y: sy },
        Velocity::default(),
        Grounded(false),
        Collider {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        },
        AnimationController::default(),
        Transform::from_xyz(sx, -sy, 10.0),
    ));

    if !headless.0 {
        // Placeholder body; the sprite layer swaps in sheet frames when
        // a sheet is available.
        entity.insert(Sprite::from_color(
            Color::srgb(0.2, 0.4, 0.9),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        ));
    }
}
