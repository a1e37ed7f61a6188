use bevy::prelude::*;

use crate::components::GamePosition;
use crate::room::Room;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_camera, spawn_hud))
            .add_systems(Update, sync_game_position_to_transform);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Sync GamePosition → Transform for entities that have both.
/// Room space is y-down; render space is y-up, so Y negates.
fn sync_game_position_to_transform(
    mut query: Query<(&GamePosition, &mut Transform), Changed<GamePosition>>,
) {
    for (pos, mut transform) in query.iter_mut() {
        transform.translation.x = pos.x;
        transform.translation.y = -pos.y;
    }
}

fn spawn_camera(mut commands: Commands, room: Res<Room>) {
    commands.spawn((
        MainCamera,
        Camera2d,
        Transform::from_xyz(room.width / 2.0, -room.height / 2.0, 100.0),
    ));
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Arrows to move, up to jump"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn position_sync_negates_the_vertical_axis() {
        let mut world = World::new();
        let entity = world
            .spawn((
                GamePosition { x: 120.0, y: 520.0 },
                Transform::default(),
            ))
            .id();
        world
            .run_system_once(sync_game_position_to_transform)
            .expect("sync transforms");
        let transform = world.get::<Transform>(entity).expect("transform");
        assert_eq!(transform.translation.x, 120.0);
        assert_eq!(transform.translation.y, -520.0);
    }
}
