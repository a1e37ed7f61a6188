use bevy::prelude::*;

use crate::components::HeadlessMode;
use crate::physics::Aabb;

pub struct RoomPlugin;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Room::single_room())
            .add_systems(Startup, spawn_room_visuals);
    }
}

/// A static platform, centered at (x, y) in room space
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlatformDef {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.width, self.height)
    }
}

/// The playable room: fixed bounds plus static platform geometry.
/// Authoritative for collision; visuals are spawned from it separately.
#[derive(Resource, Clone, serde::Serialize, serde::Deserialize)]
pub struct Room {
    pub width: f32,
    pub height: f32,
    pub player_spawn: (f32, f32),
    pub platforms: Vec<PlatformDef>,
}

impl Room {
    /// The one shipped layout: a ground slab across the bottom and two
    /// floating ledges to hop between.
    pub fn single_room() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            player_spawn: (120.0, 520.0),
            platforms: vec![
                PlatformDef {
                    x: 400.0,
                    y: 584.0,
                    width: 896.0,
                    height: 32.0,
                },
                PlatformDef {
                    x: 220.0,
                    y: 430.0,
                    width: 128.0,
                    height: 32.0,
                },
                PlatformDef {
                    x: 560.0,
                    y: 320.0,
                    width: 128.0,
                    height: 32.0,
                },
            ],
        }
    }

    pub fn solids(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.platforms.iter().map(PlatformDef::aabb)
    }
}

/// Marker for platform visual entities
#[derive(Component)]
pub struct PlatformEntity;

fn spawn_room_visuals(mut commands: Commands, room: Res<Room>, headless: Res<HeadlessMode>) {
    if headless.0 {
        return;
    }
    for platform in &room.platforms {
        commands.spawn((
            PlatformEntity,
            Sprite::from_color(
                Color::srgb_u8(0x6f, 0x8f, 0xa5),
                Vec2::new(platform.width, platform.height),
            ),
            Transform::from_xyz(platform.x, -platform.y, 1.0),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_room_ground_spans_the_full_width() {
        let room = Room::single_room();
        let ground = room
            .platforms
            .iter()
            .map(PlatformDef::aabb)
            .max_by(|a, b| a.min_y.total_cmp(&b.min_y))
            .expect("room has platforms");
        assert!(ground.min_x <= 0.0);
        assert!(ground.max_x >= room.width);
    }

    #[test]
    fn player_spawn_is_inside_bounds_and_above_ground() {
        let room = Room::single_room();
        let (sx, sy) = room.player_spawn;
        assert!(sx > 0.0 && sx < room.width);
        assert!(sy > 0.0 && sy < room.height);
        // Spawn sits above the ground slab's top edge (y grows downward).
        let ground_top = room.solids().map(|s| s.min_y).fold(0.0, f32::max);
        assert!(sy < ground_top);
    }

    #[test]
    fn floating_platforms_sit_inside_the_room() {
        let room = Room::single_room();
        for platform in room.platforms.iter().skip(1) {
            let aabb = platform.aabb();
            assert!(aabb.min_x >= 0.0 && aabb.max_x <= room.width);
            assert!(aabb.min_y >= 0.0 && aabb.max_y <= room.height);
        }
    }
}
