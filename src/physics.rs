use bevy::prelude::*;

use crate::components::*;
use crate::control;
use crate::room::Room;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                apply_gravity,
                control::player_control,
                apply_velocity,
                check_grounded,
            )
                .chain(),
        );
    }
}

/// Axis-aligned box in room space (y grows downward, so `min_y` is the
/// top edge and `max_y` the bottom edge).
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn from_center(x: f32, y: f32, width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self {
            min_x: x - hw,
            min_y: y - hh,
            max_x: x + hw,
            max_y: y + hh,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max_x > other.min_x
            && self.min_x < other.max_x
            && self.max_y > other.min_y
            && self.min_y < other.max_y
    }
}

/// Kinematic state of one body, shared between the ECS systems and the
/// headless simulation loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Accelerate an unsupported body downward, capped at terminal velocity.
pub fn integrate_gravity(vy: &mut f32, grounded: bool, gravity: f32, max_fall: f32, dt: f32) {
    if grounded {
        return;
    }
    *vy += gravity * dt;
    *vy = vy.min(max_fall);
}

/// Move a body for one tick with separate X/Y resolution against the
/// room's platforms and bounds, snapping to the blocking edge and
/// zeroing the blocked velocity component.
pub fn move_and_collide(body: &mut BodyState, width: f32, height: f32, room: &Room, dt: f32) {
    let hw = width / 2.0;
    let hh = height / 2.0;

    // X axis
    let dx = body.vx * dt;
    let new_x = body.x + dx;
    let x_box = Aabb::from_center(new_x, body.y, width, height);
    if let Some(solid) = room.solids().find(|s| x_box.overlaps(s)) {
        if dx > 0.0 {
            body.x = solid.min_x - hw - 0.01;
        } else if dx < 0.0 {
            body.x = solid.max_x + hw + 0.01;
        }
        body.vx = 0.0;
    } else {
        body.x = new_x;
    }
    let clamped_x = body.x.clamp(hw, room.width - hw);
    if clamped_x != body.x {
        body.x = clamped_x;
        body.vx = 0.0;
    }

    // Y axis
    let dy = body.vy * dt;
    let new_y = body.y + dy;
    let y_box = Aabb::from_center(body.x, new_y, width, height);
    if let Some(solid) = room.solids().find(|s| y_box.overlaps(s)) {
        if dy > 0.0 {
            // Falling: land on the platform top.
            body.y = solid.min_y - hh;
        } else if dy < 0.0 {
            // Rising: bonk the platform underside.
            body.y = solid.max_y + hh + 0.01;
        }
        body.vy = 0.0;
    } else {
        body.y = new_y;
    }
    let clamped_y = body.y.clamp(hh, room.height - hh);
    if clamped_y != body.y {
        body.y = clamped_y;
        body.vy = 0.0;
    }
}

/// Whether anything supports the body's feet: a platform top within a
/// pixel below them, or the room floor.
pub fn probe_grounded(x: f32, y: f32, width: f32, height: f32, room: &Room) -> bool {
    let bottom = y + height / 2.0;
    if bottom >= room.height - 0.5 {
        return true;
    }
    let left = x - width / 2.0 + 1.0;
    let right = x + width / 2.0 - 1.0;
    room.solids().any(|solid| {
        right > solid.min_x
            && left < solid.max_x
            && bottom >= solid.min_y - 0.5
            && bottom <= solid.min_y + 1.0
    })
}

fn apply_gravity(
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut Velocity, &Grounded), With<Player>>,
) {
    let dt = time.delta_secs();
    for (mut vel, grounded) in query.iter_mut() {
        integrate_gravity(
            &mut vel.y,
            grounded.0,
            config.gravity,
            config.max_fall_speed,
            dt,
        );
    }
}

fn apply_velocity(
    time: Res<Time<Fixed>>,
    room: Res<Room>,
    mut query: Query<(&mut GamePosition, &mut Velocity, &Collider), With<Player>>,
) {
    let dt = time.delta_secs();
    for (mut pos, mut vel, collider) in query.iter_mut() {
        let mut body = BodyState {
            x: pos.x,
            y: pos.y,
            vx: vel.x,
            vy: vel.y,
        };
        move_and_collide(&mut body, collider.width, collider.height, &room, dt);
        pos.x = body.x;
        pos.y = body.y;
        vel.x = body.vx;
        vel.y = body.vy;
    }
}

fn check_grounded(
    room: Res<Room>,
    mut query: Query<(&GamePosition, &Collider, &mut Grounded), With<Player>>,
) {
    for (pos, collider, mut grounded) in query.iter_mut() {
        grounded.0 = probe_grounded(pos.x, pos.y, collider.width, collider.height, &room);
    }
}
