use bevy::prelude::*;

use crate::components::{AnimationController, GamePosition, Grounded, Player, Velocity};
use crate::control_core::Pose;

/// One tick's observable player state, for external inspection (tests,
/// harnesses). `ready` flips once the first refresh has run.
#[derive(Clone, Copy, Debug, Default, serde::Serialize)]
pub struct PlayerSnapshot {
    pub ready: bool,
    pub frame: u64,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub pose: Pose,
}

type Observer = Box<dyn Fn(&PlayerSnapshot) + Send + Sync>;

/// Snapshot plus registered observers. The hook is explicit: callers
/// that want per-tick state register a callback here instead of the
/// decision logic leaking state anywhere global.
#[derive(Resource, Default)]
pub struct GameplayTelemetry {
    pub snapshot: PlayerSnapshot,
    observers: Vec<Observer>,
}

impl GameplayTelemetry {
    /// Register a callback invoked after every tick's refresh.
    #[allow(dead_code)]
    pub fn register(&mut self, observer: impl Fn(&PlayerSnapshot) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }
}

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GameplayTelemetry::default())
            .add_systems(FixedUpdate, update_telemetry);
    }
}

fn update_telemetry(
    mut telemetry: ResMut<GameplayTelemetry>,
    query: Query<(&GamePosition, &Velocity, &Grounded, &AnimationController), With<Player>>,
) {
    let Ok((pos, vel, grounded, anim)) = query.get_single() else {
        return;
    };
    let telemetry = telemetry.as_mut();
    telemetry.snapshot = PlayerSnapshot {
        ready: true,
        frame: telemetry.snapshot.frame + 1,
        x: pos.x,
        y: pos.y,
        vx: vel.x,
        vy: vel.y,
        grounded: grounded.0,
        pose: anim.pose,
    };
    for observer in &telemetry.observers {
        observer(&telemetry.snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn refresh_updates_snapshot_and_notifies_observers() {
        let mut world = World::new();
        let mut telemetry = GameplayTelemetry::default();
        let seen = Arc::new(AtomicU64::new(0));
        let seen_clone = Arc::clone(&seen);
        telemetry.register(move |snapshot| {
            assert!(snapshot.ready);
            seen_clone.store(snapshot.frame, Ordering::SeqCst);
        });
        world.insert_resource(telemetry);
        world.spawn((
            Player,
            GamePosition { x: 120.0, y: 520.0 },
            Velocity::default(),
            Grounded(true),
            AnimationController::default(),
        ));

        world
            .run_system_once(update_telemetry)
            .expect("update telemetry");
        world
            .run_system_once(update_telemetry)
            .expect("update telemetry");

        let telemetry = world.resource::<GameplayTelemetry>();
        assert!(telemetry.snapshot.ready);
        assert_eq!(telemetry.snapshot.frame, 2);
        assert_eq!(telemetry.snapshot.x, 120.0);
        assert!(telemetry.snapshot.grounded);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn no_player_means_no_refresh() {
        let mut world = World::new();
        world.insert_resource(GameplayTelemetry::default());
        world
            .run_system_once(update_telemetry)
            .expect("update telemetry");
        let telemetry = world.resource::<GameplayTelemetry>();
        assert!(!telemetry.snapshot.ready);
        assert_eq!(telemetry.snapshot.frame, 0);
    }
}
