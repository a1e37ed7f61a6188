use bevy::prelude::*;

use crate::components::{AnimationController, GameConfig, Grounded, Player, Velocity};
use crate::control_core::{self, Pose};
use crate::input::PlayerControls;

/// One looping clip: sheet frame indices plus playback rate.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    pub frames: Vec<usize>,
    pub fps: f32,
}

/// Frame data for the player sheet. Defaults cover the built-in layout;
/// sheet metadata on disk replaces them when present.
#[derive(Resource, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlayerClips {
    pub idle: Clip,
    pub run: Clip,
    /// Ordered airborne stills: rising fast, rising, apex, falling fast.
    pub airborne: Vec<usize>,
}

impl Default for PlayerClips {
    fn default() -> Self {
        Self {
            idle: Clip {
                frames: vec![0, 1, 2, 3],
                fps: 3.0,
            },
            run: Clip {
                frames: vec![4, 5, 6, 7, 8, 9],
                fps: 10.0,
            },
            airborne: vec![10, 11, 12, 13],
        }
    }
}

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PlayerClips::default()).add_systems(
            FixedUpdate,
            (drive_player_pose, advance_clip_frames).chain(),
        );
    }
}

/// Re-derive the pose from support state, hold state and vertical
/// velocity every tick. Selecting the already-active pose is a no-op so
/// a looping clip never restarts mid-cycle.
fn drive_player_pose(
    config: Res<GameConfig>,
    controls: Res<PlayerControls>,
    mut query: Query<(&Velocity, &Grounded, &mut AnimationController), With<Player>>,
) {
    for (vel, grounded, mut anim) in query.iter_mut() {
        let next = control_core::select_pose(grounded.0, controls.moving(), vel.y, &config.air_bands);
        if anim.pose != next {
            anim.pose = next;
            anim.frame = 0;
            anim.timer = 0.0;
            // Airborne poses are stills; playback stops until landing.
            anim.playing = matches!(next, Pose::Idle | Pose::Run);
        }
    }
}

/// Advance looping clips at their own rate, wrapping at the end.
fn advance_clip_frames(
    time: Res<Time<Fixed>>,
    clips: Res<PlayerClips>,
    mut query: Query<&mut AnimationController>,
) {
    let dt = time.delta_secs();
    for mut anim in query.iter_mut() {
        if !anim.playing {
            continue;
        }
        let clip = match anim.pose {
            Pose::Idle => &clips.idle,
            Pose::Run => &clips.run,
            Pose::Airborne(_) => continue,
        };
        let frame_count = clip.frames.len().max(1);
        let frame_time = 1.0 / clip.fps.max(0.001);
        anim.timer += dt;
        while anim.timer >= frame_time {
            anim.timer -= frame_time;
            anim.frame = (anim.frame + 1) % frame_count;
        }
    }
}

/// Resolve the sheet frame the controller currently shows. `None` when
/// the clip data has no usable entry (caller keeps its current frame).
pub fn sheet_frame(anim: &AnimationController, clips: &PlayerClips) -> Option<usize> {
    match anim.pose {
        Pose::Idle => clips.idle.frames.get(anim.frame % clips.idle.frames.len().max(1)).copied(),
        Pose::Run => clips.run.frames.get(anim.frame % clips.run.frames.len().max(1)).copied(),
        Pose::Airborne(band) => control_core::airborne_frame(&clips.airborne, band),
    }
}
