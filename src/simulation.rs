use serde::{Deserialize, Serialize};

use crate::components::GameConfig;
use crate::control_core::{self, Pose};
use crate::physics::{integrate_gravity, move_and_collide, probe_grounded, BodyState};
use crate::player::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::room::Room;

#[derive(Deserialize, Clone)]
pub struct SimulationRequest {
    pub inputs: Vec<SimInput>,
    pub max_frames: u32,
    #[serde(default = "default_record_interval")]
    pub record_interval: u32,
}

fn default_record_interval() -> u32 {
    1
}

/// Hold `action` ("left", "right", "jump"/"up") starting at `frame` for
/// `duration` frames (0 = a single frame).
#[derive(Deserialize, Clone)]
pub struct SimInput {
    pub frame: u32,
    pub action: String,
    #[serde(default)]
    pub duration: u32,
}

#[derive(Serialize, Clone)]
pub struct SimulationResult {
    pub frames_elapsed: u32,
    pub trace: Vec<TraceFrame>,
    pub events: Vec<SimEvent>,
}

#[derive(Serialize, Clone)]
pub struct TraceFrame {
    pub frame: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub pose: Pose,
}

#[derive(Serialize, Clone)]
pub struct SimEvent {
    pub frame: u32,
    #[serde(rename = "type")]
    pub event_type: String,
    pub x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

struct TickInput {
    left: bool,
    right: bool,
    jump_just_pressed: bool,
}

/// Deterministic scripted run of the real per-tick step, without an App
/// or window: same gravity, same decision core, same collision, at a
/// fixed 60 Hz. Jump edges derive from held-state transitions exactly
/// as the live input layer does.
pub fn run_simulation(
    room: &Room,
    config: &GameConfig,
    request: &SimulationRequest,
) -> SimulationResult {
    let dt = 1.0 / 60.0f32;

    let spawn = room.player_spawn;
    let mut body = BodyState {
        x: spawn.0,
        y: spawn.1,
        vx: 0.0,
        vy: 0.0,
    };
    let mut grounded = false;

    let mut trace = Vec::new();
    let mut events = Vec::new();

    // Pre-process inputs into per-frame active actions
    let mut active_inputs: Vec<Vec<&str>> = vec![Vec::new(); request.max_frames as usize];
    for input in &request.inputs {
        let duration = input.duration.max(1);
        for f in input.frame..(input.frame + duration).min(request.max_frames) {
            active_inputs[f as usize].push(input.action.as_str());
        }
    }

    let mut prev_jump = false;
    let mut jump_start_y = spawn.1;
    let mut peak_y = spawn.1;

    for frame in 0..request.max_frames {
        let actions = &active_inputs[frame as usize];
        let jump_now = actions.iter().any(|a| *a == "jump" || *a == "up");
        let input = TickInput {
            left: actions.contains(&"left"),
            right: actions.contains(&"right"),
            jump_just_pressed: jump_now && !prev_jump,
        };
        prev_jump = jump_now;

        let was_grounded = grounded;
        let was_rising = body.vy < 0.0;

        integrate_gravity(
            &mut body.vy,
            grounded,
            config.gravity,
            config.max_fall_speed,
            dt,
        );

        body.vx = control_core::horizontal_velocity(input.left, input.right, config.move_speed);

        if control_core::should_jump(input.jump_just_pressed, grounded) {
            body.vy = config.jump_velocity;
            jump_start_y = body.y;
            peak_y = body.y;
            events.push(SimEvent {
                frame,
                event_type: "jump_start".to_string(),
                x: body.x,
                y: body.y,
                height: None,
            });
        }

        move_and_collide(&mut body, PLAYER_WIDTH, PLAYER_HEIGHT, room, dt);
        grounded = probe_grounded(body.x, body.y, PLAYER_WIDTH, PLAYER_HEIGHT, room);
        let pose = control_core::select_pose(
            grounded,
            input.left || input.right,
            body.vy,
            &config.air_bands,
        );

        // Highest point so far in this flight (y shrinks upward)
        if body.y < peak_y {
            peak_y = body.y;
        }

        if was_rising && body.vy >= 0.0 {
            events.push(SimEvent {
                frame,
                event_type: "jump_apex".to_string(),
                x: body.x,
                y: body.y,
                height: Some(jump_start_y - peak_y),
            });
        }

        if grounded && !was_grounded {
            events.push(SimEvent {
                frame,
                event_type: "land".to_string(),
                x: body.x,
                y: body.y,
                height: None,
            });
        }

        if request.record_interval > 0 && frame % request.record_interval == 0 {
            trace.push(TraceFrame {
                frame,
                x: body.x,
                y: body.y,
                vx: body.vx,
                vy: body.vy,
                grounded,
                pose,
            });
        }
    }

    SimulationResult {
        frames_elapsed: trace.last().map(|t| t.frame).unwrap_or(0),
        trace,
        events,
    }
}
