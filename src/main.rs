mod animation;
mod components;
mod control;
mod control_core;
mod input;
mod physics;
mod player;
mod render;
mod room;
mod simulation;
mod sprites;
mod telemetry;

use bevy::prelude::*;
use components::{GameConfig, HeadlessMode};

#[derive(serde::Deserialize, Default)]
struct StartupConfig {
    window_title: Option<String>,
    window_width: Option<f32>,
    window_height: Option<f32>,
    background_color: Option<[f32; 3]>,
    texture_filter: Option<String>,
    assets_dir: Option<String>,
}

fn load_startup_config() -> StartupConfig {
    let path = std::env::var("CHAMBER_GAME_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "game.json".to_string());
    match std::fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<StartupConfig>(&contents) {
            Ok(cfg) => {
                println!("[Chamber] Loaded startup config from {}", path);
                cfg
            }
            Err(e) => {
                eprintln!("[Chamber] Failed to parse {}: {}", path, e);
                StartupConfig::default()
            }
        },
        Err(_) => StartupConfig::default(),
    }
}

/// `--simulate <request.json>`: run a scripted headless session and
/// print the trace as JSON instead of opening a window.
fn run_scripted_simulation(path: &str) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("[Chamber] Failed to read {}: {}", path, e);
            std::process::exit(2);
        }
    };
    let request: simulation::SimulationRequest = match serde_json::from_str(&contents) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("[Chamber] Failed to parse {}: {}", path, e);
            std::process::exit(2);
        }
    };
    let result = simulation::run_simulation(
        &room::Room::single_room(),
        &GameConfig::default(),
        &request,
    );
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[Chamber] Failed to encode result: {}", e);
            std::process::exit(2);
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if let Some(i) = args.iter().position(|a| a == "--simulate") {
        match args.get(i + 1) {
            Some(path) => run_scripted_simulation(path),
            None => {
                eprintln!("[Chamber] --simulate requires a request file path");
                std::process::exit(2);
            }
        }
        return;
    }
    let headless = args.iter().any(|a| a == "--headless");

    let startup_config = load_startup_config();
    let mut app = App::new();

    app.insert_resource(HeadlessMode(headless));

    if headless {
        // Headless mode: no window, no rendering, just the ECS loop
        app.add_plugins(MinimalPlugins);
        println!("[Chamber] Starting in HEADLESS mode");
    } else {
        // Windowed mode: full rendering
        // Env vars override game.json values
        let assets_dir = std::env::var("CHAMBER_ASSETS_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .or(startup_config.assets_dir)
            .unwrap_or_else(|| "assets".to_string());
        let nearest_filter = std::env::var("CHAMBER_TEXTURE_FILTER")
            .ok()
            .filter(|s| !s.is_empty())
            .or(startup_config.texture_filter)
            .map_or(true, |v| v.eq_ignore_ascii_case("nearest"));

        let window_title = startup_config
            .window_title
            .unwrap_or_else(|| "Chamber".to_string());
        let window_width = startup_config.window_width.unwrap_or(800.0);
        let window_height = startup_config.window_height.unwrap_or(600.0);

        let mut plugins = DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: window_title,
                    resolution: (window_width, window_height).into(),
                    present_mode: bevy::window::PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(bevy::asset::AssetPlugin {
                file_path: assets_dir.clone(),
                ..default()
            });

        if nearest_filter {
            plugins = plugins.set(ImagePlugin::default_nearest());
            println!("[Chamber] Texture filter: nearest (pixel-art mode)");
        }

        app.add_plugins(plugins);
        let bg = startup_config
            .background_color
            .unwrap_or([0.094, 0.145, 0.208]);
        app.insert_resource(ClearColor(Color::srgb(bg[0], bg[1], bg[2])));
        app.insert_resource(sprites::AssetRoot(assets_dir));
        app.add_plugins(sprites::SpritePlugin);
        app.add_plugins(render::RenderPlugin);
        println!("[Chamber] Starting in WINDOWED mode");
    }

    app.insert_resource(GameConfig::default())
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .add_plugins(input::InputPlugin)
        .add_plugins(room::RoomPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(physics::PhysicsPlugin)
        .add_plugins(animation::AnimationPlugin)
        .add_plugins(telemetry::TelemetryPlugin);

    app.run();
}
