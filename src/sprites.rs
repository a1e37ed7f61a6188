use bevy::prelude::*;

use crate::animation::{sheet_frame, PlayerClips};
use crate::components::{AnimationController, Player};

/// Display scale for the player sheet frames.
const PLAYER_SCALE: f32 = 0.35;

/// Resolved assets directory, needed to read sheet metadata off the
/// asset server's load path.
#[derive(Resource, Clone)]
pub struct AssetRoot(pub String);

/// Sheet metadata sitting next to the sheet image, e.g.
/// `assets/player.sheet.json`:
/// `{ "path": "player.png", "frame_width": 96, "frame_height": 96,
///    "columns": 14, "clips": { ... } }`
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct SheetMeta {
    pub path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    #[serde(default = "default_one")]
    pub rows: u32,
    #[serde(default)]
    pub clips: Option<PlayerClips>,
}

fn default_one() -> u32 {
    1
}

/// Loaded player sheet handles; `loaded` stays false when no sheet
/// metadata exists and the placeholder rectangle keeps rendering.
#[derive(Resource, Default)]
pub struct PlayerSheet {
    pub texture: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub frame_size: Vec2,
    pub loaded: bool,
}

pub struct SpritePlugin;

impl Plugin for SpritePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PlayerSheet::default())
            .add_systems(Startup, load_player_sheet)
            .add_systems(Update, apply_player_animation);
    }
}

fn load_player_sheet(
    root: Res<AssetRoot>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut sheet: ResMut<PlayerSheet>,
    mut clips: ResMut<PlayerClips>,
) {
    let meta_path = format!("{}/player.sheet.json", root.0);
    let meta: SheetMeta = match std::fs::read_to_string(&meta_path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("[Chamber sprites] Failed to parse {}: {}", meta_path, e);
                return;
            }
        },
        Err(_) => {
            println!("[Chamber sprites] No sheet metadata, using placeholder visuals");
            return;
        }
    };

    sheet.texture = asset_server.load(&meta.path);
    let layout = TextureAtlasLayout::from_grid(
        UVec2::new(meta.frame_width, meta.frame_height),
        meta.columns.max(1),
        meta.rows.max(1),
        None,
        None,
    );
    sheet.layout = layouts.add(layout);
    sheet.frame_size = Vec2::new(meta.frame_width as f32, meta.frame_height as f32);
    sheet.loaded = true;
    if let Some(sheet_clips) = meta.clips {
        *clips = sheet_clips;
    }
    println!("[Chamber sprites] Loaded player sheet from {}", meta_path);
}

/// Map controller state onto the player sprite: facing flip always,
/// atlas frame only once a real sheet is loaded.
fn apply_player_animation(
    sheet: Res<PlayerSheet>,
    clips: Res<PlayerClips>,
    mut query: Query<(&mut Sprite, &AnimationController), With<Player>>,
) {
    for (mut sprite, anim) in query.iter_mut() {
        sprite.flip_x = !anim.facing_right;
        if !sheet.loaded {
            continue;
        }
        let Some(index) = sheet_frame(anim, &clips) else {
            continue;
        };
        sprite.image = sheet.texture.clone();
        sprite.color = Color::WHITE;
        sprite.custom_size = Some(sheet.frame_size * PLAYER_SCALE);
        sprite.texture_atlas = Some(TextureAtlas {
            layout: sheet.layout.clone(),
            index,
        });
    }
}
