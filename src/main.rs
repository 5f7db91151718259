use std::{env, path::Path};

use log::{info, trace};

use game::Game;
use input::InputIntent;
use render::RecordingSurface;
use settings::Settings;
use voxels::generators::flat::FlatGenerator;

mod camera;
mod collision;
mod game;
mod input;
mod player;
mod raycast;
mod render;
mod settings;
mod voxels;

const VIEWPORT_WIDTH: f32 = 1280.0;
const VIEWPORT_HEIGHT: f32 = 720.0;

/// Headless demo driver: generates a world, walks the player forward for a
/// fixed number of simulated frames and records the draw commands each frame
/// would issue. A windowed host would swap the recording surface for a real
/// canvas and feed real input.
fn main() {
    env_logger::init();

    let mut frames: u32 = 240;
    let mut flat_world = false;
    let mut settings_path: Option<String> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" | "-n" => {
                frames = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .expect("--frames expects a number");
            }
            "--flat" => flat_world = true,
            other => settings_path = Some(other.to_string()),
        }
    }

    let settings = match &settings_path {
        Some(path) => Settings::load(Path::new(path)).expect("Could not load settings"),
        None => Settings::default(),
    };

    let mut game = if flat_world {
        Game::with_generator(&settings, &mut FlatGenerator::new(8))
    } else {
        Game::new(&settings)
    };

    let mut surface = RecordingSurface::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let mut intent = InputIntent {
        forward: true,
        pointer_captured: true,
        ..Default::default()
    };

    let dt = 1.0 / 60.0;
    for frame in 0..frames {
        // Scripted session: hold forward, hop periodically, pan slowly.
        intent.jump = frame % 90 == 0;
        intent.look_delta = (1.5, 0.0);

        surface.clear();
        game.tick(&intent, dt, &mut surface);
        trace!(
            "frame {frame}: {} draw commands ({} faces)",
            surface.commands.len(),
            surface.polygon_count(),
        );

        // Exercise the edit path against whatever the crosshair targets.
        if frame == 150 {
            if let Some(target) = game.target() {
                trace!("breaking {}", target.hit);
            }
            game.break_block();
        }
        if frame == 180 {
            game.place_block();
        }
    }

    let player = game.player();
    info!(
        "Simulated {frames} frames; player ended at {:.2} (grounded: {}), {} solid cells",
        player.position,
        player.grounded,
        game.grid().solid_count(),
    );
}
