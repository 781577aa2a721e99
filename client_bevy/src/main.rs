mod constants;
mod coord;
mod game;

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, WindowPosition, WindowResolution};
use bevy_prototype_lyon::prelude::ShapePlugin;
use whiteboard_sandbox::config::RuntimeConfig;

use coord::Canvas;
use game::{BallPlugin, CorePlugin, InputPlugin, OverlayPlugin, Sandbox};

fn main() {
    let config = match RuntimeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid sandbox configuration: {}", e);
            std::process::exit(1);
        }
    };

    let source = match config.source.open() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to open frame source: {}", e);
            std::process::exit(1);
        }
    };
    let (width, height) = source.frame_size();
    let display = config.sandbox.projector_display_index;

    let sandbox = match Sandbox::start(config.sandbox, source) {
        Ok(sandbox) => sandbox,
        Err(e) => {
            eprintln!("Failed to start sync loop: {}", e);
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "physics".to_string(),
                resolution: WindowResolution::new(width, height),
                position: WindowPosition::Centered(MonitorSelection::Index(display)),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ShapePlugin)
        .insert_resource(Canvas::new(width, height))
        .insert_resource(sandbox)
        .add_plugins(CorePlugin)
        .add_plugins(BallPlugin)
        .add_plugins(OverlayPlugin)
        .add_plugins(InputPlugin)
        .run();
}
