use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use super::UpdateSet;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, input_system.in_set(UpdateSet::Input));
    }
}

fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut q_window: Query<&mut Window, With<PrimaryWindow>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("escape pressed; quitting");
        exit.write(AppExit::Success);
    }

    if keys.just_pressed(KeyCode::Enter) {
        let Ok(mut window) = q_window.single_mut() else {
            return;
        };
        window.mode = toggled_mode(window.mode);
        debug!(mode = ?window.mode, "window mode toggled");
    }
}

fn toggled_mode(mode: WindowMode) -> WindowMode {
    match mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    }
}
