use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use whiteboard_sandbox::{
    FrameSource, MonotonicClock, RapierWorld, SandboxError, SyncLoop,
};
use whiteboard_shared::SandboxConfig;

use crate::constants::{color_from_hex, Colors};
use crate::coord::Canvas;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Simulate,
    Visuals,
}

pub struct CorePlugin;

#[derive(Component)]
struct MainCamera;

/// The sync loop plus the frame source feeding it. One tick per rendered
/// frame.
#[derive(Resource)]
pub struct Sandbox {
    sync: SyncLoop<RapierWorld, MonotonicClock>,
    source: Box<dyn FrameSource + Send + Sync>,
}

impl Sandbox {
    pub fn start(
        config: SandboxConfig,
        source: Box<dyn FrameSource + Send + Sync>,
    ) -> Result<Self, SandboxError> {
        let (width, height) = source.frame_size();
        let world = RapierWorld::new(config.gravity);
        let sync = SyncLoop::new(world, MonotonicClock::default(), width, height, config)?;
        Ok(Self { sync, source })
    }

    pub(crate) fn sync(&self) -> &SyncLoop<RapierWorld, MonotonicClock> {
        &self.sync
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(color_from_hex(Colors::BACKGROUND)))
            .configure_sets(
                Update,
                (UpdateSet::Input, UpdateSet::Simulate, UpdateSet::Visuals).chain(),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Update, sync_system.in_set(UpdateSet::Simulate))
            .add_systems(Update, fit_camera_to_canvas)
            .add_systems(Last, shutdown_system);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Msaa::Sample4, MainCamera));
}

fn sync_system(mut sandbox: ResMut<Sandbox>, mut exit: MessageWriter<AppExit>) {
    let sandbox = &mut *sandbox;

    let Some(frame) = sandbox.source.next_frame() else {
        info!(ticks = sandbox.sync.ticks(), "frame source ended");
        exit.write(AppExit::Success);
        return;
    };

    match sandbox.sync.tick(&frame) {
        Ok(report) => trace!(
            tick = report.tick,
            accepted = report.accepted,
            delta = report.delta_secs,
            "frame synced"
        ),
        Err(e) => {
            error!(error = %e, tick = sandbox.sync.ticks(), "sync loop failed");
            exit.write(AppExit::error());
        }
    }
}

fn shutdown_system(mut exits: MessageReader<AppExit>, mut sandbox: ResMut<Sandbox>) {
    if exits.read().next().is_none() {
        return;
    }
    let cleared = sandbox.sync.clear_obstacles();
    info!(
        ticks = sandbox.sync.ticks(),
        resets = sandbox.sync.actor().resets(),
        cleared,
        "Sync loop ended"
    );
}

fn fit_camera_to_canvas(
    canvas: Res<Canvas>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let scale_x = canvas.width / window.width();
    let scale_y = canvas.height / window.height();
    let target_scale = scale_x.max(scale_y).max(0.0001);

    for mut projection in &mut q_projection {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scale = target_scale;
        }
    }
}
