use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::constants::{color_from_hex, Colors, Z_BALL};
use crate::coord::Canvas;

use super::core::Sandbox;
use super::UpdateSet;

pub struct BallPlugin;

#[derive(Component)]
pub(crate) struct BallVisual;

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ball_visual)
            .add_systems(Update, follow_actor_system.in_set(UpdateSet::Visuals));
    }
}

fn spawn_ball_visual(mut commands: Commands, sandbox: Res<Sandbox>, canvas: Res<Canvas>) {
    let sync = sandbox.sync();
    let radius_px = sync.actor().radius() * sync.config().scale;
    let spawn = sync.actor().spawn_position() * sync.config().scale;

    commands.spawn((
        Transform::from_translation(canvas.px_to_world(spawn.x, spawn.y, Z_BALL)),
        ShapeBuilder::with(&shapes::Circle {
            radius: radius_px,
            center: Vec2::ZERO,
        })
        .fill(color_from_hex(Colors::BALL))
        .build(),
        BallVisual,
    ));
}

fn follow_actor_system(
    sandbox: Res<Sandbox>,
    canvas: Res<Canvas>,
    mut q_ball: Query<&mut Transform, With<BallVisual>>,
) {
    let rect = match sandbox.sync().actor_rect() {
        Ok(rect) => rect,
        Err(e) => {
            warn!(error = %e, "actor body missing; ball not drawn");
            return;
        }
    };

    for mut transform in &mut q_ball {
        transform.translation = canvas.rect_center(rect, Z_BALL);
    }
}
