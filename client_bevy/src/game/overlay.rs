use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::constants::{color_from_hex, Colors, OVERLAY_STROKE_WIDTH, Z_OVERLAY};
use crate::coord::Canvas;

use super::core::Sandbox;
use super::UpdateSet;

pub struct OverlayPlugin;

/// Outline of one live obstacle, replaced every frame along with the bodies.
#[derive(Component)]
pub(crate) struct ObstacleOutline;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, redraw_obstacles_system.in_set(UpdateSet::Visuals));
    }
}

fn redraw_obstacles_system(
    mut commands: Commands,
    sandbox: Res<Sandbox>,
    canvas: Res<Canvas>,
    q_outlines: Query<Entity, With<ObstacleOutline>>,
) {
    for entity in &q_outlines {
        commands.entity(entity).despawn();
    }

    let sync = sandbox.sync();
    let scale = sync.config().scale;
    let color = color_from_hex(Colors::OBSTACLE);

    for obstacle in sync.obstacles() {
        let points = obstacle
            .corners_px(scale)
            .iter()
            .map(|corner| canvas.px_to_world2(*corner))
            .collect();

        commands.spawn((
            Transform::from_xyz(0.0, 0.0, Z_OVERLAY),
            ShapeBuilder::with(&shapes::Polygon {
                points,
                closed: true,
            })
            .stroke((color, OVERLAY_STROKE_WIDTH))
            .build(),
            ObstacleOutline,
        ));
    }
}
