//! Debug drawing of orbit paths with Bevy's gizmos.

use crate::{OrbitPath, PathMarkers, PathStyle};
use bevy_ecs::system::Query;
use bevy_gizmos::gizmos::Gizmos;
use bevy_math::{Isometry3d, Vec3};
use bevy_transform::components::Transform;
use orbiter_orbit::ecs::OrbitBody;

/// An ECS component to draw the path of an [`OrbitBody`].
#[derive(Debug, Default, Clone, Copy, PartialEq, bevy_ecs_macros::Component)]
pub struct OrbitPathStyle(pub PathStyle);

/// Draw the path and markers of every [`OrbitBody`] with an [`OrbitPathStyle`].
pub fn draw_orbit_paths(
    mut gizmos: Gizmos,
    bodies: Query<(&OrbitBody, &OrbitPathStyle)>,
    transforms: Query<&Transform>,
) {
    for (body, style) in &bodies {
        let center = body
            .center
            .and_then(|c| transforms.get(c).ok())
            .map_or(Vec3::ZERO, |t| t.translation);
        let params = body.orbiter.params();
        let Some(path) = OrbitPath::trace(params, body.orbiter.state(), center, &style.0) else {
            continue;
        };
        gizmos.linestrip(path.points.iter().copied(), path.color);
        let radius = PathMarkers::radius(params);
        gizmos.sphere(
            Isometry3d::from_translation(path.markers.center),
            radius,
            path.color,
        );
        gizmos.sphere(
            Isometry3d::from_translation(path.markers.current),
            radius,
            path.color,
        );
        gizmos.line(path.markers.center, path.markers.start, path.color);
        gizmos.sphere(
            Isometry3d::from_translation(path.markers.start),
            radius * 0.5,
            path.color,
        );
    }
}
