//! Utilities for driving orbits from Bevy's ECS.
//!
//! Centers and bodies are expected to be root entities, so their [`Transform`]s are in world space.

use crate::controller::Orbiter;
use bevy_ecs::entity::Entity;
use bevy_ecs::system::{ParamSet, Query, Res};
use bevy_log::{debug, warn};
use bevy_math::Vec3;
use bevy_time::Time;
use bevy_transform::components::Transform;

/// An ECS component for a body following an orbit.
#[derive(Debug, Clone, bevy_ecs_macros::Component)]
pub struct OrbitBody {
    /// Entity whose translation is the orbit center. Missing centers are treated as the world origin.
    ///
    /// [`tick_orbits`] reads every center before moving any body, so a center that is itself an [`OrbitBody`]
    /// contributes its position from the previous tick, and a moon trails its planet by one frame.
    pub center: Option<Entity>,
    pub orbiter: Orbiter,
    warned: bool,
}
impl OrbitBody {
    pub const fn new(center: Entity, orbiter: Orbiter) -> Self {
        Self {
            center: Some(center),
            orbiter,
            warned: false,
        }
    }
    /// A body orbiting the world origin.
    pub const fn around_origin(orbiter: Orbiter) -> Self {
        Self {
            center: None,
            orbiter,
            warned: true,
        }
    }
    /// Change the center, re-enabling the warning if it goes missing.
    pub fn set_center(&mut self, center: Entity) {
        self.center = Some(center);
        self.warned = false;
    }
}

/// Advance every [`OrbitBody`] and write its new pose into its [`Transform`].
pub fn tick_orbits(
    time: Res<Time>,
    mut set: ParamSet<(
        Query<&Transform>,
        Query<(Entity, &OrbitBody)>,
        Query<(Entity, &mut Transform, &mut OrbitBody)>,
    )>,
) {
    let dt = time.delta_secs();
    let targets = set
        .p1()
        .iter()
        .map(|(entity, body)| (entity, body.center))
        .collect::<Vec<_>>();
    let centers = {
        let transforms = set.p0();
        targets
            .into_iter()
            .map(|(entity, center)| {
                let pos = center
                    .and_then(|c| transforms.get(c).ok())
                    .map(|t| t.translation);
                (entity, pos)
            })
            .collect::<Vec<_>>()
    };
    let mut bodies = set.p2();
    for (entity, center) in centers {
        let Ok((entity, mut transform, mut body)) = bodies.get_mut(entity) else {
            continue;
        };
        let center = center.unwrap_or_else(|| {
            if !body.warned {
                warn!("Orbit center for {entity} is missing, orbiting the world origin");
                body.warned = true;
            }
            Vec3::ZERO
        });
        let out = body.orbiter.step(dt, center);
        transform.translation = center + out.offset;
        transform.rotation = out.facing.apply(transform.rotation);
    }
}

/// Snap every active body back to its starting position.
///
/// This is meant to run once after spawning, so bodies don't spend their first frame wherever they were spawned.
pub fn home_orbits(
    mut set: ParamSet<(
        Query<&Transform>,
        Query<(Entity, &mut Transform, &mut OrbitBody)>,
    )>,
) {
    let mut homed = Vec::new();
    for (entity, _, mut body) in set.p1().iter_mut() {
        if body.orbiter.is_active() {
            let offset = body.orbiter.move_to_start();
            homed.push((entity, body.center, offset));
        }
    }
    debug!("Homing {} orbit bodies", homed.len());
    for (entity, center, offset) in homed {
        let center = center
            .and_then(|c| set.p0().get(c).ok().map(|t| t.translation))
            .unwrap_or(Vec3::ZERO);
        if let Ok((_, mut transform, _)) = set.p1().get_mut(entity) {
            transform.translation = center + offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FacingMode, OrbitParameters};
    use bevy_ecs::schedule::Schedule;
    use bevy_ecs::world::World;
    use std::time::Duration;

    fn world() -> (World, Schedule) {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        let mut schedule = Schedule::default();
        schedule.add_systems(tick_orbits);
        (world, schedule)
    }

    fn run(world: &mut World, schedule: &mut Schedule, secs: f32) {
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        schedule.run(world);
    }

    #[test]
    fn body_follows_center() {
        let (mut world, mut schedule) = world();
        let params = OrbitParameters::new(10.0, 5.0)
            .unwrap()
            .with_speed(1.0, 1.0)
            .with_facing(FacingMode::FaceCenter);
        let orbiter = Orbiter::new(params).unwrap();
        let center_pos = Vec3::new(1.0, 2.0, 3.0);
        let center = world.spawn(Transform::from_translation(center_pos)).id();
        let body = world
            .spawn((Transform::default(), OrbitBody::new(center, orbiter)))
            .id();

        run(&mut world, &mut schedule, 0.5);

        let orbit = world.get::<OrbitBody>(body).unwrap();
        let expected = center_pos + orbit.orbiter.offset();
        let transform = world.get::<Transform>(body).unwrap();
        assert!(transform.translation.abs_diff_eq(expected, 1e-4));
        let forward = transform.rotation * Vec3::Z;
        assert!(forward.abs_diff_eq((center_pos - expected).normalize(), 1e-4));
        assert!((orbit.orbiter.state().current_angle - 0.5).abs() < 1e-5);
    }

    #[test]
    fn moons_use_last_tick_center() {
        let (mut world, mut schedule) = world();
        let circle = |r| {
            let params = OrbitParameters::new(r, r).unwrap().with_speed(1.0, 1.0);
            Orbiter::new(params).unwrap()
        };
        let sun = world.spawn(Transform::default()).id();
        let planet = world
            .spawn((
                Transform::from_xyz(10.0, 0.0, 0.0),
                OrbitBody::new(sun, circle(10.0)),
            ))
            .id();
        let moon = world
            .spawn((Transform::default(), OrbitBody::new(planet, circle(1.0))))
            .id();

        run(&mut world, &mut schedule, 0.5);

        let planet_now = world.get::<Transform>(planet).unwrap().translation;
        assert!(!planet_now.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-3));
        let moon_offset = world.get::<OrbitBody>(moon).unwrap().orbiter.offset();
        let moon_now = world.get::<Transform>(moon).unwrap().translation;
        assert!(moon_now.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0) + moon_offset, 1e-4));
    }

    #[test]
    fn missing_center_uses_origin() {
        let (mut world, mut schedule) = world();
        let orbiter = Orbiter::new(OrbitParameters::new(3.0, 2.0).unwrap()).unwrap();
        let gone = world.spawn_empty().id();
        world.despawn(gone);
        let body = world
            .spawn((Transform::default(), OrbitBody::new(gone, orbiter)))
            .id();

        run(&mut world, &mut schedule, 0.0);

        let transform = world.get::<Transform>(body).unwrap();
        assert!(transform.translation.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn homing_places_bodies_at_start() {
        let mut world = World::new();
        let params = OrbitParameters::new(4.0, 2.0)
            .unwrap()
            .with_starting_angle(90.0);
        let mut orbiter = Orbiter::new(params).unwrap();
        orbiter.set_current_angle(0.0).unwrap();
        let center = world.spawn(Transform::from_xyz(0.0, 1.0, 0.0)).id();
        let body = world
            .spawn((Transform::default(), OrbitBody::new(center, orbiter)))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(home_orbits);
        schedule.run(&mut world);

        let transform = world.get::<Transform>(body).unwrap();
        assert!(transform.translation.abs_diff_eq(Vec3::new(0.0, 1.0, 2.0), 1e-4));
    }

    #[test]
    fn inactive_body_stays_put() {
        let (mut world, mut schedule) = world();
        let params = OrbitParameters::new(3.0, 2.0)
            .unwrap()
            .with_self_rotation(Vec3::Y, 45.0);
        let mut orbiter = Orbiter::new(params).unwrap();
        orbiter.set_current_angle(90.0).unwrap();
        orbiter.deactivate();
        let body = world
            .spawn((Transform::default(), OrbitBody::around_origin(orbiter)))
            .id();

        for _ in 0..5 {
            run(&mut world, &mut schedule, 0.25);
        }

        let transform = world.get::<Transform>(body).unwrap();
        assert!(transform.translation.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-4));
        assert_eq!(transform.rotation, bevy_math::Quat::IDENTITY);
    }
}
