//! Headless orbit runner.
//!
//! Steps a small world at a fixed rate and prints where each body ends up, which is handy for sanity-checking
//! parameters without a renderer.

use bevy_ecs::schedule::Schedule;
use bevy_ecs::world::World;
use bevy_math::Vec3;
use bevy_time::Time;
use bevy_transform::components::Transform;
use orbiter_orbit::ecs::{OrbitBody, home_orbits, tick_orbits};
use orbiter_orbit::{FacingMode, OrbitConfigError, OrbitParameters, Orbiter};
use orbiter_path::{OrbitPath, PathStyle};
use std::time::Duration;

const STEPS_PER_SEC: u32 = 60;
const SECONDS: u32 = 20;

fn main() -> Result<(), OrbitConfigError> {
    let mut world = World::new();
    world.insert_resource(Time::<()>::default());

    let sun = world.spawn(Transform::from_xyz(0.0, 0.0, 0.0)).id();
    let bodies = [
        OrbitParameters::new(1000.0, 800.0)?
            .with_speed(0.5, 1.0)
            .with_facing(FacingMode::FaceMotion),
        OrbitParameters::new(400.0, 400.0)?
            .with_speed(1.0, 0.5)
            .with_inclination(45.0)
            .with_facing(FacingMode::FaceCenter),
        OrbitParameters::new(1500.0, 300.0)?
            .with_speed(0.2, 1.0)
            .with_rotation_angle(90.0)
            .with_starting_angle(180.0)
            .with_self_rotation(Vec3::new(1.0, 1.0, 0.0), 30.0),
    ]
    .into_iter()
    .map(|params| {
        let orbiter = Orbiter::new(params)?;
        if let Some(period) = orbiter.period() {
            println!("orbit period is {period:.2}s");
        }
        Ok(world
            .spawn((Transform::default(), OrbitBody::new(sun, orbiter)))
            .id())
    })
    .collect::<Result<Vec<_>, OrbitConfigError>>()?;

    let mut startup = Schedule::default();
    startup.add_systems(home_orbits);
    startup.run(&mut world);

    let mut update = Schedule::default();
    update.add_systems(tick_orbits);

    let dt = Duration::from_secs(1) / STEPS_PER_SEC;
    for step in 0..STEPS_PER_SEC * SECONDS {
        world.resource_mut::<Time>().advance_by(dt);
        update.run(&mut world);
        if step % STEPS_PER_SEC != 0 {
            continue;
        }
        for &entity in &bodies {
            let (Some(transform), Some(body)) =
                (world.get::<Transform>(entity), world.get::<OrbitBody>(entity))
            else {
                continue;
            };
            println!(
                "t={:>3}s {entity}: angle {:>8.2}, position {:.1}, forward {:.2}",
                step / STEPS_PER_SEC,
                body.orbiter.current_angle(),
                transform.translation,
                transform.rotation * Vec3::Z,
            );
        }
    }

    for &entity in &bodies {
        let Some(body) = world.get::<OrbitBody>(entity) else {
            continue;
        };
        let path = OrbitPath::trace(
            body.orbiter.params(),
            body.orbiter.state(),
            Vec3::ZERO,
            &PathStyle::default(),
        );
        if let Some(path) = path {
            let extent = path
                .points
                .iter()
                .fold(Vec3::ZERO, |acc, p| acc.max(p.abs()));
            println!("{entity}: path spans {extent:.1}, starts at {:.1}", path.markers.start);
        }
    }
    Ok(())
}
