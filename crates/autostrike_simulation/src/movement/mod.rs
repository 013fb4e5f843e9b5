//! Movement module: headless исполнение movement/rotation контрактов
//!
//! HeroController только командует (`Locomotion`, `Facing`), Transform двигают
//! системы ниже в `HeroCoreSet::Actuation`. Engine bridge может не добавлять
//! этот plugin и исполнять команды сам (CharacterBody, NavigationAgent).

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::components::{yaw_rotation, Facing, FacingGoal, Locomotion};
use crate::HeroCoreSet;

/// Movement Plugin
///
/// Порядок: apply_locomotion → apply_facing
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (apply_locomotion, apply_facing)
                .chain()
                .in_set(HeroCoreSet::Actuation),
        );
    }
}

/// System: интегрируем Transform по скорости Locomotion (SimClock delta)
pub fn apply_locomotion(clock: Res<SimClock>, mut movers: Query<(&Locomotion, &mut Transform)>) {
    let delta = clock.delta();
    if delta <= 0.0 {
        return;
    }

    for (locomotion, mut transform) in movers.iter_mut() {
        let velocity = locomotion.velocity();
        if velocity != Vec3::ZERO {
            transform.translation += velocity * delta;
        }
    }
}

/// System: мгновенный yaw к направлению или цели
///
/// Цель исчезла → поворот не меняется.
pub fn apply_facing(facings: Query<(Entity, &Facing)>, mut transforms: Query<&mut Transform>) {
    let mut rotations = Vec::new();

    for (entity, facing) in facings.iter() {
        let Ok(own) = transforms.get(entity) else {
            continue;
        };

        let direction = match facing.goal() {
            FacingGoal::Keep => continue,
            FacingGoal::Direction(direction) => direction,
            FacingGoal::Target(target) => match transforms.get(target) {
                Ok(target_transform) => target_transform.translation - own.translation,
                Err(_) => continue,
            },
        };

        if let Some(rotation) = yaw_rotation(direction) {
            rotations.push((entity, rotation));
        }
    }

    for (entity, rotation) in rotations {
        if let Ok(mut transform) = transforms.get_mut(entity) {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{MovementExecutor, RotationExecutor};

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(SimClock::manual());
        app.add_systems(Update, (apply_locomotion, apply_facing).chain());
        app
    }

    #[test]
    fn test_locomotion_integrates_transform() {
        let mut app = test_app();

        let mut locomotion = Locomotion::new(4.0);
        locomotion.move_along(Vec3::X, 1.0);
        let mover = app.world_mut().spawn((Transform::default(), locomotion)).id();

        app.world_mut().resource_mut::<SimClock>().advance(0.5);
        app.update();

        let position = app.world().get::<Transform>(mover).unwrap().translation;
        assert!((position - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_facing_turns_toward_target() {
        let mut app = test_app();

        let target = app
            .world_mut()
            .spawn(Transform::from_xyz(0.0, 0.0, 5.0))
            .id();

        let mut facing = Facing::default();
        facing.face_target(target);
        let hero = app.world_mut().spawn((Transform::default(), facing)).id();

        app.update();

        let rotation = app.world().get::<Transform>(hero).unwrap().rotation;
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::Z).length() < 1e-5);
    }
}
