//! Фейки для unit-тестов сервисов (без App)

use std::collections::HashMap;

use bevy::prelude::*;

use crate::components::{FacingGoal, MovementExecutor, RotationExecutor};
use crate::targeting::TargetView;

/// Таблица целей: позиция + alive/active
#[derive(Debug, Default, Clone)]
pub struct FakeTargets {
    targets: HashMap<Entity, (Vec3, bool)>,
}

impl FakeTargets {
    pub fn with(mut self, target: Entity, position: Vec3) -> Self {
        self.targets.insert(target, (position, true));
        self
    }

    pub fn place(&mut self, target: Entity, position: Vec3) {
        let alive = self.targets.get(&target).is_none_or(|(_, alive)| *alive);
        self.targets.insert(target, (position, alive));
    }

    pub fn kill(&mut self, target: Entity) {
        if let Some((_, alive)) = self.targets.get_mut(&target) {
            *alive = false;
        }
    }

    pub fn despawn(&mut self, target: Entity) {
        self.targets.remove(&target);
    }
}

impl TargetView for FakeTargets {
    fn position(&self, target: Entity) -> Option<Vec3> {
        self.targets.get(&target).map(|(position, _)| *position)
    }

    fn is_targetable(&self, target: Entity) -> bool {
        self.targets.get(&target).is_some_and(|(_, alive)| *alive)
    }
}

/// Movement executor, который только записывает команды
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingMover {
    pub moving: Option<(Vec3, f32)>,
    pub stops: u32,
    pub speed_multiplier: f32,
}

impl MovementExecutor for RecordingMover {
    fn move_along(&mut self, direction: Vec3, strength: f32) {
        self.moving = Some((direction, strength));
    }

    fn stop(&mut self) {
        self.moving = None;
        self.stops += 1;
    }

    fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
    }
}

/// Rotation executor, который помнит последнюю команду
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingRotator {
    pub goal: FacingGoal,
}

impl RotationExecutor for RecordingRotator {
    fn face_direction(&mut self, direction: Vec3) {
        self.goal = FacingGoal::Direction(direction);
    }

    fn face_target(&mut self, target: Entity) {
        self.goal = FacingGoal::Target(target);
    }
}

pub fn entity(index: u32) -> Entity {
    Entity::from_raw(index)
}
