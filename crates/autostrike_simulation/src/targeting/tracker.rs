//! TargetTracker: кандидаты в радиусе + lock на ближайшего
//!
//! Архитектура:
//! - Набор кандидатов пополняется ProximityEvent::Entered/Exited (proximity volume)
//! - Lock держится между тиками, пока цель валидна и в радиусе (hysteresis, без дёрганья)
//! - Мёртвые/выключенные кандидаты вычищаются лениво при пересчёте
//!   и сразу по `TargetInvalidated`
//!
//! Tie-break: строго меньшая squared distance побеждает, при равенстве остаётся
//! первый найденный в порядке вставки (порядок ProximityEvent за тик).
//! Детерминирован в рамках прогона.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{Dead, Targetable};

/// Read-only взгляд на мир целей (позиция + IsTargetable)
///
/// В ECS реализован `TargetCandidates`, в тестах фейковыми таблицами.
pub trait TargetView {
    fn position(&self, target: Entity) -> Option<Vec3>;
    fn is_targetable(&self, target: Entity) -> bool;
}

/// SystemParam: все `Targetable` с Transform и Dead-флагом
#[derive(SystemParam)]
pub struct TargetCandidates<'w, 's> {
    targets: Query<'w, 's, (&'static Transform, &'static Targetable, Has<Dead>)>,
}

impl TargetCandidates<'_, '_> {
    /// Cached damage receiver цели (entity с Health)
    pub fn damage_receiver(&self, target: Entity) -> Option<Entity> {
        self.targets
            .get(target)
            .ok()
            .and_then(|(_, targetable, _)| targetable.damage_receiver())
    }
}

impl TargetView for TargetCandidates<'_, '_> {
    fn position(&self, target: Entity) -> Option<Vec3> {
        self.targets
            .get(target)
            .ok()
            .map(|(transform, _, _)| transform.translation)
    }

    fn is_targetable(&self, target: Entity) -> bool {
        self.targets
            .get(target)
            .is_ok_and(|(_, targetable, dead)| targetable.is_targetable(dead))
    }
}

/// Targeting service героя
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TargetTracker {
    range: f32,
    candidates: Vec<Entity>,
    locked: Option<Entity>,
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl TargetTracker {
    pub fn new(range: f32) -> Self {
        Self {
            range: range.max(0.0),
            candidates: Vec::new(),
            locked: None,
        }
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn locked(&self) -> Option<Entity> {
        self.locked
    }

    pub fn candidates(&self) -> &[Entity] {
        &self.candidates
    }

    pub fn is_tracking(&self, target: Entity) -> bool {
        self.candidates.contains(&target)
    }

    /// Кандидат вошёл в proximity volume (дубликаты игнорируются)
    pub fn track(&mut self, target: Entity) -> bool {
        if self.is_tracking(target) {
            return false;
        }

        self.candidates.push(target);
        true
    }

    /// Кандидат вышел из volume: убираем, lock на него сбрасываем
    pub fn untrack(&mut self, target: Entity) -> bool {
        let before = self.candidates.len();
        self.candidates.retain(|&candidate| candidate != target);

        if self.locked == Some(target) {
            self.locked = None;
        }

        self.candidates.len() != before
    }

    /// Явное invalidation уведомление от цели (смерть, деспавн, выключение)
    pub fn invalidate(&mut self, target: Entity) {
        self.untrack(target);
    }

    /// Цель валидна: IsTargetable и в радиусе от `origin`
    pub fn is_valid<V: TargetView>(&self, target: Entity, origin: Vec3, view: &V) -> bool {
        view.is_targetable(target)
            && view
                .position(target)
                .is_some_and(|position| position.distance_squared(origin) <= self.range * self.range)
    }

    /// GetCurrentTarget: lock если ещё валиден, иначе пересчёт + новый lock
    pub fn current_target<V: TargetView>(&mut self, origin: Vec3, view: &V) -> Option<Entity> {
        if let Some(locked) = self.locked {
            if self.is_valid(locked, origin, view) {
                return Some(locked);
            }
            self.locked = None;
        }

        self.refresh(origin, view)
    }

    pub fn has_valid_target<V: TargetView>(&mut self, origin: Vec3, view: &V) -> bool {
        self.current_target(origin, view).is_some()
    }

    /// BreakLock: кандидаты остаются, выбор пересчитается при следующем запросе
    pub fn break_lock(&mut self) {
        self.locked = None;
    }

    /// RefreshTarget: пересчитать ближайшего прямо сейчас
    pub fn refresh<V: TargetView>(&mut self, origin: Vec3, view: &V) -> Option<Entity> {
        // Ленивая чистка мёртвых/выключенных
        self.candidates.retain(|&candidate| view.is_targetable(candidate));

        let range_squared = self.range * self.range;
        let mut closest: Option<(Entity, f32)> = None;

        for &candidate in &self.candidates {
            let Some(position) = view.position(candidate) else {
                continue;
            };

            let distance_squared = position.distance_squared(origin);
            if distance_squared > range_squared {
                continue;
            }

            if closest.is_none_or(|(_, best)| distance_squared < best) {
                closest = Some((candidate, distance_squared));
            }
        }

        self.locked = closest.map(|(entity, _)| entity);
        self.locked
    }

    /// SetRange: новый радиус, lock за пределами радиуса сбрасывается
    pub fn set_range<V: TargetView>(&mut self, radius: f32, origin: Vec3, view: &V) {
        self.range = radius.max(0.0);

        if let Some(locked) = self.locked {
            if !self.is_valid(locked, origin, view) {
                self.locked = None;
            }
        }
    }
}
