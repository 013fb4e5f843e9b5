//! Combat events

use bevy::prelude::*;

/// Событие: начался cooldown атаки (UI cooldown indicator)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackCooldownStarted {
    pub hero: Entity,
    /// Секунды
    pub duration: f32,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageDealt {
    pub attacker: Entity,
    /// Цель атаки (snapshot), не обязательно entity с Health
    pub target: Entity,
    /// Entity, чей Health изменился
    pub receiver: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
