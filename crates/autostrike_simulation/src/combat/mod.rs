//! Combat module: автоатака по ближайшей цели
//!
//! ECS ответственность:
//! - Combat component: cadence, in-progress окно, version guard
//! - HitSchedule: отложенный удар по hit time
//! - Damage application через cached damage receiver
//! - Events: AttackCooldownStarted, DamageDealt, EntityDied
//!
//! Presentation ответственность:
//! - Клип атаки (HeroAnimation::Attack с playback speed)
//! - Cooldown UI (AttackCooldownStarted)

use bevy::prelude::*;

use crate::HeroCoreSet;

pub mod events;
pub mod schedule;
pub mod service;
pub mod systems;

#[cfg(test)]
mod service_tests;

// Re-export основных типов
pub use events::{AttackCooldownStarted, DamageDealt, EntityDied};
pub use schedule::{HitSchedule, ScheduledHit};
pub use service::{AttackCycle, AttackOutcome, Combat};

/// Combat Plugin
///
/// Удары применяются в `HeroCoreSet::Resolution` (после решения FSM этого тика):
/// 1. resolve_scheduled_hits: due удары → Health
/// 2. mark_dead: Dead marker + выключение Targetable
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackCooldownStarted>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .init_resource::<HitSchedule>();

        app.add_systems(
            FixedUpdate,
            (systems::resolve_scheduled_hits, systems::mark_dead)
                .chain()
                .in_set(HeroCoreSet::Resolution),
        );
    }
}
