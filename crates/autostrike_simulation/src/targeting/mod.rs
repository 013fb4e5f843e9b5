//! Targeting module: proximity-based выбор ближайшей цели с lock
//!
//! ECS ответственность:
//! - TargetTracker (кандидаты + lock) на герое
//! - Proximity volume (headless) или приём ProximityEvent от движка
//! - TargetInvalidated рассылка и чистка трекеров
//!
//! Движок (если есть): trigger volume → ProximityEvent, ProximitySource::External

use bevy::prelude::*;

use crate::HeroCoreSet;

pub mod events;
pub mod systems;
pub mod tracker;

#[cfg(test)]
mod tracker_tests;

// Re-export основных типов
pub use events::{ProximityEvent, ProximitySource, TargetInvalidated};
pub use tracker::{TargetCandidates, TargetTracker, TargetView};

/// Targeting Plugin
///
/// Системы в `HeroCoreSet::Targeting`, последовательно:
/// cache_damage_receivers → broadcast_target_invalidation → sense_proximity → track_proximity
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProximityEvent>()
            .add_event::<TargetInvalidated>()
            .init_resource::<ProximitySource>();

        app.add_systems(
            FixedUpdate,
            (
                systems::cache_damage_receivers,
                systems::broadcast_target_invalidation,
                systems::sense_proximity.run_if(resource_equals(ProximitySource::Headless)),
                systems::track_proximity,
            )
                .chain()
                .in_set(HeroCoreSet::Targeting),
        );
    }
}
