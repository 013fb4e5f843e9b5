//! Targeting events: proximity volume + invalidation
//!
//! ProximityEvent генерирует либо headless `sense_proximity`, либо engine bridge
//! (trigger volume callbacks), в зависимости от `ProximitySource`.

use bevy::prelude::*;

/// Enter/exit события proximity volume героя
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityEvent {
    /// Цель вошла в volume
    Entered {
        /// Чей volume (герой)
        observer: Entity,
        target: Entity,
    },

    /// Цель вышла из volume
    Exited { observer: Entity, target: Entity },
}

/// Цель больше не валидна (смерть, выключение, деспавн)
///
/// Трекеры убирают её сразу, не дожидаясь ленивой чистки.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInvalidated {
    pub target: Entity,
}

/// Кто генерирует ProximityEvent
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProximitySource {
    /// Встроенный distance-based volume (радиус = range трекера)
    #[default]
    Headless,
    /// События шлёт engine bridge, headless sensing выключен
    External,
}
