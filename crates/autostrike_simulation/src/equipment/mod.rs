//! Equipment module: loadout героя и смена оружия
//!
//! # Architecture
//!
//! **Events → Systems flow:**
//! - UI / hotkeys шлют intent events
//! - `process_weapon_intents` меняет loadout и ставит профиль в сервисы
//! - `WeaponEquipped` → presentation (видимость моделей оружия)
//!
//! Профиль копируется целиком: Combat, TargetTracker (range) и Locomotion
//! (speed multiplier) не держат ссылок на loadout.

use bevy::prelude::*;

use crate::HeroCoreSet;

pub mod events;
pub mod systems;

// Re-exports
pub use events::*;
pub use systems::{init_hero_equipment, install_weapon, process_weapon_intents};

/// Equipment plugin
///
/// Системы в `HeroCoreSet::Equipment` (до targeting, чтобы новый range
/// учитывался уже в этом тике).
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EquipWeaponIntent>()
            .add_event::<SwitchWeaponIntent>()
            .add_event::<CycleWeaponIntent>()
            .add_event::<WeaponEquipped>()
            .add_systems(
                FixedUpdate,
                (init_hero_equipment, process_weapon_intents)
                    .chain()
                    .in_set(HeroCoreSet::Equipment),
            );
    }
}
