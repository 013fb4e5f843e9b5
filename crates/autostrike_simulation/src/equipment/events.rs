//! Equipment events
//!
//! # Architecture
//!
//! **Intents (UI / hotkeys / скрипты):**
//! - `EquipWeaponIntent` → экипировать профиль напрямую (мимо loadout)
//! - `SwitchWeaponIntent` → активный слот loadout
//! - `CycleWeaponIntent` → следующий слот по кругу
//!
//! **Output:**
//! - `WeaponEquipped` → presentation показывает/прячет модели оружия

use bevy::prelude::*;

use crate::components::WeaponProfile;

/// Экипировать конкретный профиль
#[derive(Event, Clone, Debug)]
pub struct EquipWeaponIntent {
    pub hero: Entity,
    pub profile: WeaponProfile,
}

/// Переключиться на слот loadout (hotkeys 1-4)
#[derive(Event, Clone, Copy, Debug)]
pub struct SwitchWeaponIntent {
    pub hero: Entity,
    pub slot: usize,
}

/// Следующий слот loadout
#[derive(Event, Clone, Copy, Debug)]
pub struct CycleWeaponIntent {
    pub hero: Entity,
}

/// Оружие экипировано (профиль уже в Combat / TargetTracker / Locomotion)
#[derive(Event, Clone, Debug, PartialEq)]
pub struct WeaponEquipped {
    pub hero: Entity,
    pub weapon: String,
    /// Слот loadout (None для `EquipWeaponIntent`)
    pub slot: Option<usize>,
}
