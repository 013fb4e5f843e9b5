//! Equipment компоненты: WeaponProfile, WeaponLoadout
//!
//! # Architecture
//! - `WeaponProfile` принадлежит equipment system (loadout, RON конфиг)
//! - `Combat` / `TargetTracker` держат только КОПИЮ текущего профиля,
//!   при смене оружия профиль заменяется целиком
//! - Визуал оружия (prefab, attach к руке) не в core: presentation слушает `WeaponEquipped`

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

fn default_animation_length() -> f32 {
    1.0
}

fn default_move_speed_multiplier() -> f32 {
    1.0
}

/// Боевые характеристики оружия
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,

    /// Минимальный интервал между началами атак (секунды)
    pub attack_cooldown_seconds: f32,

    /// Урон за попадание
    pub damage_on_hit: u32,

    /// Момент удара как доля cooldown (0.5 = на середине цикла)
    pub hit_time_normalized: f32,

    /// Радиус атаки = радиус targeting (метры)
    pub attack_range: f32,

    /// Множитель скорости героя с этим оружием в руках
    #[serde(default = "default_move_speed_multiplier")]
    pub move_speed_multiplier: f32,

    /// Длина клипа атаки при playback speed 1.0 (секунды)
    #[serde(default = "default_animation_length")]
    pub animation_length_seconds: f32,
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self::sword()
    }
}

impl WeaponProfile {
    pub fn sword() -> Self {
        Self {
            name: "sword".to_string(),
            attack_cooldown_seconds: 0.8,
            damage_on_hit: 25,
            hit_time_normalized: 0.4,
            attack_range: 2.5,
            move_speed_multiplier: 1.0,
            animation_length_seconds: 0.8,
        }
    }

    pub fn spear() -> Self {
        Self {
            name: "spear".to_string(),
            attack_cooldown_seconds: 1.2,
            damage_on_hit: 35,
            hit_time_normalized: 0.5,
            attack_range: 3.5,
            move_speed_multiplier: 0.9,
            animation_length_seconds: 1.0,
        }
    }

    pub fn bow() -> Self {
        Self {
            name: "bow".to_string(),
            attack_cooldown_seconds: 1.0,
            damage_on_hit: 15,
            hit_time_normalized: 0.6,
            attack_range: 8.0,
            move_speed_multiplier: 0.85,
            animation_length_seconds: 1.2,
        }
    }

    /// Playback speed клипа атаки, чтобы анимация укладывалась в cadence
    ///
    /// cooldown 0.5s при клипе 1.0s → клип играется на 2x.
    pub fn attack_playback_speed(&self) -> f32 {
        if self.attack_cooldown_seconds <= f32::EPSILON || self.animation_length_seconds <= 0.0 {
            return 1.0;
        }

        self.animation_length_seconds / self.attack_cooldown_seconds
    }

    /// Смещение удара от начала атаки (секунды)
    pub fn hit_delay(&self) -> f32 {
        self.attack_cooldown_seconds.max(0.0) * self.hit_time_normalized.clamp(0.0, 1.0)
    }
}

/// Набор оружия героя (hotbar слоты)
///
/// `active` указывает на экипированный слот. Переключение идёт через
/// `SwitchWeaponIntent` / `CycleWeaponIntent` events, не напрямую.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponLoadout {
    slots: Vec<WeaponProfile>,
    active: Option<usize>,
}

impl WeaponLoadout {
    pub fn new(slots: Vec<WeaponProfile>) -> Self {
        Self { slots, active: None }
    }

    pub fn slots(&self) -> &[WeaponProfile] {
        &self.slots
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.active
    }

    /// В руках оружие не из loadout (прямой EquipWeaponIntent)
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Сделать слот активным, вернуть профиль (None если слота нет)
    pub fn select(&mut self, slot: usize) -> Option<&WeaponProfile> {
        if slot >= self.slots.len() {
            return None;
        }

        self.active = Some(slot);
        self.slots.get(slot)
    }

    /// Следующий слот по кругу
    pub fn next_slot(&self) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }

        Some(match self.active {
            Some(slot) => (slot + 1) % self.slots.len(),
            None => 0,
        })
    }
}
