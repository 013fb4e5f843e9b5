//! Hero компоненты: Hero marker, HeroState, HeroConfig

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::Combat;
use crate::components::{Facing, Locomotion, MoveIntent, RawMoveInput, WeaponLoadout};
use crate::hero::HeroController;
use crate::targeting::TargetTracker;

/// Герой под управлением игрока
///
/// Через Required Components получает весь набор hero core:
/// FSM, targeting, combat, movement/rotation executors, loadout.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    Transform,
    HeroState,
    HeroConfig,
    HeroController,
    RawMoveInput,
    MoveIntent,
    Locomotion,
    Facing,
    TargetTracker,
    Combat,
    WeaponLoadout
)]
pub struct Hero;

/// Поведенческое состояние героя
///
/// Ровно одно активно. Меняется только через `HeroController::step`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum HeroState {
    /// Стоим, целей нет
    #[default]
    Idle,
    /// Игрок ведёт стиком (приоритет над атакой)
    Move,
    /// Автоатака по ближайшей цели
    Attack,
}

impl HeroState {
    /// Чистая функция перехода: (intent, has_valid_target) → state
    ///
    /// Движение всегда побеждает атаку.
    pub fn decide(intent: &MoveIntent, has_valid_target: bool, deadzone: f32) -> Self {
        if intent.exceeds_deadzone(deadzone) {
            HeroState::Move
        } else if has_valid_target {
            HeroState::Attack
        } else {
            HeroState::Idle
        }
    }
}

/// Тюнинг героя (загружается из RON через `HeroTuning`)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct HeroConfig {
    /// Порог strength стика, ниже которого intent не считается движением
    pub move_deadzone: f32,
    /// Базовая скорость (м/с), умножается на multiplier оружия
    pub base_move_speed: f32,
    /// Радиус targeting пока оружие не экипировано (метры)
    pub detection_range: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            move_deadzone: 0.1,
            base_move_speed: 5.0,
            detection_range: 3.0,
        }
    }
}
