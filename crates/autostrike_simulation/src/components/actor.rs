//! Базовые компоненты акторов: Health, Targetable, Dead
//!
//! Hero core не владеет lifecycle врагов. Враг для core это:
//! - `Targetable` (можно ли выбрать целью + cached damage receiver)
//! - `Health` где-то по ссылке receiver (куда применять урон)
//! - `Dead` маркер (выставляется `mark_dead` при HP == 0)

use bevy::prelude::*;

/// Damage contract: всё, что умеет получать урон
pub trait Damageable {
    /// Применить урон, вернуть фактически снятое количество
    fn apply_damage(&mut self, amount: u32) -> u32;
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

impl Damageable for Health {
    fn apply_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current);
        self.current -= applied;
        applied
    }
}

/// Актор, которого герой может выбрать целью
///
/// `active == false` означает "выключен" (вернулся в пул, скрыт),
/// цель в таком состоянии невалидна, но entity жива.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Targetable {
    pub active: bool,
    /// Cached ссылка на entity с `Health` (self или parent hurtbox)
    damage_receiver: Option<Entity>,
}

impl Default for Targetable {
    fn default() -> Self {
        Self {
            active: true,
            damage_receiver: None,
        }
    }
}

impl Targetable {
    /// Receiver задан явно (cache system его не трогает)
    pub fn with_receiver(receiver: Entity) -> Self {
        Self {
            active: true,
            damage_receiver: Some(receiver),
        }
    }

    /// IsTargetable: active + alive
    pub fn is_targetable(&self, dead: bool) -> bool {
        self.active && !dead
    }

    pub fn damage_receiver(&self) -> Option<Entity> {
        self.damage_receiver
    }

    pub fn cache_damage_receiver(&mut self, receiver: Entity) {
        self.damage_receiver = Some(receiver);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Трупы не деспавнятся core'ом, только перестают быть валидными целями.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;
