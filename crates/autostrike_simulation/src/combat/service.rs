//! Combat component: cadence автоатаки, отложенный удар, version guard
//!
//! Архитектура:
//! - `next_attack_at` / `attack_ends_at` / hit time: абсолютные метки `SimClock`
//! - Удар не применяется здесь: `try_start_attack` возвращает `AttackCycle`,
//!   система кладёт его в `HitSchedule`, `resolve_scheduled_hits` применяет
//! - `cancel_attack` бампит version: уже запланированные удары становятся no-op
//! - In-progress окно заканчивается в момент удара (hit time)

use bevy::prelude::*;

use crate::combat::ScheduledHit;
use crate::components::WeaponProfile;
use crate::logger;
use crate::targeting::{TargetTracker, TargetView};

/// Результат `try_start_attack`
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// Новый цикл атаки начат
    Started(AttackCycle),
    /// Атака уже идёт по валидной цели (без рестарта)
    AlreadyInProgress,
    /// Cadence gate ещё закрыт
    CoolingDown,
    /// Нет валидной цели
    NoTarget,
    /// Оружие не экипировано
    Unarmed,
}

impl AttackOutcome {
    /// TryStartAttack → bool
    pub fn accepted(&self) -> bool {
        matches!(self, AttackOutcome::Started(_) | AttackOutcome::AlreadyInProgress)
    }

    pub fn started(&self) -> Option<&AttackCycle> {
        match self {
            AttackOutcome::Started(cycle) => Some(cycle),
            _ => None,
        }
    }
}

/// Параметры начатого цикла атаки (для HitSchedule и presentation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackCycle {
    /// Snapshot цели на момент старта (удар не перенаправляется)
    pub target: Entity,
    /// Длительность cooldown (AttackCooldownStarted)
    pub cooldown: f32,
    /// Playback speed клипа атаки
    pub playback_speed: f32,
    /// Абсолютное время удара
    pub hit_at: f32,
    pub damage: u32,
    /// Pending-damage version на момент планирования
    pub version: u32,
    /// Порядковый номер цикла
    pub cycle: u32,
}

/// Combat service героя
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Combat {
    /// Копия экипированного профиля (None = безоружен)
    weapon: Option<WeaponProfile>,

    /// Текущая цель атаки
    target: Option<Entity>,

    attack_in_progress: bool,

    /// Конец in-progress окна (= hit time)
    attack_ends_at: f32,

    /// Cadence gate: раньше этого времени новая атака не начинается
    next_attack_at: f32,

    /// Циклы, чьи удары ещё не применены
    pending_cycles: Vec<u32>,

    /// Pending-damage version (растёт на каждый cancel)
    version: u32,

    /// Счётчик начатых циклов
    cycles: u32,

    /// Ошибка "атака без оружия" уже залогирована
    reported_unarmed: bool,
}

impl Combat {
    pub fn with_weapon(weapon: WeaponProfile) -> Self {
        Self {
            weapon: Some(weapon),
            ..Default::default()
        }
    }

    pub fn weapon(&self) -> Option<&WeaponProfile> {
        self.weapon.as_ref()
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_in_progress
    }

    pub fn next_attack_at(&self) -> f32 {
        self.next_attack_at
    }

    /// Cooldown истёк
    pub fn is_ready(&self, now: f32) -> bool {
        now >= self.next_attack_at
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn has_pending_hit(&self) -> bool {
        !self.pending_cycles.is_empty()
    }

    /// Есть цель или идёт замах
    pub fn is_engaged(&self) -> bool {
        self.target.is_some() || self.attack_in_progress
    }

    /// SetWeapon: профиль заменяется целиком, текущий замах отменяется
    pub fn set_weapon(&mut self, weapon: WeaponProfile) {
        if self.attack_in_progress {
            self.cancel_attack();
        }

        self.weapon = Some(weapon);
        self.reported_unarmed = false;
    }

    pub fn clear_weapon(&mut self) {
        if self.attack_in_progress {
            self.cancel_attack();
        }

        self.weapon = None;
    }

    /// TryStartAttack
    ///
    /// Цель: `preferred` если валидна, иначе текущая цель targeting.
    /// Cooldown gate переживает cancel, так что быстрый Move→Attack не даёт
    /// атаковать чаще cadence.
    pub fn try_start_attack<V: TargetView>(
        &mut self,
        now: f32,
        preferred: Option<Entity>,
        tracker: &mut TargetTracker,
        origin: Vec3,
        view: &V,
    ) -> AttackOutcome {
        if self.attack_in_progress {
            if let Some(target) = self.target {
                if tracker.is_valid(target, origin, view) {
                    return AttackOutcome::AlreadyInProgress;
                }
            }
        }

        let target = match preferred.filter(|&target| tracker.is_valid(target, origin, view)) {
            Some(target) => target,
            None => match tracker.current_target(origin, view) {
                Some(target) => target,
                None => return AttackOutcome::NoTarget,
            },
        };

        if !self.is_ready(now) {
            return AttackOutcome::CoolingDown;
        }

        let Some(weapon) = self.weapon.as_ref() else {
            if !self.reported_unarmed {
                self.reported_unarmed = true;
                logger::log_error(&format!(
                    "Combat: attack on {:?} aborted, no weapon equipped",
                    target
                ));
            }
            return AttackOutcome::Unarmed;
        };

        let cooldown = weapon.attack_cooldown_seconds.max(0.0);
        let hit_at = now + weapon.hit_delay();
        let damage = weapon.damage_on_hit;
        let playback_speed = weapon.attack_playback_speed();

        self.cycles = self.cycles.wrapping_add(1);
        self.target = Some(target);
        self.attack_in_progress = true;
        self.attack_ends_at = hit_at;
        self.next_attack_at = now + cooldown;
        self.pending_cycles.push(self.cycles);

        AttackOutcome::Started(AttackCycle {
            target,
            cooldown,
            playback_speed,
            hit_at,
            damage,
            version: self.version,
            cycle: self.cycles,
        })
    }

    /// CancelAttack: чистит цель, in-progress и pending удар, бампит version
    pub fn cancel_attack(&mut self) {
        self.target = None;
        self.attack_in_progress = false;
        self.pending_cycles.clear();
        self.version = self.version.wrapping_add(1);
    }

    /// Per-tick обновление
    ///
    /// Вне замаха цель пере-резолвится от targeting каждый тик. Невалидная цель
    /// посреди замаха отменяет атаку (и lock). В конце окна невалидная цель
    /// даёт одну попытку re-acquire до cancel.
    pub fn tick<V: TargetView>(&mut self, now: f32, tracker: &mut TargetTracker, origin: Vec3, view: &V) {
        if !self.is_engaged() {
            return;
        }

        if !self.attack_in_progress {
            self.target = tracker.current_target(origin, view);
            return;
        }

        let target_valid = self
            .target
            .is_some_and(|target| tracker.is_valid(target, origin, view));

        if now >= self.attack_ends_at {
            self.attack_in_progress = false;

            if !target_valid {
                match tracker.current_target(origin, view) {
                    Some(target) => self.target = Some(target),
                    None => self.cancel_attack(),
                }
            }
            return;
        }

        if !target_valid {
            if self.target.is_some() && tracker.locked() == self.target {
                tracker.break_lock();
            }
            self.cancel_attack();
        }
    }

    /// Удар из `HitSchedule` можно применять
    ///
    /// Version и цикл должны совпасть (каждый удар применяется максимум один раз),
    /// snapshot цели должен быть валиден прямо сейчас. Невалидный snapshot съедает
    /// удар без применения.
    pub fn claim_hit<V: TargetView>(
        &mut self,
        hit: &ScheduledHit,
        tracker: &TargetTracker,
        origin: Vec3,
        view: &V,
    ) -> bool {
        if hit.version != self.version {
            return false;
        }

        let Some(index) = self.pending_cycles.iter().position(|&cycle| cycle == hit.cycle) else {
            return false;
        };

        self.pending_cycles.remove(index);
        tracker.is_valid(hit.target, origin, view)
    }
}
