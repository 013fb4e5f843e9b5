//! HitSchedule: отложенные удары (damage по hit time)
//!
//! Живёт отдельно от `Combat`: cancel не может вытащить удар из очереди,
//! он отсекается version guard при применении.

use bevy::prelude::*;

use crate::combat::AttackCycle;

/// Запланированный удар
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledHit {
    pub attacker: Entity,
    /// Snapshot цели на момент старта атаки
    pub target: Entity,
    pub damage: u32,
    /// Абсолютное время применения (SimClock)
    pub apply_at: f32,
    pub version: u32,
    pub cycle: u32,
}

/// Очередь отложенных ударов всех атакующих
#[derive(Resource, Debug, Default)]
pub struct HitSchedule {
    pending: Vec<ScheduledHit>,
}

impl HitSchedule {
    pub fn schedule(&mut self, attacker: Entity, cycle: &AttackCycle) {
        self.pending.push(ScheduledHit {
            attacker,
            target: cycle.target,
            damage: cycle.damage,
            apply_at: cycle.hit_at,
            version: cycle.version,
            cycle: cycle.cycle,
        });
    }

    /// Забрать удары с `apply_at <= now` (по времени, при равенстве в порядке планирования)
    pub fn take_due(&mut self, now: f32) -> Vec<ScheduledHit> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|hit| hit.apply_at <= now);

        self.pending = pending;
        due.sort_by(|a, b| a.apply_at.total_cmp(&b.apply_at));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(target: Entity, hit_at: f32, cycle: u32) -> AttackCycle {
        AttackCycle {
            target,
            cooldown: 1.0,
            playback_speed: 1.0,
            hit_at,
            damage: 10,
            version: 0,
            cycle,
        }
    }

    #[test]
    fn test_take_due_keeps_future_hits() {
        let attacker = Entity::from_raw(1);
        let target = Entity::from_raw(2);
        let mut schedule = HitSchedule::default();
        schedule.schedule(attacker, &cycle(target, 0.5, 1));
        schedule.schedule(attacker, &cycle(target, 1.5, 2));

        assert!(schedule.take_due(0.4).is_empty());

        let due = schedule.take_due(0.5);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].cycle, 1);
        assert_eq!(due[0].apply_at, 0.5);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_take_due_orders_by_time() {
        let attacker = Entity::from_raw(1);
        let mut schedule = HitSchedule::default();
        schedule.schedule(attacker, &cycle(Entity::from_raw(2), 0.7, 1));
        schedule.schedule(attacker, &cycle(Entity::from_raw(3), 0.2, 2));
        schedule.schedule(attacker, &cycle(Entity::from_raw(4), 0.7, 3));

        let cycles: Vec<u32> = schedule.take_due(1.0).iter().map(|hit| hit.cycle).collect();
        assert_eq!(cycles, vec![2, 1, 3]);
        assert!(schedule.is_empty());
    }
}
