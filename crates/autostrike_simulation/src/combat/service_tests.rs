//! Tests for Combat service (без App: фейковый TargetView + ручной HitSchedule).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{AttackOutcome, Combat, HitSchedule};
    use crate::components::{Damageable, Health, WeaponProfile};
    use crate::targeting::TargetTracker;
    use crate::test_support::{entity, FakeTargets};

    const ORIGIN: Vec3 = Vec3::ZERO;

    fn test_weapon() -> WeaponProfile {
        WeaponProfile {
            name: "test blade".to_string(),
            attack_cooldown_seconds: 1.0,
            damage_on_hit: 10,
            hit_time_normalized: 0.5,
            attack_range: 3.0,
            move_speed_multiplier: 1.0,
            animation_length_seconds: 1.0,
        }
    }

    struct Fixture {
        hero: Entity,
        target: Entity,
        view: FakeTargets,
        tracker: TargetTracker,
        combat: Combat,
        schedule: HitSchedule,
        health: Health,
    }

    impl Fixture {
        /// Цель на расстоянии 2, range 3
        fn new() -> Self {
            let target = entity(10);
            let mut tracker = TargetTracker::new(3.0);
            tracker.track(target);

            Self {
                hero: entity(1),
                target,
                view: FakeTargets::default().with(target, Vec3::new(2.0, 0.0, 0.0)),
                tracker,
                combat: Combat::with_weapon(test_weapon()),
                schedule: HitSchedule::default(),
                health: Health::new(100),
            }
        }

        fn attack(&mut self, now: f32) -> AttackOutcome {
            let outcome = self
                .combat
                .try_start_attack(now, None, &mut self.tracker, ORIGIN, &self.view);
            if let Some(cycle) = outcome.started() {
                self.schedule.schedule(self.hero, cycle);
            }
            outcome
        }

        fn tick(&mut self, now: f32) {
            self.combat.tick(now, &mut self.tracker, ORIGIN, &self.view);
        }

        /// Применить due удары, вернуть суммарный урон
        fn resolve(&mut self, now: f32) -> u32 {
            let mut dealt = 0;
            for hit in self.schedule.take_due(now) {
                if self.combat.claim_hit(&hit, &self.tracker, ORIGIN, &self.view) {
                    dealt += self.health.apply_damage(hit.damage);
                }
            }
            dealt
        }
    }

    #[test]
    fn test_attack_schedules_hit_and_cooldown() {
        let mut fx = Fixture::new();

        let outcome = fx.attack(0.0);
        let cycle = *outcome.started().unwrap();

        assert!(outcome.accepted());
        assert_eq!(cycle.target, fx.target);
        assert_eq!(cycle.hit_at, 0.5);
        assert_eq!(cycle.cooldown, 1.0);
        assert_eq!(fx.combat.next_attack_at(), 1.0);
        assert!(fx.combat.is_attacking());

        assert_eq!(fx.resolve(0.4), 0);

        fx.tick(0.5);
        assert_eq!(fx.resolve(0.5), 10);
        assert_eq!(fx.health.current, 90);

        // Ровно один раз
        fx.tick(0.6);
        assert_eq!(fx.resolve(0.6), 0);
        assert_eq!(fx.health.current, 90);
    }

    #[test]
    fn test_second_attack_within_cooldown() {
        let mut fx = Fixture::new();
        assert!(fx.attack(0.0).accepted());

        // Замах ещё идёт: true без рестарта
        assert_eq!(fx.attack(0.2), AttackOutcome::AlreadyInProgress);
        assert_eq!(fx.schedule.len(), 1);

        // Удар прошёл, cooldown нет
        fx.tick(0.5);
        fx.resolve(0.5);
        assert_eq!(fx.attack(0.7), AttackOutcome::CoolingDown);
        assert!(!fx.attack(0.9).accepted());

        // Cooldown истёк
        assert!(matches!(fx.attack(1.0), AttackOutcome::Started(_)));
    }

    #[test]
    fn test_cancel_suppresses_scheduled_hit() {
        let mut fx = Fixture::new();
        fx.attack(0.0);
        let version = fx.combat.version();

        fx.combat.cancel_attack();

        assert_eq!(fx.combat.version(), version + 1);
        assert_eq!(fx.combat.target(), None);
        assert!(!fx.combat.is_attacking());
        assert!(!fx.combat.has_pending_hit());
        assert_eq!(fx.resolve(0.5), 0);
        assert_eq!(fx.health.current, 100);
    }

    #[test]
    fn test_cancel_keeps_cadence_gate() {
        let mut fx = Fixture::new();
        fx.attack(0.0);
        fx.combat.cancel_attack();

        assert_eq!(fx.attack(0.3), AttackOutcome::CoolingDown);
        assert!(fx.attack(1.0).accepted());
    }

    #[test]
    fn test_target_leaving_range_mid_swing_cancels() {
        let mut fx = Fixture::new();
        fx.attack(0.0);

        fx.view.place(fx.target, Vec3::new(5.0, 0.0, 0.0));
        fx.tick(0.3);

        assert!(!fx.combat.is_attacking());
        assert_eq!(fx.combat.target(), None);
        assert_eq!(fx.tracker.locked(), None);

        fx.tick(0.5);
        assert_eq!(fx.resolve(0.5), 0);
    }

    #[test]
    fn test_invalid_snapshot_at_apply_time_is_noop() {
        let mut fx = Fixture::new();
        fx.attack(0.0);

        // Цель умерла ровно к моменту удара, tick не успел заметить
        fx.view.kill(fx.target);
        assert_eq!(fx.resolve(0.5), 0);
        assert!(!fx.combat.has_pending_hit());
    }

    #[test]
    fn test_window_end_reacquires_without_redirecting_hit() {
        let mut fx = Fixture::new();
        let backup = entity(11);
        fx.view.place(backup, Vec3::new(0.0, 0.0, 2.5));
        fx.tracker.track(backup);

        fx.attack(0.0);
        fx.view.kill(fx.target);

        fx.tick(0.5);

        // Re-acquire на backup, атака не отменена
        assert_eq!(fx.combat.target(), Some(backup));
        assert!(!fx.combat.is_attacking());

        // Удар по мёртвому snapshot не перенаправляется
        assert_eq!(fx.resolve(0.5), 0);
    }

    #[test]
    fn test_window_end_without_replacement_cancels() {
        let mut fx = Fixture::new();
        fx.attack(0.0);
        let version = fx.combat.version();

        fx.view.kill(fx.target);
        fx.tick(0.5);

        assert_eq!(fx.combat.target(), None);
        assert_eq!(fx.combat.version(), version + 1);
        assert!(!fx.combat.is_engaged());
    }

    #[test]
    fn test_unarmed_attack_aborts() {
        let mut fx = Fixture::new();
        fx.combat = Combat::default();

        assert_eq!(fx.attack(0.0), AttackOutcome::Unarmed);
        assert_eq!(fx.attack(0.1), AttackOutcome::Unarmed);
        assert!(!fx.attack(0.2).accepted());
        assert!(fx.schedule.is_empty());
        assert!(!fx.combat.is_attacking());
    }

    #[test]
    fn test_no_target() {
        let mut fx = Fixture::new();
        fx.view.kill(fx.target);

        assert_eq!(fx.attack(0.0), AttackOutcome::NoTarget);
    }

    #[test]
    fn test_preferred_target_and_fallback() {
        let mut fx = Fixture::new();
        let preferred = entity(12);
        fx.view.place(preferred, Vec3::new(2.9, 0.0, 0.0));

        let outcome = fx
            .combat
            .try_start_attack(0.0, Some(preferred), &mut fx.tracker, ORIGIN, &fx.view);
        assert_eq!(outcome.started().map(|cycle| cycle.target), Some(preferred));

        // Невалидный preferred → текущая цель targeting
        let mut fx = Fixture::new();
        let far = entity(13);
        fx.view.place(far, Vec3::new(9.0, 0.0, 0.0));
        let outcome = fx
            .combat
            .try_start_attack(0.0, Some(far), &mut fx.tracker, ORIGIN, &fx.view);
        assert_eq!(outcome.started().map(|cycle| cycle.target), Some(fx.target));
    }

    #[test]
    fn test_set_weapon_mid_swing_cancels() {
        let mut fx = Fixture::new();
        fx.attack(0.0);

        fx.combat.set_weapon(WeaponProfile::spear());

        assert!(!fx.combat.is_attacking());
        assert_eq!(fx.combat.weapon().map(|w| w.name.as_str()), Some("spear"));
        assert_eq!(fx.resolve(0.5), 0);
    }

    #[test]
    fn test_hit_at_cooldown_edge_survives_next_cycle() {
        let mut fx = Fixture::new();
        let mut weapon = test_weapon();
        weapon.hit_time_normalized = 1.0;
        fx.combat.set_weapon(weapon);

        fx.attack(0.0);
        fx.tick(1.0);

        // Новый цикл начат в тот же тик, что и удар прошлого
        assert!(matches!(fx.attack(1.0), AttackOutcome::Started(_)));
        assert_eq!(fx.resolve(1.0), 10);
        assert_eq!(fx.resolve(2.0), 10);
    }

    #[test]
    fn test_tick_follows_targeting_between_swings() {
        let mut fx = Fixture::new();
        fx.attack(0.0);
        fx.tick(0.5);
        fx.resolve(0.5);

        let closer = entity(14);
        fx.view.place(closer, Vec3::new(0.0, 0.0, 1.0));
        fx.tracker.track(closer);
        fx.tracker.refresh(ORIGIN, &fx.view);

        fx.tick(0.6);
        assert_eq!(fx.combat.target(), Some(closer));
    }
}
