//! Tests for TargetTracker.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::targeting::TargetTracker;
    use crate::test_support::{entity, FakeTargets};

    const ORIGIN: Vec3 = Vec3::ZERO;

    fn tracker_with(range: f32, targets: &[Entity]) -> TargetTracker {
        let mut tracker = TargetTracker::new(range);
        for &target in targets {
            tracker.track(target);
        }
        tracker
    }

    #[test]
    fn test_closest_candidate_is_locked() {
        let (far, near) = (entity(1), entity(2));
        let view = FakeTargets::default()
            .with(far, Vec3::new(2.5, 0.0, 0.0))
            .with(near, Vec3::new(0.0, 0.0, 1.0));
        let mut tracker = tracker_with(3.0, &[far, near]);

        assert_eq!(tracker.current_target(ORIGIN, &view), Some(near));
        assert_eq!(tracker.locked(), Some(near));
        assert!(tracker.has_valid_target(ORIGIN, &view));
    }

    #[test]
    fn test_lock_is_sticky_while_valid() {
        let (first, second) = (entity(1), entity(2));
        let mut view = FakeTargets::default()
            .with(first, Vec3::new(2.0, 0.0, 0.0))
            .with(second, Vec3::new(2.5, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[first, second]);
        assert_eq!(tracker.current_target(ORIGIN, &view), Some(first));

        // second подошёл ближе, но lock держится
        view.place(second, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(tracker.current_target(ORIGIN, &view), Some(first));

        // RefreshTarget пересчитывает
        assert_eq!(tracker.refresh(ORIGIN, &view), Some(second));
    }

    #[test]
    fn test_dead_lock_is_replaced_and_pruned() {
        let (victim, backup) = (entity(1), entity(2));
        let mut view = FakeTargets::default()
            .with(victim, Vec3::new(1.0, 0.0, 0.0))
            .with(backup, Vec3::new(2.0, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[victim, backup]);
        assert_eq!(tracker.current_target(ORIGIN, &view), Some(victim));

        view.kill(victim);

        assert_eq!(tracker.current_target(ORIGIN, &view), Some(backup));
        assert!(!tracker.is_tracking(victim));
    }

    #[test]
    fn test_lock_out_of_range_is_dropped() {
        let target = entity(1);
        let mut view = FakeTargets::default().with(target, Vec3::new(1.0, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[target]);
        assert_eq!(tracker.current_target(ORIGIN, &view), Some(target));

        view.place(target, Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(tracker.current_target(ORIGIN, &view), None);
        assert_eq!(tracker.locked(), None);
        // Вне радиуса, но жив: остаётся кандидатом до ProximityEvent::Exited
        assert!(tracker.is_tracking(target));
    }

    #[test]
    fn test_break_lock_keeps_candidates() {
        let target = entity(1);
        let view = FakeTargets::default().with(target, Vec3::new(1.0, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[target]);
        tracker.current_target(ORIGIN, &view);

        tracker.break_lock();

        assert_eq!(tracker.locked(), None);
        assert_eq!(tracker.candidates(), &[target]);
        assert_eq!(tracker.current_target(ORIGIN, &view), Some(target));
    }

    #[test]
    fn test_set_range_never_returns_target_beyond_radius() {
        let targets = [entity(1), entity(2), entity(3)];
        let view = FakeTargets::default()
            .with(targets[0], Vec3::new(1.0, 0.0, 0.0))
            .with(targets[1], Vec3::new(0.0, 0.0, 2.5))
            .with(targets[2], Vec3::new(-4.0, 0.0, 0.0));
        let mut tracker = tracker_with(10.0, &targets);

        for radius in [10.0, 4.0, 3.0, 2.0, 0.5, 6.0] {
            tracker.set_range(radius, ORIGIN, &view);

            if let Some(target) = tracker.current_target(ORIGIN, &view) {
                let distance = view_distance(&view, target);
                assert!(distance <= radius, "radius {} returned target at {}", radius, distance);
            }
        }
    }

    #[test]
    fn test_set_range_clears_lock_outside_new_radius() {
        let target = entity(1);
        let view = FakeTargets::default().with(target, Vec3::new(2.0, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[target]);
        tracker.current_target(ORIGIN, &view);

        tracker.set_range(1.0, ORIGIN, &view);
        assert_eq!(tracker.locked(), None);
        assert_eq!(tracker.range(), 1.0);
    }

    #[test]
    fn test_equal_distance_keeps_first_tracked() {
        let (first, second) = (entity(5), entity(3));
        let view = FakeTargets::default()
            .with(first, Vec3::new(2.0, 0.0, 0.0))
            .with(second, Vec3::new(-2.0, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[first, second]);

        assert_eq!(tracker.refresh(ORIGIN, &view), Some(first));
    }

    #[test]
    fn test_untrack_and_invalidate_clear_lock() {
        let (a, b) = (entity(1), entity(2));
        let view = FakeTargets::default()
            .with(a, Vec3::new(1.0, 0.0, 0.0))
            .with(b, Vec3::new(2.0, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[a, b]);
        assert!(!tracker.track(a)); // дубликат

        tracker.current_target(ORIGIN, &view);
        assert!(tracker.untrack(a));
        assert_eq!(tracker.locked(), None);

        tracker.current_target(ORIGIN, &view);
        tracker.invalidate(b);
        assert_eq!(tracker.locked(), None);
        assert!(tracker.candidates().is_empty());
        assert!(!tracker.untrack(b));
    }

    #[test]
    fn test_despawned_candidate_is_pruned() {
        let target = entity(1);
        let mut view = FakeTargets::default().with(target, Vec3::new(1.0, 0.0, 0.0));
        let mut tracker = tracker_with(3.0, &[target]);

        view.despawn(target);

        assert_eq!(tracker.current_target(ORIGIN, &view), None);
        assert!(tracker.candidates().is_empty());
    }

    fn view_distance(view: &FakeTargets, target: Entity) -> f32 {
        use crate::targeting::TargetView;
        view.position(target).map_or(f32::MAX, |position| position.distance(ORIGIN))
    }
}
