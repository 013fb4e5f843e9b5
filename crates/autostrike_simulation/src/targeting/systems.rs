//! Targeting systems (порядок внутри `HeroCoreSet::Targeting`):
//! 1. cache_damage_receivers: один раз на новую цель
//! 2. broadcast_target_invalidation: смерть / выключение / деспавн → TargetInvalidated
//! 3. sense_proximity: headless proximity volume (только ProximitySource::Headless)
//! 4. track_proximity: применяет enter/exit/invalidation к трекерам

use bevy::prelude::*;

use crate::components::{Dead, Health, Targetable};
use crate::logger;
use crate::targeting::{ProximityEvent, TargetInvalidated, TargetTracker};

/// System: кэшируем damage receiver для новых целей
///
/// Receiver = сама цель, если у неё есть Health, иначе parent с Health
/// (hurtbox child). Без receiver цель остаётся выбираемой, урон по ней
/// логируется и пропускается.
pub fn cache_damage_receivers(
    mut targets: Query<(Entity, &mut Targetable, Has<Health>, Option<&ChildOf>), Added<Targetable>>,
    damageable: Query<(), With<Health>>,
) {
    for (entity, mut targetable, has_health, child_of) in targets.iter_mut() {
        if targetable.damage_receiver().is_some() {
            continue;
        }

        if has_health {
            targetable.cache_damage_receiver(entity);
            continue;
        }

        let parent = child_of
            .map(ChildOf::parent)
            .filter(|&parent| damageable.contains(parent));

        match parent {
            Some(parent) => targetable.cache_damage_receiver(parent),
            None => logger::log_warning(&format!(
                "Targetable {:?} has no Health on self or parent (hits will be dropped)",
                entity
            )),
        }
    }
}

/// System: рассылаем TargetInvalidated
pub fn broadcast_target_invalidation(
    changed: Query<(Entity, &Targetable, Has<Dead>), Or<(Changed<Targetable>, Added<Dead>)>>,
    mut removed: RemovedComponents<Targetable>,
    mut events: EventWriter<TargetInvalidated>,
) {
    for (entity, targetable, dead) in changed.iter() {
        if !targetable.is_targetable(dead) {
            events.write(TargetInvalidated { target: entity });
        }
    }

    for entity in removed.read() {
        events.write(TargetInvalidated { target: entity });
    }
}

/// System: headless proximity volume
///
/// Сфера радиусом `TargetTracker::range` вокруг героя. Вход генерируется только
/// для валидных целей, выход для любых отслеживаемых.
pub fn sense_proximity(
    observers: Query<(Entity, &Transform, &TargetTracker)>,
    targets: Query<(Entity, &Transform, &Targetable, Has<Dead>)>,
    mut events: EventWriter<ProximityEvent>,
) {
    for (observer, transform, tracker) in observers.iter() {
        let origin = transform.translation;
        let range_squared = tracker.range() * tracker.range();

        for (target, target_transform, targetable, dead) in targets.iter() {
            if target == observer {
                continue;
            }

            let inside = target_transform.translation.distance_squared(origin) <= range_squared;
            let tracked = tracker.is_tracking(target);

            if inside && !tracked && targetable.is_targetable(dead) {
                events.write(ProximityEvent::Entered { observer, target });
            } else if !inside && tracked {
                events.write(ProximityEvent::Exited { observer, target });
            }
        }
    }
}

/// System: применяем proximity + invalidation события к трекерам
pub fn track_proximity(
    mut proximity: EventReader<ProximityEvent>,
    mut invalidated: EventReader<TargetInvalidated>,
    mut trackers: Query<&mut TargetTracker>,
) {
    for event in proximity.read() {
        match *event {
            ProximityEvent::Entered { observer, target } => {
                if let Ok(mut tracker) = trackers.get_mut(observer) {
                    if tracker.track(target) {
                        logger::log(&format!("🎯 {:?} tracks {:?}", observer, target));
                    }
                }
            }
            ProximityEvent::Exited { observer, target } => {
                if let Ok(mut tracker) = trackers.get_mut(observer) {
                    if tracker.untrack(target) {
                        logger::log(&format!("{:?} lost {:?} (left volume)", observer, target));
                    }
                }
            }
        }
    }

    for event in invalidated.read() {
        for mut tracker in trackers.iter_mut() {
            if tracker.is_tracking(event.target) || tracker.locked() == Some(event.target) {
                tracker.invalidate(event.target);
            }
        }
    }
}
