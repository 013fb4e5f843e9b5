//! Combat systems (`HeroCoreSet::Resolution`)

use std::collections::HashSet;

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::combat::{Combat, DamageDealt, EntityDied, HitSchedule};
use crate::components::{Damageable, Dead, Health, Targetable};
use crate::logger;
use crate::targeting::{TargetCandidates, TargetTracker};

/// Система: применяем удары, чей hit time наступил
///
/// 1. Забираем due удары из HitSchedule
/// 2. `Combat::claim_hit`: version/cycle guard + валидность snapshot цели
/// 3. Резолвим cached damage receiver (нет receiver → удар пропущен,
///    warning один раз на цель)
/// 4. Применяем damage, генерируем DamageDealt / EntityDied
pub fn resolve_scheduled_hits(
    clock: Res<SimClock>,
    mut schedule: ResMut<HitSchedule>,
    mut attackers: Query<(&Transform, &TargetTracker, &mut Combat)>,
    view: TargetCandidates,
    mut receivers: Query<&mut Health>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut reported_targets: Local<HashSet<Entity>>,
) {
    for hit in schedule.take_due(clock.now()) {
        // Атакующий исчез → удар пропадает вместе с ним
        let Ok((transform, tracker, mut combat)) = attackers.get_mut(hit.attacker) else {
            continue;
        };

        if !combat.claim_hit(&hit, tracker, transform.translation, &view) {
            continue;
        }

        // Цель без receiver уже залогирована в cache_damage_receivers
        let Some(receiver) = view.damage_receiver(hit.target) else {
            continue;
        };

        let Ok(mut health) = receivers.get_mut(receiver) else {
            if reported_targets.insert(hit.target) {
                logger::log_warning(&format!(
                    "Hit on {:?} dropped: receiver {:?} has no Health",
                    hit.target, receiver
                ));
            }
            continue;
        };

        let was_alive = health.is_alive();
        let applied = health.apply_damage(hit.damage);
        let target_died = was_alive && !health.is_alive();

        damage_dealt_events.write(DamageDealt {
            attacker: hit.attacker,
            target: hit.target,
            receiver,
            damage: applied,
            target_died,
        });

        logger::log(&format!(
            "⚔️ {:?} hit {:?} for {} (hp {}/{})",
            hit.attacker, hit.target, applied, health.current, health.max
        ));

        if target_died {
            entity_died_events.write(EntityDied {
                entity: receiver,
                killer: Some(hit.attacker),
            });
        }
    }
}

/// Система: Dead marker на нулевом Health
///
/// Targetable цели (сама entity или hurtbox child с этим receiver)
/// выключаются, дальше их подхватывает `broadcast_target_invalidation`.
pub fn mark_dead(
    mut commands: Commands,
    dying: Query<(Entity, &Health), (Changed<Health>, Without<Dead>)>,
    mut targetables: Query<(Entity, &mut Targetable)>,
) {
    for (entity, health) in dying.iter() {
        if health.is_alive() {
            continue;
        }

        commands.entity(entity).insert(Dead);

        for (_, mut targetable) in targetables
            .iter_mut()
            .filter(|(target, targetable)| *target == entity || targetable.damage_receiver() == Some(entity))
        {
            targetable.deactivate();
        }

        logger::log_info(&format!("💀 {:?} died", entity));
    }
}
