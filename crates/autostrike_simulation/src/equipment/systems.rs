//! Equipment system implementations
//!
//! # Systems
//!
//! - `init_hero_equipment`: новый герой → base speed, detection range, слот 0
//! - `process_weapon_intents`: Equip / Switch / Cycle intents
//!
//! Экипировка = профиль в Combat (замах отменяется), targeting range =
//! attack_range, speed multiplier в Locomotion.

use bevy::prelude::*;

use crate::combat::Combat;
use crate::components::{Hero, HeroConfig, Locomotion, MovementExecutor, WeaponLoadout, WeaponProfile};
use crate::equipment::events::*;
use crate::logger;
use crate::targeting::{TargetCandidates, TargetTracker, TargetView};

type EquipmentQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Transform,
        &'static mut WeaponLoadout,
        &'static mut Combat,
        &'static mut TargetTracker,
        &'static mut Locomotion,
    ),
>;

/// Что экипировать
enum WeaponRequest {
    Profile(WeaponProfile),
    Slot(usize),
    Next,
}

/// Установить профиль во все сервисы героя
pub fn install_weapon<V: TargetView>(
    profile: &WeaponProfile,
    origin: Vec3,
    view: &V,
    combat: &mut Combat,
    tracker: &mut TargetTracker,
    movement: &mut impl MovementExecutor,
) {
    combat.set_weapon(profile.clone());
    tracker.set_range(profile.attack_range, origin, view);
    movement.set_speed_multiplier(profile.move_speed_multiplier);
}

/// Первичная настройка героя при спавне
///
/// Оружие, выданное напрямую (`Combat::with_weapon`), приоритетнее слота 0.
pub fn init_hero_equipment(
    mut heroes: Query<
        (
            Entity,
            &Transform,
            &HeroConfig,
            &mut WeaponLoadout,
            &mut Combat,
            &mut TargetTracker,
            &mut Locomotion,
        ),
        Added<Hero>,
    >,
    view: TargetCandidates,
    mut equipped_events: EventWriter<WeaponEquipped>,
) {
    for (hero, transform, config, mut loadout, mut combat, mut tracker, mut locomotion) in heroes.iter_mut() {
        locomotion.base_speed = config.base_move_speed;
        tracker.set_range(config.detection_range, transform.translation, &view);

        let (profile, slot) = match combat.weapon().cloned() {
            Some(profile) => (profile, None),
            None => match loadout.select(0).cloned() {
                Some(profile) => (profile, Some(0)),
                None => {
                    logger::log_warning(&format!("Hero {:?} spawned with empty loadout (unarmed)", hero));
                    continue;
                }
            },
        };

        install_weapon(
            &profile,
            transform.translation,
            &view,
            &mut combat,
            &mut tracker,
            &mut *locomotion,
        );

        logger::log(&format!("✅ Hero {:?} equipped {} (slot {:?})", hero, profile.name, slot));
        equipped_events.write(WeaponEquipped {
            hero,
            weapon: profile.name,
            slot,
        });
    }
}

/// Process weapon intents (Equip → Switch → Cycle)
pub fn process_weapon_intents(
    mut equip_events: EventReader<EquipWeaponIntent>,
    mut switch_events: EventReader<SwitchWeaponIntent>,
    mut cycle_events: EventReader<CycleWeaponIntent>,
    mut heroes: EquipmentQuery,
    view: TargetCandidates,
    mut equipped_events: EventWriter<WeaponEquipped>,
) {
    for intent in equip_events.read() {
        let request = WeaponRequest::Profile(intent.profile.clone());
        equip(intent.hero, request, &mut heroes, &view, &mut equipped_events);
    }

    for intent in switch_events.read() {
        let request = WeaponRequest::Slot(intent.slot);
        equip(intent.hero, request, &mut heroes, &view, &mut equipped_events);
    }

    for intent in cycle_events.read() {
        equip(intent.hero, WeaponRequest::Next, &mut heroes, &view, &mut equipped_events);
    }
}

fn equip(
    hero: Entity,
    request: WeaponRequest,
    heroes: &mut EquipmentQuery,
    view: &TargetCandidates,
    equipped_events: &mut EventWriter<WeaponEquipped>,
) {
    let Ok((transform, mut loadout, mut combat, mut tracker, mut locomotion)) = heroes.get_mut(hero) else {
        logger::log_error(&format!("Entity {:?} missing WeaponLoadout/Combat", hero));
        return;
    };

    let slot = match request {
        WeaponRequest::Profile(_) => None,
        WeaponRequest::Slot(slot) => Some(slot),
        WeaponRequest::Next => match loadout.next_slot() {
            Some(slot) => Some(slot),
            None => {
                logger::log_error(&format!("Hero {:?}: empty loadout, nothing to cycle", hero));
                return;
            }
        },
    };

    let profile = match (request, slot) {
        (WeaponRequest::Profile(profile), _) => {
            // Слот loadout больше не в руках: следующий Switch на него должен сработать
            loadout.clear_active();
            profile
        }
        (_, Some(slot)) => {
            // Уже в руках: замах не сбиваем
            if loadout.active_slot() == Some(slot) {
                return;
            }

            match loadout.select(slot).cloned() {
                Some(profile) => profile,
                None => {
                    logger::log_error(&format!("Hero {:?}: loadout slot {} is empty", hero, slot));
                    return;
                }
            }
        }
        (_, None) => return,
    };

    install_weapon(
        &profile,
        transform.translation,
        view,
        &mut combat,
        &mut tracker,
        &mut *locomotion,
    );

    logger::log(&format!("✅ Hero {:?} equipped {} (slot {:?})", hero, profile.name, slot));
    equipped_events.write(WeaponEquipped {
        hero,
        weapon: profile.name,
        slot,
    });
}
