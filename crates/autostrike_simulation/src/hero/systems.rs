//! Hero systems
//!
//! - compute_move_intents (`HeroCoreSet::Input`): RawMoveInput → MoveIntent
//! - drive_heroes (`HeroCoreSet::Behavior`): HeroController::step + events

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::combat::{AttackCooldownStarted, Combat, HitSchedule};
use crate::components::{Facing, Hero, HeroConfig, HeroState, Locomotion, MoveIntent, RawMoveInput};
use crate::hero::{HeroAnimation, HeroContext, HeroController, HeroRig, HeroStateChanged};
use crate::logger;
use crate::targeting::{TargetCandidates, TargetTracker};

/// System: пересчёт MoveIntent из сырого input
pub fn compute_move_intents(mut heroes: Query<(&RawMoveInput, &HeroConfig, &mut MoveIntent), With<Hero>>) {
    for (input, config, mut intent) in heroes.iter_mut() {
        intent.set_if_neq(MoveIntent::from_input(input, config.move_deadzone));
    }
}

/// System: один шаг FSM каждого героя
///
/// Начатые атаки планируются в HitSchedule, удар применит
/// `resolve_scheduled_hits` в `HeroCoreSet::Resolution` этого же тика
/// (или позже, по hit time).
pub fn drive_heroes(
    clock: Res<SimClock>,
    mut heroes: Query<
        (
            Entity,
            &Transform,
            &MoveIntent,
            &HeroConfig,
            &mut HeroState,
            &mut HeroController,
            &mut TargetTracker,
            &mut Combat,
            &mut Locomotion,
            &mut Facing,
        ),
        With<Hero>,
    >,
    view: TargetCandidates,
    mut schedule: ResMut<HitSchedule>,
    mut state_events: EventWriter<HeroStateChanged>,
    mut cooldown_events: EventWriter<AttackCooldownStarted>,
    mut animation_events: EventWriter<HeroAnimation>,
) {
    for (
        hero,
        transform,
        intent,
        config,
        mut state,
        mut controller,
        mut tracker,
        mut combat,
        mut locomotion,
        mut facing,
    ) in heroes.iter_mut()
    {
        let ctx = HeroContext {
            now: clock.now(),
            origin: transform.translation,
            view: &view,
        };
        let mut rig = HeroRig {
            tracker: &mut *tracker,
            combat: &mut *combat,
            movement: &mut *locomotion,
            rotation: &mut *facing,
        };

        let output = controller.step(&mut state, intent, config, &ctx, &mut rig);

        if let Some((previous, next)) = output.transition {
            logger::log(&format!("🧭 Hero {:?}: {:?} → {:?}", hero, previous, next));
            state_events.write(HeroStateChanged {
                hero,
                previous,
                state: next,
            });
        }

        if let Some(cycle) = output.attack {
            schedule.schedule(hero, &cycle);
            cooldown_events.write(AttackCooldownStarted {
                hero,
                duration: cycle.cooldown,
            });
            animation_events.write(HeroAnimation::Attack {
                hero,
                playback_speed: cycle.playback_speed,
            });
        }

        if let Some(amount) = output.move_amount {
            animation_events.write(HeroAnimation::Locomotion { hero, amount });
        }
    }
}
