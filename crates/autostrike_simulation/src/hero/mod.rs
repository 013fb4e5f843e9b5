//! Hero module: HeroStateController (Idle / Move / Attack)
//!
//! ECS ответственность:
//! - MoveIntent из RawMoveInput (camera-relative, deadzone)
//! - FSM шаг: targeting query → решение → exit/enter → actuation
//! - Events: HeroStateChanged, HeroAnimation
//!
//! Presentation ответственность:
//! - Писать RawMoveInput (джойстик, yaw камеры)
//! - Слушать HeroAnimation / HeroStateChanged (анимации, UI)

use bevy::prelude::*;

use crate::HeroCoreSet;

pub mod controller;
pub mod events;
pub mod systems;


// Re-export основных типов
pub use controller::{HeroContext, HeroController, HeroOutput, HeroRig};
pub use events::{HeroAnimation, HeroStateChanged};

/// Hero Plugin
///
/// - compute_move_intents в `HeroCoreSet::Input`
/// - drive_heroes в `HeroCoreSet::Behavior`
pub struct HeroPlugin;

impl Plugin for HeroPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HeroStateChanged>()
            .add_event::<HeroAnimation>();

        app.add_systems(
            FixedUpdate,
            (
                systems::compute_move_intents.in_set(HeroCoreSet::Input),
                systems::drive_heroes.in_set(HeroCoreSet::Behavior),
            ),
        );
    }
}
