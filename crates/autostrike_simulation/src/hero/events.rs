//! Hero events: state change + animation triggers для presentation

use bevy::prelude::*;

use crate::components::HeroState;

/// Событие: HeroController сменил состояние (после exit/enter хуков)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroStateChanged {
    pub hero: Entity,
    pub previous: HeroState,
    pub state: HeroState,
}

/// Animation collaborator (AnimationTree / Animator слушает)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum HeroAnimation {
    /// Trigger клипа атаки, playback speed подогнан под cooldown
    Attack { hero: Entity, playback_speed: f32 },

    /// Blend locomotion (0 = стоим, 1 = полный бег)
    Locomotion { hero: Entity, amount: f32 },
}
