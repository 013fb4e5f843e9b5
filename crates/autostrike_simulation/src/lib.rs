//! Autostrike Simulation Core
//!
//! Hero behavior core на Bevy 0.16 (headless ECS)
//!
//! Герой автоматически бьёт ближайшего врага, стик движения перебивает атаку:
//! - targeting: proximity кандидаты + lock на ближайшего
//! - combat: cadence, отложенный удар по hit time, version guard
//! - hero: FSM Idle / Move / Attack
//!
//! Presentation layer (движок) пишет `RawMoveInput`, слушает events
//! (`HeroStateChanged`, `HeroAnimation`, `AttackCooldownStarted`, `WeaponEquipped`)
//! и при желании сам исполняет movement/rotation команды.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod clock;
pub mod combat;
pub mod components;
pub mod config;
pub mod equipment;
pub mod hero;
pub mod logger;
pub mod movement;
pub mod targeting;

#[cfg(test)]
mod test_support;

// Re-export базовых типов для удобства
pub use clock::{ClockMode, SimClock};
pub use combat::{
    AttackCooldownStarted, AttackCycle, AttackOutcome, Combat, CombatPlugin, DamageDealt, EntityDied, HitSchedule,
    ScheduledHit,
};
pub use components::*;
pub use config::{HeroTuning, TuningError};
pub use equipment::{
    CycleWeaponIntent, EquipWeaponIntent, EquipmentPlugin, SwitchWeaponIntent, WeaponEquipped,
};
pub use hero::{HeroAnimation, HeroController, HeroPlugin, HeroStateChanged};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
};
pub use movement::MovementPlugin;
pub use targeting::{
    ProximityEvent, ProximitySource, TargetCandidates, TargetInvalidated, TargetTracker, TargetView, TargetingPlugin,
};

/// Фазы тика hero core (FixedUpdate, строго последовательно)
///
/// Clock → Input → Equipment → Targeting → Behavior → Resolution → Actuation
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroCoreSet {
    /// SimClock читается один раз за тик
    Clock,
    /// RawMoveInput → MoveIntent
    Input,
    /// Смена оружия (range / cadence до решения FSM)
    Equipment,
    /// Proximity + invalidation → TargetTracker
    Targeting,
    /// HeroController::step
    Behavior,
    /// Due удары → Health, смерть
    Resolution,
    /// Locomotion / Facing → Transform
    Actuation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                HeroCoreSet::Clock,
                HeroCoreSet::Input,
                HeroCoreSet::Equipment,
                HeroCoreSet::Targeting,
                HeroCoreSet::Behavior,
                HeroCoreSet::Resolution,
                HeroCoreSet::Actuation,
            )
                .chain(),
        );

        // Manual clock, вставленный до plugin, не перетираем
        app.init_resource::<SimClock>()
            .add_systems(FixedUpdate, clock::advance_sim_clock.in_set(HeroCoreSet::Clock));

        app.register_type::<SimClock>()
            .register_type::<Health>()
            .register_type::<Targetable>()
            .register_type::<HeroState>()
            .register_type::<HeroConfig>()
            .register_type::<HeroController>()
            .register_type::<TargetTracker>()
            .register_type::<Combat>()
            .register_type::<Locomotion>()
            .register_type::<Facing>()
            .register_type::<WeaponLoadout>();

        // Подсистемы
        app.add_plugins((
            EquipmentPlugin,
            TargetingPlugin,
            HeroPlugin,
            CombatPlugin,
            MovementPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Hero core уже подключён, часы в ручном режиме: тик = `advance_headless`.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)) // 60Hz FixedUpdate
        .insert_resource(SimClock::manual())
        .add_plugins(SimulationPlugin);

    app
}

/// Один тик hero core: SimClock += dt, затем FixedUpdate
pub fn advance_headless(app: &mut App, dt: f32) {
    app.world_mut().resource_mut::<SimClock>().advance(dt);
    app.world_mut().run_schedule(FixedUpdate);
}

/// Тик hero core на абсолютное время `now` (часы назад не идут)
pub fn advance_headless_to(app: &mut App, now: f32) {
    app.world_mut().resource_mut::<SimClock>().set(now);
    app.world_mut().run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
