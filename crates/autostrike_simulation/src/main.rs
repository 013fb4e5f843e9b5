//! Headless симуляция Autostrike
//!
//! Герой + враги в случайных точках (seeded), скриптованный стик.
//! Переходы FSM и удары печатает logger.

use autostrike_simulation::*;
use bevy::prelude::*;
use rand::Rng;

const TICK_SECONDS: f32 = 1.0 / 60.0;
const TICK_COUNT: u32 = 1200;
const ENEMY_COUNT: usize = 6;

fn main() {
    let seed = 42;
    println!("Starting Autostrike headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    let tuning_path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config/hero.ron");
    let tuning = match HeroTuning::load(tuning_path) {
        Ok(tuning) => tuning,
        Err(error) => {
            log_error(&format!("{} (using built-in tuning)", error));
            HeroTuning::default()
        }
    };

    let hero = app
        .world_mut()
        .spawn((tuning.hero_bundle(), Transform::default()))
        .id();

    let positions: Vec<Vec3> = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (0..ENEMY_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.rng.gen_range(-8.0..8.0),
                    0.0,
                    rng.rng.gen_range(-8.0..8.0),
                )
            })
            .collect()
    };

    for position in positions {
        app.world_mut().spawn((
            Transform::from_translation(position),
            Targetable::default(),
            Health::new(60),
        ));
    }

    app.insert_resource(tuning);

    for tick in 0..TICK_COUNT {
        if let Some(mut input) = app.world_mut().get_mut::<RawMoveInput>(hero) {
            input.stick = scripted_stick(tick);
        }

        // Смена оружия посреди прогона
        if tick == 600 {
            app.world_mut().send_event(CycleWeaponIntent { hero });
        }

        advance_headless(&mut app, TICK_SECONDS);

        if tick % 120 == 0 {
            report(&mut app, hero, tick);
        }
    }

    report(&mut app, hero, TICK_COUNT);
    println!("Simulation complete!");
}

/// Стоим → идём вправо → стоим → вперёд → стоим → назад-влево
fn scripted_stick(tick: u32) -> Vec2 {
    match tick {
        180..360 => Vec2::new(1.0, 0.0),
        540..720 => Vec2::new(0.0, 1.0),
        900..1080 => Vec2::new(-1.0, -0.5),
        _ => Vec2::ZERO,
    }
}

fn report(app: &mut App, hero: Entity, tick: u32) {
    let world = app.world_mut();

    let (state, position, weapon) = {
        let mut heroes = world.query::<(&HeroState, &Transform, &Combat)>();
        match heroes.get(world, hero) {
            Ok((state, transform, combat)) => (
                *state,
                transform.translation,
                combat.weapon().map(|weapon| weapon.name.clone()).unwrap_or_default(),
            ),
            Err(_) => return,
        }
    };

    let mut enemies = world.query_filtered::<&Health, With<Targetable>>();
    let alive = enemies.iter(world).filter(|health| health.is_alive()).count();
    let remaining: u32 = enemies.iter(world).map(|health| health.current).sum();

    println!(
        "Tick {}: hero {:?} at ({:.1}, {:.1}) with {}, enemies alive {}/{} (hp {})",
        tick, state, position.x, position.z, weapon, alive, ENEMY_COUNT, remaining
    );
}
