//! SimClock: единственный источник времени для hero core
//!
//! Все таймауты (cooldown, hit time) хранятся как абсолютные "ready at" метки
//! и сравниваются с `SimClock::now()`. Часы читаются один раз за тик, системы
//! внутри тика видят одно и то же значение.

use bevy::prelude::*;

/// Откуда берётся время
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ClockMode {
    /// Накапливаем `Time<Fixed>` delta (обычный запуск через `app.update()`)
    #[default]
    Fixed,
    /// Время выставляет владелец App (headless runner, тесты)
    Manual,
}

/// Монотонные часы симуляции (секунды)
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct SimClock {
    now: f32,
    delta: f32,
    tick: u64,
    mode: ClockMode,
}

impl SimClock {
    /// Часы под ручное управление (`advance` / `set`)
    pub fn manual() -> Self {
        Self {
            mode: ClockMode::Manual,
            ..Default::default()
        }
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Сдвинуть часы на `dt` секунд (отрицательный dt игнорируется)
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.now += dt;
        self.delta = dt;
        self.tick += 1;
    }

    /// Выставить абсолютное время. Назад часы не идут.
    pub fn set(&mut self, now: f32) {
        let now = now.max(self.now);
        self.delta = now - self.now;
        self.now = now;
        self.tick += 1;
    }
}

/// System: один раз за тик сдвигает SimClock на `Time<Fixed>` delta
pub fn advance_sim_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    if clock.mode == ClockMode::Manual {
        return;
    }

    clock.advance(time.delta_secs());
}
