//! HeroController: FSM Idle / Move / Attack поверх targeting + combat
//!
//! Один `step` за тик, порядок фиксирован:
//! 1. отложенный refresh targeting (тик после отпускания стика)
//! 2. has_valid_target → `HeroState::decide`
//! 3. при смене состояния: exit(prev) → enter(next)
//! 4. combat.tick
//! 5. tick текущего состояния (команды movement/rotation executors)
//!
//! Контроллер не знает про ECS: всё приходит через `HeroContext` / `HeroRig`,
//! наружу уходит `HeroOutput` (система превращает его в events).

use bevy::prelude::*;

use crate::combat::{AttackCycle, AttackOutcome, Combat};
use crate::components::{HeroConfig, HeroState, MoveIntent, MovementExecutor, RotationExecutor};
use crate::targeting::{TargetTracker, TargetView};

/// Read-only вход тика
pub struct HeroContext<'a, V: TargetView> {
    pub now: f32,
    /// Позиция героя
    pub origin: Vec3,
    pub view: &'a V,
}

/// Сервисы, которыми командует контроллер
pub struct HeroRig<'a, M: MovementExecutor, R: RotationExecutor> {
    pub tracker: &'a mut TargetTracker,
    pub combat: &'a mut Combat,
    pub movement: &'a mut M,
    pub rotation: &'a mut R,
}

/// Что произошло за тик
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroOutput {
    /// (previous, next), если был переход
    pub transition: Option<(HeroState, HeroState)>,
    /// Начатый цикл атаки (нужно запланировать удар)
    pub attack: Option<AttackCycle>,
    /// Сила movement анимации (0 при выходе из Move)
    pub move_amount: Option<f32>,
}

/// Runtime память FSM героя
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HeroController {
    /// Cached цель для Attack состояния
    attack_target: Option<Entity>,
    /// Intent прошлого тика был движением
    was_moving: bool,
    /// Refresh targeting запланирован на этот тик
    refresh_due: bool,
}

impl HeroController {
    pub fn attack_target(&self) -> Option<Entity> {
        self.attack_target
    }

    pub fn step<V, M, R>(
        &mut self,
        state: &mut HeroState,
        intent: &MoveIntent,
        config: &HeroConfig,
        ctx: &HeroContext<V>,
        rig: &mut HeroRig<M, R>,
    ) -> HeroOutput
    where
        V: TargetView,
        M: MovementExecutor,
        R: RotationExecutor,
    {
        let mut output = HeroOutput::default();

        if self.refresh_due {
            self.refresh_due = false;
            rig.tracker.refresh(ctx.origin, ctx.view);
        }

        // Отпустили стик: пересчёт ближайшего на следующем тике
        let moving = intent.exceeds_deadzone(config.move_deadzone);
        if self.was_moving && !moving {
            self.refresh_due = true;
        }
        self.was_moving = moving;

        let has_valid_target = rig.tracker.has_valid_target(ctx.origin, ctx.view);
        let next = HeroState::decide(intent, has_valid_target, config.move_deadzone);

        if next != *state {
            let previous = *state;
            self.exit(previous, rig, &mut output);
            *state = next;
            self.enter(next, ctx, rig, &mut output);
            output.transition = Some((previous, next));
        }

        rig.combat.tick(ctx.now, rig.tracker, ctx.origin, ctx.view);

        match *state {
            HeroState::Move => self.tick_move(intent, rig, &mut output),
            HeroState::Attack => self.tick_attack(ctx, rig, &mut output),
            HeroState::Idle => self.tick_idle(ctx, rig),
        }

        output
    }

    fn enter<V, M, R>(
        &mut self,
        state: HeroState,
        ctx: &HeroContext<V>,
        rig: &mut HeroRig<M, R>,
        output: &mut HeroOutput,
    ) where
        V: TargetView,
        M: MovementExecutor,
        R: RotationExecutor,
    {
        match state {
            HeroState::Move => {
                rig.combat.cancel_attack();
                rig.tracker.break_lock();
                self.attack_target = None;
            }
            HeroState::Attack => {
                self.attack_target = rig.tracker.current_target(ctx.origin, ctx.view);
                self.try_attack(ctx, rig, output);
            }
            HeroState::Idle => {
                rig.movement.stop();
                self.attack_target = None;
            }
        }
    }

    fn exit<M, R>(&mut self, state: HeroState, rig: &mut HeroRig<M, R>, output: &mut HeroOutput)
    where
        M: MovementExecutor,
        R: RotationExecutor,
    {
        match state {
            HeroState::Move => {
                rig.movement.stop();
                output.move_amount = Some(0.0);
            }
            HeroState::Attack => rig.combat.cancel_attack(),
            HeroState::Idle => {}
        }
    }

    fn tick_move<M, R>(&mut self, intent: &MoveIntent, rig: &mut HeroRig<M, R>, output: &mut HeroOutput)
    where
        M: MovementExecutor,
        R: RotationExecutor,
    {
        rig.movement.move_along(intent.world_direction, intent.strength);
        rig.rotation.face_direction(intent.world_direction);
        output.move_amount = Some(intent.strength);
    }

    fn tick_attack<V, M, R>(&mut self, ctx: &HeroContext<V>, rig: &mut HeroRig<M, R>, output: &mut HeroOutput)
    where
        V: TargetView,
        M: MovementExecutor,
        R: RotationExecutor,
    {
        // Между замахами следуем за lock targeting
        if !rig.combat.is_attacking() {
            self.attack_target = rig.tracker.current_target(ctx.origin, ctx.view);
        }

        self.try_attack(ctx, rig, output);

        let facing = rig.combat.target().or(self.attack_target);
        if let Some(target) = facing {
            rig.rotation.face_target(target);
        }
    }

    fn tick_idle<V, M, R>(&mut self, ctx: &HeroContext<V>, rig: &mut HeroRig<M, R>)
    where
        V: TargetView,
        M: MovementExecutor,
        R: RotationExecutor,
    {
        rig.movement.stop();

        let visible = rig
            .tracker
            .locked()
            .filter(|&target| rig.tracker.is_valid(target, ctx.origin, ctx.view));
        if let Some(target) = visible {
            rig.rotation.face_target(target);
        }
    }

    fn try_attack<V, M, R>(&mut self, ctx: &HeroContext<V>, rig: &mut HeroRig<M, R>, output: &mut HeroOutput)
    where
        V: TargetView,
        M: MovementExecutor,
        R: RotationExecutor,
    {
        let outcome =
            rig.combat
                .try_start_attack(ctx.now, self.attack_target, rig.tracker, ctx.origin, ctx.view);

        if let AttackOutcome::Started(cycle) = outcome {
            self.attack_target = Some(cycle.target);
            output.attack = Some(cycle);
        }
    }
}
