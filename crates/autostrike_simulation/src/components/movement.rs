//! Movement компоненты: input intent, movement/rotation contracts
//!
//! Архитектура:
//! - Presentation layer пишет `RawMoveInput` (джойстик + yaw камеры)
//! - `compute_move_intents` превращает его в `MoveIntent` каждый тик
//! - HeroController командует через `MovementExecutor` / `RotationExecutor`
//! - `Locomotion` / `Facing` реализуют контракты headless (двигают Transform).
//!   Engine bridge может читать их команды вместо этого (CharacterBody, NavAgent).

use bevy::prelude::*;

/// Минимальная длина направления, которое считаем ненулевым
const DIRECTION_EPSILON: f32 = 1e-4;

/// Movement contract: Move(direction, strength), Stop(), SetSpeedMultiplier()
pub trait MovementExecutor {
    fn move_along(&mut self, direction: Vec3, strength: f32);
    fn stop(&mut self);
    fn set_speed_multiplier(&mut self, multiplier: f32);
}

/// Rotation contract: FaceDirection(direction), FaceTarget(handle)
pub trait RotationExecutor {
    fn face_direction(&mut self, direction: Vec3);
    fn face_target(&mut self, target: Entity);
}

/// Сырой input от джойстика (пишет presentation layer каждый frame)
///
/// # Coordinate System
/// - `stick.x`: -1.0 (влево) → +1.0 (вправо)
/// - `stick.y`: -1.0 (назад) → +1.0 (вперёд, мир -Z при yaw = 0)
/// - `camera_yaw`: поворот камеры вокруг Y (радианы), input camera-relative
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RawMoveInput {
    pub stick: Vec2,
    pub camera_yaw: f32,
}

impl RawMoveInput {
    pub fn stick(x: f32, y: f32) -> Self {
        Self {
            stick: Vec2::new(x, y),
            camera_yaw: 0.0,
        }
    }
}

/// Movement intent на текущий тик (immutable value, пересчитывается каждый тик)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MoveIntent {
    /// Направление в мире, y всегда 0
    pub world_direction: Vec3,
    /// Сила [0, 1]
    pub strength: f32,
    pub is_moving: bool,
}

impl MoveIntent {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn from_input(input: &RawMoveInput, deadzone: f32) -> Self {
        let stick = input.stick.clamp_length_max(1.0);
        let strength = stick.length();

        let local = Vec3::new(stick.x, 0.0, -stick.y);
        let world = Quat::from_rotation_y(input.camera_yaw) * local;
        let world_direction = Vec3::new(world.x, 0.0, world.z).normalize_or_zero();

        Self {
            world_direction,
            strength,
            is_moving: exceeds_deadzone(world_direction, strength, deadzone),
        }
    }

    /// Intent достаточно сильный, чтобы перебить атаку
    pub fn exceeds_deadzone(&self, deadzone: f32) -> bool {
        exceeds_deadzone(self.world_direction, self.strength, deadzone)
    }
}

fn exceeds_deadzone(direction: Vec3, strength: f32, deadzone: f32) -> bool {
    strength > deadzone && direction.length_squared() > DIRECTION_EPSILON * DIRECTION_EPSILON
}

/// Поворот вокруг Y, при котором forward (-Z) смотрит вдоль `direction`
///
/// None если горизонтальная проекция нулевая.
pub fn yaw_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= DIRECTION_EPSILON * DIRECTION_EPSILON {
        return None;
    }

    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Текущая команда движения
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum LocomotionCommand {
    #[default]
    Stopped,
    Moving { direction: Vec3, strength: f32 },
}

/// Headless movement executor (м/с × multiplier оружия × strength)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    pub base_speed: f32,
    speed_multiplier: f32,
    command: LocomotionCommand,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl Locomotion {
    pub fn new(base_speed: f32) -> Self {
        Self {
            base_speed,
            speed_multiplier: 1.0,
            command: LocomotionCommand::Stopped,
        }
    }

    pub fn command(&self) -> LocomotionCommand {
        self.command
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.command, LocomotionCommand::Moving { .. })
    }

    /// Желаемая скорость (м/с) для текущей команды
    pub fn velocity(&self) -> Vec3 {
        match self.command {
            LocomotionCommand::Stopped => Vec3::ZERO,
            LocomotionCommand::Moving { direction, strength } => {
                direction * self.base_speed * self.speed_multiplier * strength
            }
        }
    }
}

impl MovementExecutor for Locomotion {
    fn move_along(&mut self, direction: Vec3, strength: f32) {
        let direction = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        if direction == Vec3::ZERO {
            self.command = LocomotionCommand::Stopped;
            return;
        }

        self.command = LocomotionCommand::Moving {
            direction,
            strength: strength.clamp(0.0, 1.0),
        };
    }

    fn stop(&mut self) {
        self.command = LocomotionCommand::Stopped;
    }

    fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier.max(0.0);
    }
}

/// Куда смотреть
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum FacingGoal {
    /// Сохраняем текущий поворот
    #[default]
    Keep,
    Direction(Vec3),
    Target(Entity),
}

/// Headless rotation executor (мгновенный yaw к цели)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Facing {
    goal: FacingGoal,
}

impl Facing {
    pub fn goal(&self) -> FacingGoal {
        self.goal
    }
}

impl RotationExecutor for Facing {
    fn face_direction(&mut self, direction: Vec3) {
        if yaw_rotation(direction).is_some() {
            self.goal = FacingGoal::Direction(direction);
        }
    }

    fn face_target(&mut self, target: Entity) {
        self.goal = FacingGoal::Target(target);
    }
}
