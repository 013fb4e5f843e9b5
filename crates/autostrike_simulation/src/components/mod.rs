//! ECS Components для hero core
//!
//! Организация по доменам:
//! - actor: Health, Targetable, Dead (контракт цели)
//! - movement: RawMoveInput, MoveIntent, Locomotion, Facing (movement/rotation contracts)
//! - equipment: WeaponProfile, WeaponLoadout
//! - hero: Hero marker, HeroState, HeroConfig
//!
//! Сервисы с логикой (TargetTracker, Combat, HeroController) живут в своих модулях.

pub mod actor;
pub mod equipment;
pub mod hero;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use equipment::*;
pub use hero::*;
pub use movement::*;
