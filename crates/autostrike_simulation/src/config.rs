//! Hero tuning: HeroConfig + weapon loadout из RON
//!
//! Формат: `assets/config/hero.ron`. Загрузка не паникует, все ошибки
//! возвращаются как `TuningError`, решает вызывающий.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{Hero, HeroConfig, WeaponLoadout, WeaponProfile};

/// Ошибки загрузки/валидации тюнинга
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse hero tuning: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("hero config: {reason}")]
    InvalidHero { reason: &'static str },

    #[error("weapon '{weapon}': {reason}")]
    InvalidWeapon { weapon: String, reason: &'static str },

    #[error("weapon loadout is empty")]
    EmptyLoadout,
}

/// Тюнинг героя: конфиг + набор оружия
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroTuning {
    pub hero: HeroConfig,
    pub loadout: Vec<WeaponProfile>,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            hero: HeroConfig::default(),
            loadout: vec![WeaponProfile::sword(), WeaponProfile::spear(), WeaponProfile::bow()],
        }
    }
}

impl HeroTuning {
    /// Parse + validate
    pub fn from_ron(source: &str) -> Result<Self, TuningError> {
        let tuning: HeroTuning = ron::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_ron(&contents)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let hero = &self.hero;
        if !(0.0..1.0).contains(&hero.move_deadzone) {
            return Err(TuningError::InvalidHero {
                reason: "move_deadzone must be in [0, 1)",
            });
        }
        if hero.base_move_speed < 0.0 {
            return Err(TuningError::InvalidHero {
                reason: "base_move_speed must be non-negative",
            });
        }
        if hero.detection_range <= 0.0 {
            return Err(TuningError::InvalidHero {
                reason: "detection_range must be positive",
            });
        }

        if self.loadout.is_empty() {
            return Err(TuningError::EmptyLoadout);
        }

        for weapon in &self.loadout {
            validate_weapon(weapon)?;
        }

        Ok(())
    }

    /// Loadout компонент для спавна героя
    pub fn weapon_loadout(&self) -> WeaponLoadout {
        WeaponLoadout::new(self.loadout.clone())
    }

    /// Bundle героя: остальное добавят Required Components `Hero`
    pub fn hero_bundle(&self) -> (Hero, HeroConfig, WeaponLoadout) {
        (Hero, self.hero, self.weapon_loadout())
    }
}

fn validate_weapon(weapon: &WeaponProfile) -> Result<(), TuningError> {
    let invalid = |reason: &'static str| TuningError::InvalidWeapon {
        weapon: weapon.name.clone(),
        reason,
    };

    if weapon.attack_cooldown_seconds <= 0.0 {
        return Err(invalid("attack_cooldown_seconds must be positive"));
    }
    if !(0.0..=1.0).contains(&weapon.hit_time_normalized) {
        return Err(invalid("hit_time_normalized must be in [0, 1]"));
    }
    if weapon.attack_range <= 0.0 {
        return Err(invalid("attack_range must be positive"));
    }
    if weapon.move_speed_multiplier <= 0.0 {
        return Err(invalid("move_speed_multiplier must be positive"));
    }

    Ok(())
}
