//! Game settings and per-level tables
//!
//! Loaded once from `game.json` before the first frame. Every per-level
//! table is indexed by `level - 1` and must cover every level.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Failure to produce a usable settings record
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    NoLevels,
    EmptyHazardValues,
    TableLength {
        table: &'static str,
        expected: usize,
        actual: usize,
    },
    ZeroValue { table: &'static str, level: usize },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings {}: {}", path.display(), source)
            }
            Self::Parse(err) => write!(f, "malformed settings: {}", err),
            Self::NoLevels => write!(f, "settings define no levels"),
            Self::EmptyHazardValues => write!(f, "hazard value pool is empty"),
            Self::TableLength {
                table,
                expected,
                actual,
            } => write!(
                f,
                "table `{}` has {} entries, expected {}",
                table, actual, expected
            ),
            Self::ZeroValue { table, level } => {
                write!(f, "table `{}` has a zero entry for level {}", table, level)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Parsed game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,

    // === Per-level tables ===
    /// Hazards spawned per level
    pub level_hazards: Vec<u32>,
    pub player_projectile_speeds: Vec<f32>,
    pub player_projectile_max_ages: Vec<u32>,
    /// Live player projectile cap per level
    pub max_player_projectiles: Vec<u32>,
    pub hazard_projectile_speeds: Vec<f32>,
    pub hazard_projectile_max_ages: Vec<u32>,
    /// Shield frames at session start
    pub player_shields: Vec<u32>,
    pub player_energies: Vec<u32>,

    // === Flat tables ===
    /// Pool hazard values are drawn from
    pub hazard_values: Vec<u32>,
    /// Hazard diameter at zero energy
    pub hazard_min_size: f32,
    /// Ship hull width and height
    #[serde(default = "default_ship_size")]
    pub ship_size: [f32; 2],

    // === Front end ===
    #[serde(default = "default_pause_key")]
    pub pause_key: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub sprites: Vec<String>,
    #[serde(default)]
    pub backgrounds: Vec<String>,
    /// Sound files in cue order (see `audio::SoundCue::asset_index`)
    #[serde(default)]
    pub sounds: Vec<String>,
}

fn default_ship_size() -> [f32; 2] {
    [64.0, 48.0]
}

fn default_pause_key() -> String {
    "p".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "Minefield".to_string(),
            description: "Clear the mines before they clear you".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),

            level_hazards: vec![5, 8, 12, 16, 20],
            player_projectile_speeds: vec![8.0, 8.0, 9.0, 9.0, 10.0],
            player_projectile_max_ages: vec![90, 90, 80, 80, 70],
            max_player_projectiles: vec![3, 3, 4, 4, 5],
            hazard_projectile_speeds: vec![3.0, 4.0, 5.0, 6.0, 6.0],
            hazard_projectile_max_ages: vec![120, 120, 140, 160, 180],
            player_shields: vec![300, 300, 240, 180, 120],
            player_energies: vec![5, 5, 5, 5, 5],

            hazard_values: vec![1, 2, 3, 5, 7],
            hazard_min_size: 24.0,
            ship_size: default_ship_size(),

            pause_key: default_pause_key(),
            debug: false,
            sprites: Vec::new(),
            backgrounds: Vec::new(),
            sounds: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings \"{}\" from {} ({} levels)",
            settings.name,
            path.display(),
            settings.level_count()
        );
        Ok(settings)
    }

    /// Check that every table covers every level
    pub fn validate(&self) -> Result<(), SettingsError> {
        let levels = self.level_count();
        if levels == 0 {
            return Err(SettingsError::NoLevels);
        }
        if self.hazard_values.is_empty() {
            return Err(SettingsError::EmptyHazardValues);
        }

        let lengths = [
            ("playerProjectileSpeeds", self.player_projectile_speeds.len()),
            ("playerProjectileMaxAges", self.player_projectile_max_ages.len()),
            ("maxPlayerProjectiles", self.max_player_projectiles.len()),
            ("hazardProjectileSpeeds", self.hazard_projectile_speeds.len()),
            ("hazardProjectileMaxAges", self.hazard_projectile_max_ages.len()),
            ("playerShields", self.player_shields.len()),
            ("playerEnergies", self.player_energies.len()),
        ];
        for (table, actual) in lengths {
            if actual < levels {
                return Err(SettingsError::TableLength {
                    table,
                    expected: levels,
                    actual,
                });
            }
        }

        let nonzero = [
            ("levelHazards", &self.level_hazards),
            ("playerEnergies", &self.player_energies),
        ];
        for (table, values) in nonzero {
            if let Some(level) = values.iter().position(|&v| v == 0) {
                return Err(SettingsError::ZeroValue {
                    table,
                    level: level + 1,
                });
            }
        }

        Ok(())
    }

    /// Number of playable levels
    pub fn level_count(&self) -> usize {
        self.level_hazards.len()
    }

    /// Clamp a requested level into `1..=level_count`
    pub fn clamp_level(&self, level: u32) -> u32 {
        let max = self.level_count().max(1) as u32;
        let clamped = level.clamp(1, max);
        if clamped != level {
            log::warn!("Level {} out of range, using {}", level, clamped);
        }
        clamped
    }

    /// Resolve the tuning for a level (clamped into range)
    ///
    /// A table too short for the level falls back to its last entry, or to
    /// the built-in first-level value when empty.
    pub fn level(&self, level: u32) -> LevelTuning {
        let level = self.clamp_level(level);
        let i = (level - 1) as usize;
        let min_hazard_value = self.hazard_values.iter().copied().min().unwrap_or(1);
        let max_hazard_value = self.hazard_values.iter().copied().max().unwrap_or(1);

        LevelTuning {
            level,
            hazard_count: entry("levelHazards", &self.level_hazards, i, 5),
            hazard_values: self.hazard_values.clone(),
            min_hazard_value,
            max_hazard_value,
            hazard_min_size: self.hazard_min_size,
            player_projectile_speed: entry(
                "playerProjectileSpeeds",
                &self.player_projectile_speeds,
                i,
                8.0,
            ),
            player_projectile_max_age: entry(
                "playerProjectileMaxAges",
                &self.player_projectile_max_ages,
                i,
                90,
            ),
            max_player_projectiles: entry(
                "maxPlayerProjectiles",
                &self.max_player_projectiles,
                i,
                3,
            ),
            hazard_projectile_speed: entry(
                "hazardProjectileSpeeds",
                &self.hazard_projectile_speeds,
                i,
                3.0,
            ),
            hazard_projectile_max_age: entry(
                "hazardProjectileMaxAges",
                &self.hazard_projectile_max_ages,
                i,
                120,
            ),
            player_shield: entry("playerShields", &self.player_shields, i, 300),
            player_energy: entry("playerEnergies", &self.player_energies, i, 5),
            ship_size: self.ship_size,
        }
    }
}

fn entry<T: Copy>(table: &'static str, values: &[T], i: usize, fallback: T) -> T {
    if let Some(&v) = values.get(i) {
        return v;
    }
    log::warn!("Table `{}` has no entry for level {}", table, i + 1);
    values.last().copied().unwrap_or(fallback)
}

/// Tables resolved for a single level; immutable for the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTuning {
    pub level: u32,
    pub hazard_count: u32,
    pub hazard_values: Vec<u32>,
    pub min_hazard_value: u32,
    pub max_hazard_value: u32,
    pub hazard_min_size: f32,
    pub player_projectile_speed: f32,
    pub player_projectile_max_age: u32,
    pub max_player_projectiles: u32,
    pub hazard_projectile_speed: f32,
    pub hazard_projectile_max_age: u32,
    pub player_shield: u32,
    pub player_energy: u32,
    pub ship_size: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_clamp_level() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_level(0), 1);
        assert_eq!(settings.clamp_level(3), 3);
        assert_eq!(settings.clamp_level(99), 5);
    }

    #[test]
    fn test_level_resolves_tables() {
        let settings = Settings::default();
        let tuning = settings.level(2);
        assert_eq!(tuning.level, 2);
        assert_eq!(tuning.hazard_count, 8);
        assert_eq!(tuning.min_hazard_value, 1);
        assert_eq!(tuning.max_hazard_value, 7);
        assert_eq!(tuning.player_shield, 300);
    }

    #[test]
    fn test_short_table_rejected() {
        let mut settings = Settings::default();
        settings.player_shields.truncate(2);
        match settings.validate() {
            Err(SettingsError::TableLength {
                table,
                expected,
                actual,
            }) => {
                assert_eq!(table, "playerShields");
                assert_eq!(expected, 5);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unvalidated_short_tables_fall_back() {
        let mut settings = Settings::default();
        settings.player_shields.truncate(2);
        settings.player_energies.clear();
        settings.hazard_values.clear();

        let tuning = settings.level(4);
        assert_eq!(tuning.level, 4);
        assert_eq!(tuning.hazard_count, 16);
        // last entry of the short table
        assert_eq!(tuning.player_shield, 300);
        assert_eq!(tuning.player_energy, 5);
        assert_eq!(tuning.min_hazard_value, 1);
        assert_eq!(tuning.max_hazard_value, 1);
    }

    #[test]
    fn test_empty_pool_rejected() {
        let mut settings = Settings::default();
        settings.hazard_values.clear();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::EmptyHazardValues)
        ));
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"{
            "name": "Test",
            "levelHazards": [1],
            "playerProjectileSpeeds": [5.0],
            "playerProjectileMaxAges": [10],
            "maxPlayerProjectiles": [2],
            "hazardProjectileSpeeds": [3.0],
            "hazardProjectileMaxAges": [20],
            "playerShields": [10],
            "playerEnergies": [5],
            "hazardValues": [1, 3],
            "hazardMinSize": 20.0
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.level_count(), 1);
        assert_eq!(settings.pause_key, "p");
        assert_eq!(settings.ship_size, [64.0, 48.0]);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
