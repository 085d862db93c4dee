//! TOML-backed level configuration.
//!
//! Every field is optional in the file; missing values fall back to
//! [`LevelConfig::default`]. A minimal file looks like:
//!
//! ```toml
//! width = 12
//! height = 9
//! wall_count = 6
//!
//! [world]
//! scale = 10.0
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de::Error as TomlError;

use crate::planner::{LevelRequest, PlanError, validate};
use crate::world::WorldTransform;

pub const DEFAULT_WIDTH: usize = 20;
pub const DEFAULT_HEIGHT: usize = 15;
pub const DEFAULT_WALL_COUNT: usize = 10;
pub const DEFAULT_ENEMY_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    pub width: usize,
    pub height: usize,
    pub wall_count: usize,
    pub enemy_count: usize,
    pub world: WorldTransform,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            wall_count: DEFAULT_WALL_COUNT,
            enemy_count: DEFAULT_ENEMY_COUNT,
            world: WorldTransform::UNIT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read level config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse level config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: TomlError,
    },
    #[error("level config {} describes an unusable grid", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: PlanError,
    },
}

impl LevelConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        validate(&config.to_request())
            .map_err(|source| ConfigError::Invalid { path: path.to_path_buf(), source })?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TomlError> {
        toml::from_str(content)
    }

    pub fn to_request(&self) -> LevelRequest {
        LevelRequest {
            width: self.width,
            height: self.height,
            wall_count: self.wall_count,
            enemy_count: self.enemy_count,
        }
    }
}
