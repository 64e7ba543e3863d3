//=========================================================================
// Engine Configuration
//=========================================================================
//
// User settings read once at startup. Every field has a default, so a
// config file only lists what it overrides:
//
// ```ron
// (
//     render_system: OpenGl,
//     window_title: "Demo",
//     tick_rate: 60,
//     verbose: true,
// )
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::error::ConfigError;

//=== RenderSystem ========================================================

/// Render API the render backend should bring up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderSystem {
    #[default]
    OpenGl,
    OpenGlEs,
    Direct3D9,
    Direct3D10,
    Direct3D11,
    Unknown,
}

//=== EngineConfig ========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub render_system: RenderSystem,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub fullscreen: bool,

    /// Fixed logic ticks per second.
    pub tick_rate: u32,
    /// Most ticks run in one frame; `None` uses `max(tick_rate / 5, 1)`.
    pub max_frame_skip: Option<u32>,
    /// Capacity of the input event queue.
    pub input_capacity: usize,

    pub enable_logging: bool,
    /// Debug-level logging instead of info.
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_system: RenderSystem::OpenGl,
            window_title: "GameKit".to_string(),
            window_width: 800,
            window_height: 600,
            fullscreen: false,
            tick_rate: 60,
            max_frame_skip: None,
            input_capacity: 128,
            enable_logging: true,
            verbose: false,
            log_file: None,
        }
    }
}

impl EngineConfig {
    //--- Loading ----------------------------------------------------------

    /// Reads and validates a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        ron::ser::to_string_pretty(self, pretty).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    //--- Validation -------------------------------------------------------

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if self.max_frame_skip == Some(0) {
            return Err(ConfigError::Invalid("max_frame_skip must be positive".into()));
        }
        if self.input_capacity == 0 {
            return Err(ConfigError::Invalid("input_capacity must be positive".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} is empty",
                self.window_width, self.window_height
            )));
        }
        Ok(())
    }

    /// Frame skip cap in effect for this config.
    pub fn frame_skip(&self) -> u32 {
        self.max_frame_skip.unwrap_or((self.tick_rate / 5).max(1))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
