//! Scene selection, read from the canvas `data-config` attribute.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::ColorParameters;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse scene configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scene configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// Escape-time Julia set whose constant follows the pointer.
    Julia,
    /// Folded-ring animation driven by time only.
    ShaderArt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteKind {
    /// Fixed cosine gradient.
    Cosine,
    /// `sin(t * k)` per channel, `k` from the sliders.
    Tunable,
    /// Like `Tunable`, but the channels advance on their own every frame.
    Cycling,
}

impl PaletteKind {
    /// Whether the r/g/b channels feed the fragment program.
    pub fn uses_channels(self) -> bool {
        !matches!(self, PaletteKind::Cosine)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub scene: Scene,
    pub palette: PaletteKind,
    /// Build the slider and preset widgets.
    pub controls: bool,
    /// Multiplier applied to the escape ratio before the palette lookup.
    pub palette_scale: f32,
    pub initial_colors: ColorParameters,
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::julia()
    }
}

impl SceneConfig {
    /// Julia explorer with the fixed cosine palette and no widgets.
    pub fn julia() -> Self {
        Self {
            scene: Scene::Julia,
            palette: PaletteKind::Cosine,
            controls: false,
            palette_scale: 1.1,
            initial_colors: ColorParameters::default(),
            log_level: "info".to_string(),
        }
    }

    pub fn shader_art() -> Self {
        Self {
            scene: Scene::ShaderArt,
            ..Self::julia()
        }
    }

    /// Julia explorer with slider-driven colors and the preset panel.
    pub fn tunable() -> Self {
        Self {
            palette: PaletteKind::Tunable,
            controls: true,
            palette_scale: 0.95,
            ..Self::julia()
        }
    }

    pub fn cycling() -> Self {
        Self {
            palette: PaletteKind::Cycling,
            palette_scale: 0.95,
            ..Self::julia()
        }
    }

    /// Parses the attribute value. An empty string yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SceneConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.palette_scale.is_finite() || self.palette_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "palette_scale must be a positive number, got {}",
                self.palette_scale
            )));
        }
        if !self.initial_colors.is_in_range() {
            return Err(ConfigError::Invalid(format!(
                "initial_colors must lie within [0, 100], got {:?}",
                self.initial_colors
            )));
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log_level '{}'", self.log_level)))
    }
}
