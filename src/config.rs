//! Engine configuration, loaded from TOML with every field defaulted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Full engine configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub minimap: MinimapConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "RayCast".to_string(),
        }
    }
}

/// Grid dimensions and obstacle scatter
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// World units per grid cell
    pub block_size: f32,
    /// Obstacle samples; collisions are skipped, so fewer may land
    pub obstacles: usize,
    /// Fixed RNG seed, entropy when absent
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 101,
            height: 61,
            block_size: 64.0,
            obstacles: 300,
            seed: None,
        }
    }
}

/// Starting pose and controller tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 2],
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    /// Horizontal field of view, degrees
    pub fov: f32,
    pub max_ray_length: f32,
    /// World units per second
    pub move_speed: f32,
    /// Degrees per second
    pub turn_speed: f32,
    /// Scale on the per-pixel mouse offset
    pub mouse_sensitivity: f32,
    pub mouse_look: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [128.0, 128.0],
            yaw: 0.0,
            pitch: 0.0,
            fov: 60.0,
            max_ray_length: 800.0,
            move_speed: 150.0,
            turn_speed: 100.0,
            mouse_sensitivity: 0.1,
            mouse_look: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Shade drives the blue channel only
    #[default]
    Blue,
    /// Shade drives all channels with a cool tint
    Tinted,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Rays per frame; one per pixel column when absent
    pub ray_count: Option<u32>,
    pub wall_height_factor: f32,
    pub shade_min: f32,
    pub shade_max: f32,
    pub color_scheme: ColorScheme,
    pub background: [u8; 3],
    /// Cast columns on the rayon pool
    pub parallel_columns: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ray_count: None,
            wall_height_factor: 100.0,
            shade_min: 50.0,
            shade_max: 255.0,
            color_scheme: ColorScheme::Blue,
            background: [0, 0, 0],
            parallel_columns: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    pub enabled: bool,
    /// Screen pixels per world unit
    pub scale: f32,
    /// Upper bound on ray lines drawn per frame
    pub max_rays: usize,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scale: 0.1,
            max_rays: 64,
        }
    }
}

impl EngineConfig {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(Error::InvalidConfig(msg)) };

        if self.world.width == 0 || self.world.height == 0 {
            return invalid(format!(
                "world size {}x{} must be non-zero",
                self.world.width, self.world.height
            ));
        }
        if !(self.world.block_size > 0.0) {
            return invalid(format!("block_size {} must be positive", self.world.block_size));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return invalid(format!("fov {} must lie in (0, 180)", self.camera.fov));
        }
        if !(self.camera.max_ray_length > 0.0 && self.camera.max_ray_length.is_finite()) {
            return invalid(format!(
                "max_ray_length {} must be positive and finite",
                self.camera.max_ray_length
            ));
        }
        if self.render.ray_count == Some(0) {
            return invalid("ray_count must be at least 1".to_string());
        }
        if self.render.shade_min > self.render.shade_max {
            return invalid(format!(
                "shade_min {} exceeds shade_max {}",
                self.render.shade_min, self.render.shade_max
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window size must be non-zero".to_string());
        }
        Ok(())
    }
}
