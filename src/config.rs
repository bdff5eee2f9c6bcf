//! Runtime configuration, loaded from an optional JSON file.

use crate::tracking::{CameraController, DetectedPlane, PlaneFilter};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub center: [f32; 3],
    pub half_extents: [f32; 2],
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 0.0],
            half_extents: [3.0, 3.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub fov_y_deg: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.5, -2.0],
            yaw_deg: 90.0,
            pitch_deg: -35.0,
            fov_y_deg: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Noun used in labels and object names ("Plant" gives "Modifying Plant - 3").
    pub object_noun: String,
    pub default_scale: f32,
    pub scale_range: [f32; 2],
    pub rotation_range: [f32; 2],
    pub scale_step: f32,
    pub rotation_step: f32,
    pub plane_filter: PlaneFilter,
    pub planes: Vec<PlaneConfig>,
    pub camera: CameraConfig,
    pub viewport: [u32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            object_noun: "Plant".to_string(),
            default_scale: 1.0,
            scale_range: [0.1, 2.0],
            rotation_range: [0.0, 360.0],
            scale_step: 0.1,
            rotation_step: 15.0,
            plane_filter: PlaneFilter::WithinPolygon,
            planes: vec![PlaneConfig::default()],
            camera: CameraConfig::default(),
            viewport: [1280, 720],
        }
    }
}

impl AppConfig {
    /// Reads `path` if given, otherwise returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.object_noun.trim().is_empty() {
            return Err(ConfigError::Invalid("object_noun must not be empty".into()));
        }
        if !(self.default_scale.is_finite() && self.default_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default_scale must be positive, got {}",
                self.default_scale
            )));
        }
        check_range("scale_range", self.scale_range)?;
        check_range("rotation_range", self.rotation_range)?;
        if self.scale_range[0] <= 0.0 {
            return Err(ConfigError::Invalid("scale_range must be above zero".into()));
        }
        let fov = self.camera.fov_y_deg;
        if !(fov.is_finite() && fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_y_deg must be within (0, 180), got {fov}"
            )));
        }
        if self.viewport[0] == 0 || self.viewport[1] == 0 {
            return Err(ConfigError::Invalid("viewport must be non-zero".into()));
        }
        Ok(())
    }

    pub fn scale_bounds(&self) -> std::ops::RangeInclusive<f32> {
        self.scale_range[0]..=self.scale_range[1]
    }

    pub fn rotation_bounds(&self) -> std::ops::RangeInclusive<f32> {
        self.rotation_range[0]..=self.rotation_range[1]
    }

    pub fn detected_planes(&self) -> Vec<DetectedPlane> {
        self.planes
            .iter()
            .map(|plane| DetectedPlane {
                center: Vec3::from_array(plane.center),
                half_extents: Vec2::from_array(plane.half_extents),
            })
            .collect()
    }

    pub fn camera_controller(&self) -> CameraController {
        CameraController::new(
            Vec3::from_array(self.camera.position),
            self.camera.yaw_deg.to_radians(),
            self.camera.pitch_deg.to_radians(),
            self.camera.fov_y_deg.to_radians(),
            Vec2::new(self.viewport[0] as f32, self.viewport[1] as f32),
        )
    }
}

fn check_range(name: &str, range: [f32; 2]) -> Result<()> {
    if !(range[0].is_finite() && range[1].is_finite()) || range[0] > range[1] {
        return Err(ConfigError::Invalid(format!(
            "{name} must be an ordered pair of finite values, got {:?}",
            range
        )));
    }
    Ok(())
}
