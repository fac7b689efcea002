//! Render configuration
//!
//! Every field has a default, so a JSON file only needs the values it wants
//! to change:
//!
//! ```json
//! { "width": 1600, "march": { "max_iterations": 512 } }
//! ```

use crate::camera::FanCamera;
use crate::march::MarchConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Image size, worker count, camera and marcher constants for one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Size of the dedicated worker pool; `None` uses rayon's global pool
    pub threads: Option<usize>,
    pub camera: FanCamera,
    pub march: MarchConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            threads: None,
            camera: FanCamera::default(),
            march: MarchConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file, filling missing fields with defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder: set image size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder: set worker count
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Number of pixels (and therefore render tasks)
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidParameter(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.threads == Some(0) {
            return Err(Error::InvalidParameter(
                "thread count must be at least 1".into(),
            ));
        }
        if !self.camera.origin.is_finite() {
            return Err(Error::InvalidParameter("camera origin must be finite".into()));
        }
        let focal_length = self.camera.focal_length;
        if !(focal_length > 0.0 && focal_length.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "focal_length must be positive and finite, got {focal_length}"
            )));
        }
        self.march.validate()
    }
}
