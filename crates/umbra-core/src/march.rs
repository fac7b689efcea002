//! Sphere tracing
//!
//! A ray starts in the marching state with nothing traveled. Each step samples
//! the scene at the current position and advances by the returned distance,
//! which never overshoots the surface as long as the distance is a true lower
//! bound. The march ends in one of two states:
//!
//! - **hit**: the distance dropped below `hit_epsilon`; the point is shaded
//!   with a single diffuse point light
//! - **exhausted**: `max_iterations` steps passed without a hit; the pixel
//!   gets the background color

use crate::camera::Ray;
use crate::math::{self, Vector3};
use crate::scene::{NormalMode, Scene};
use crate::{Error, Result};
use image::Rgba;
use serde::{Deserialize, Serialize};

/// Tunable constants of the marcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    /// Steps taken before a ray counts as a miss
    pub max_iterations: u32,
    /// Distance below which a sample counts as a surface hit
    pub hit_epsilon: f64,
    /// Offset used for finite-difference normals
    pub normal_epsilon: f64,
    /// Position of the single point light
    pub light_position: Vector3,
    /// Color (0-1) of rays that hit nothing
    pub background: Vector3,
    pub normal_mode: NormalMode,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 256,
            hit_epsilon: 1.25e-9,
            normal_epsilon: 5e-6,
            light_position: Vector3::new(0.0, 5.0, -10.0),
            background: Vector3::ONE,
            normal_mode: NormalMode::UnionGradient,
        }
    }
}

impl MarchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter(
                "max_iterations must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("hit_epsilon", self.hit_epsilon),
            ("normal_epsilon", self.normal_epsilon),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.light_position.is_finite() || !self.background.is_finite() {
            return Err(Error::InvalidParameter(
                "light_position and background must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Surface information recorded when a ray hits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub position: Vector3,
    /// Distance traveled from the ray origin
    pub traveled: f64,
    /// Scene distance at `position` (below the hit epsilon)
    pub distance: f64,
    /// Number of scene queries made
    pub steps: u32,
    /// Flat color of the shape that was hit
    pub color: Vector3,
    /// `None` where the distance gradient is degenerate
    pub normal: Option<Vector3>,
}

/// Terminal state of a march
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    Hit(Hit),
    Exhausted { traveled: f64, steps: u32 },
}

impl MarchOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, MarchOutcome::Hit(_))
    }
}

/// Sphere tracer over a borrowed scene
#[derive(Debug, Clone, Copy)]
pub struct Marcher<'a> {
    scene: &'a Scene,
    config: MarchConfig,
}

impl<'a> Marcher<'a> {
    pub fn new(scene: &'a Scene, config: MarchConfig) -> Self {
        Self { scene, config }
    }

    pub fn config(&self) -> &MarchConfig {
        &self.config
    }

    /// March `ray` until it hits a surface or runs out of steps
    pub fn march(&self, ray: &Ray) -> MarchOutcome {
        let mut traveled = 0.0;
        for step in 0..self.config.max_iterations {
            let position = ray.at(traveled);
            let (distance, color) = self.scene.nearest_surface(position);
            if distance < self.config.hit_epsilon {
                let normal = self.scene.aggregate_normal(
                    position,
                    self.config.normal_epsilon,
                    self.config.normal_mode,
                );
                return MarchOutcome::Hit(Hit {
                    position,
                    traveled,
                    distance,
                    steps: step + 1,
                    color,
                    normal,
                });
            }
            traveled += distance;
        }
        MarchOutcome::Exhausted {
            traveled,
            steps: self.config.max_iterations,
        }
    }

    /// Final pixel color for a march outcome
    pub fn shade(&self, outcome: &MarchOutcome) -> Rgba<u8> {
        match outcome {
            MarchOutcome::Hit(hit) => to_rgba(hit.color * self.diffuse(hit)),
            MarchOutcome::Exhausted { .. } => to_rgba(self.config.background),
        }
    }

    /// March and shade in one call
    pub fn trace(&self, ray: &Ray) -> Rgba<u8> {
        self.shade(&self.march(ray))
    }

    /// Lambert term at a hit; zero when either the normal or the light
    /// direction is undefined
    fn diffuse(&self, hit: &Hit) -> f64 {
        let light = math::normalize(self.config.light_position - hit.position).ok();
        match (hit.normal, light) {
            (Some(n), Some(l)) => math::dot(n, l).max(0.0),
            _ => 0.0,
        }
    }
}

/// Quantize a 0-1 color into an opaque 8-bit pixel
pub fn to_rgba(color: Vector3) -> Rgba<u8> {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
    Rgba([channel(color.x), channel(color.y), channel(color.z), 255])
}
