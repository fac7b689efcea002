//! Rays and the pixel-to-ray mapping

use crate::Result;
use crate::math::{self, Vector3};
use serde::{Deserialize, Serialize};

/// A half-line with a unit-length direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vector3,
    direction: Vector3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// Fails with [`crate::Error::DegenerateVector`] for a zero direction.
    pub fn new(origin: Vector3, direction: Vector3) -> Result<Self> {
        Ok(Self {
            origin,
            direction: math::normalize(direction)?,
        })
    }

    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Point reached after traveling `t` along the ray
    pub fn at(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }
}

/// Maps an image pixel to the ray that samples it
pub trait RayMapping: Send + Sync {
    fn ray(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Ray>;
}

/// Fixed-origin camera fanning rays through a plane `focal_length` ahead.
///
/// Pixel coordinates map linearly onto `[-1, 1]` on both axes; there is no
/// lens or aspect correction. Row 0 looks toward +Y unless `flip_y` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanCamera {
    pub origin: Vector3,
    pub focal_length: f64,
    pub flip_y: bool,
}

impl Default for FanCamera {
    fn default() -> Self {
        Self {
            origin: Vector3::new(0.0, 0.0, -10.0),
            focal_length: 1.0,
            flip_y: false,
        }
    }
}

impl FanCamera {
    pub fn new(origin: Vector3) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    /// Direction through pixel `(x, y)` before normalization
    pub fn direction(&self, x: u32, y: u32, width: u32, height: u32) -> Vector3 {
        let u = f64::from(x) / f64::from(width) * 2.0 - 1.0;
        let v = f64::from(y) / f64::from(height) * 2.0 - 1.0;
        let v = if self.flip_y { v } else { -v };
        Vector3::new(u, v, self.focal_length)
    }
}

impl RayMapping for FanCamera {
    fn ray(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Ray> {
        Ray::new(self.origin, self.direction(x, y, width, height))
    }
}

/// One unit of render work: a pixel and the ray that samples it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelTask {
    pub x: u32,
    pub y: u32,
    pub ray: Ray,
}

impl PixelTask {
    /// Build the task for a row-major pixel index
    pub fn from_index<M: RayMapping + ?Sized>(
        index: usize,
        width: u32,
        height: u32,
        camera: &M,
    ) -> Result<Self> {
        let x = (index % width as usize) as u32;
        let y = (index / width as usize) as u32;
        Ok(Self {
            x,
            y,
            ray: camera.ray(x, y, width, height)?,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::Error;
    use approx::assert_relative_eq;

    #[test]
    fn ray_normalizes_direction() {
        let r = Ray::new(Vector3::ZERO, Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(r.direction().length(), 1.0, epsilon = 1e-12);
        assert!(r.at(5.0).abs_diff_eq(Vector3::new(0.0, 3.0, 4.0), 1e-12));
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(matches!(
            Ray::new(Vector3::ONE, Vector3::ZERO),
            Err(Error::DegenerateVector)
        ));
    }

    #[test]
    fn center_pixel_looks_straight_ahead() {
        let cam = FanCamera::default();
        let r = cam.ray(32, 32, 64, 64).unwrap();
        assert_eq!(r.origin(), Vector3::new(0.0, 0.0, -10.0));
        assert_eq!(r.direction(), Vector3::Z);
    }

    #[test]
    fn top_left_pixel_maps_to_corner() {
        let cam = FanCamera::default();
        assert_eq!(cam.direction(0, 0, 100, 50), Vector3::new(-1.0, 1.0, 1.0));
        let flipped = FanCamera {
            flip_y: true,
            ..FanCamera::default()
        };
        assert_eq!(flipped.direction(0, 0, 100, 50), Vector3::new(-1.0, -1.0, 1.0));
    }

    #[test]
    fn pixel_task_decodes_row_major_index() {
        let cam = FanCamera::default();
        let task = PixelTask::from_index(7 * 10 + 3, 10, 8, &cam).unwrap();
        assert_eq!((task.x, task.y), (3, 7));
        assert_eq!(task.ray, cam.ray(3, 7, 10, 8).unwrap());
    }
}
