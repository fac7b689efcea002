//! # Umbra Core
//!
//! Sphere tracing of scenes built from signed distance functions.
//!
//! A scene is an ordered list of [`Shape`](shape::Shape)s. Each pixel of the
//! output image becomes a ray that steps forward by the scene's distance
//! estimate until it touches a surface (shaded with one diffuse point light)
//! or runs out of steps (background color). Pixels are independent and are
//! rendered in parallel.
//!
//! ## Quick Start
//!
//! ```rust
//! use umbra_core::prelude::*;
//!
//! let scene = Scene::new(vec![
//!     sphere(1.5).with_color(Vector3::new(0.1, 0.25, 0.75)),
//!     torus(3.0, 0.25).twist(0.3),
//! ])?;
//!
//! let config = RenderConfig::default().with_size(64, 64);
//! let image = render(&scene, &config.camera, &config)?;
//! assert_eq!(image.dimensions(), (64, 64));
//! # Ok::<(), umbra_core::Error>(())
//! ```
//!
//! ## Units and Conventions
//!
//! - **Precision**: all distances and vectors are `f64`
//! - **Angles**: radians; rotations apply Z, then Y, then X
//! - **Coordinate system**: right-handed, Y-up; the default camera sits at
//!   `(0, 0, -10)` looking down +Z
//! - **Colors**: 0-1 RGB triples, quantized to 8-bit RGBA on output

pub mod camera;
pub mod config;
pub mod march;
pub mod math;
pub mod render;
pub mod scene;
pub mod shape;
pub mod warp;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Shapes
    pub use crate::shape::{
        Pose, Primitive, Shape, box3, cube, fractal, fractal_with, sphere, torus,
    };
    pub use crate::warp::{DistanceOp, Warp};

    // Scene and marching
    pub use crate::march::{Hit, MarchConfig, MarchOutcome, Marcher};
    pub use crate::scene::{NormalMode, Scene};

    // Rendering
    pub use crate::camera::{FanCamera, PixelTask, Ray, RayMapping};
    pub use crate::config::RenderConfig;
    pub use crate::render::{RenderStats, render, render_sequential, render_with_stats};

    // Math
    pub use crate::math::Vector3;

    // Error handling
    pub use crate::{Error, Result};
}
