//! Shape primitives
//!
//! A [`Shape`] pairs one analytic [`Primitive`] with a pose, a flat color and
//! two ordered pipelines (point warps before the test, distance operations
//! after it). Shapes are plain immutable values; evaluating one never mutates
//! anything, so a scene can be shared freely between render threads.
//!
//! ## Example
//!
//! ```rust
//! use umbra_core::prelude::*;
//!
//! let ring = torus(3.0, 0.25)
//!     .rotate(Vector3::new(0.5, 0.0, 0.0))
//!     .twist(0.3)
//!     .with_color(Vector3::new(0.5, 0.25, 0.1));
//!
//! assert!(ring.distance(Vector3::new(0.0, 0.0, -10.0)) > 0.0);
//! ```

use crate::math::{self, Vector3};
use crate::warp::{self, DistanceOp, Warp};
use serde::{Deserialize, Serialize};

/// Color given to shapes that never call [`Shape::with_color`]
pub const DEFAULT_COLOR: Vector3 = Vector3::new(0.75, 0.75, 0.75);

/// Default contraction factor of the fractal primitive
pub const DEFAULT_FRACTAL_SCALE: f64 = 2.0;

/// Default number of fractal folding iterations
pub const DEFAULT_FRACTAL_ITERATIONS: u32 = 10;

// ============================================================================
// Constructor functions
// ============================================================================

/// Create a sphere with given radius
pub fn sphere(radius: f64) -> Shape {
    Shape::new(Primitive::Sphere { radius })
}

/// Create a box with given half-extents (size/2 in each direction)
pub fn box3(half_extents: Vector3) -> Shape {
    Shape::new(Primitive::Box { half_extents })
}

/// Create a cube with given edge length
pub fn cube(size: f64) -> Shape {
    box3(Vector3::splat(size * 0.5))
}

/// Create a torus lying in the XZ plane
pub fn torus(major_radius: f64, minor_radius: f64) -> Shape {
    Shape::new(Primitive::Torus {
        major_radius,
        minor_radius,
    })
}

/// Create a Sierpinski tetrahedron with the default scale and iteration count
pub fn fractal(size: f64) -> Shape {
    fractal_with(size, DEFAULT_FRACTAL_SCALE, DEFAULT_FRACTAL_ITERATIONS)
}

/// Create a Sierpinski tetrahedron with explicit folding parameters
pub fn fractal_with(size: f64, scale: f64, iterations: u32) -> Shape {
    Shape::new(Primitive::Fractal {
        size,
        scale,
        iterations,
    })
}

// ============================================================================
// Primitives
// ============================================================================

/// Analytic distance fields, all centered at the local origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Sphere {
        radius: f64,
    },
    Box {
        half_extents: Vector3,
    },
    Torus {
        major_radius: f64,
        minor_radius: f64,
    },
    /// Iterated function system contracting toward the corners of a
    /// tetrahedron. Only a close estimate near the attractor.
    Fractal {
        size: f64,
        scale: f64,
        iterations: u32,
    },
}

impl Primitive {
    /// Signed distance from a point already expressed in the local frame
    pub fn distance(&self, q: Vector3) -> f64 {
        match *self {
            Primitive::Sphere { radius } => math::length(q) - radius,

            Primitive::Box { half_extents } => {
                let d = q.abs() - half_extents;
                math::length(math::max_scalar(d, 0.0)) + d.x.max(d.y.max(d.z)).min(0.0)
            }

            Primitive::Torus {
                major_radius,
                minor_radius,
            } => math::length2(math::length2(q.x, q.z) - major_radius, q.y) - minor_radius,

            Primitive::Fractal {
                size,
                scale,
                iterations,
            } => sierpinski(q, size, scale, iterations),
        }
    }
}

const FRACTAL_BAILOUT: f64 = 1e12;

fn sierpinski(mut z: Vector3, size: f64, scale: f64, iterations: u32) -> f64 {
    let vertices = [
        Vector3::new(size, size, size),
        Vector3::new(-size, -size, size),
        Vector3::new(size, -size, -size),
        Vector3::new(-size, size, -size),
    ];
    let shrink = scale - 1.0;
    let mut factor = 1.0;

    for _ in 0..iterations {
        // Stop before z overflows or the factor underflows
        if math::length(z) > FRACTAL_BAILOUT || factor < f64::MIN_POSITIVE {
            break;
        }
        let mut nearest = vertices[0];
        let mut best = math::length(z - nearest);
        for &v in &vertices[1..] {
            let d = math::length(z - v);
            if d < best {
                nearest = v;
                best = d;
            }
        }
        z = z * scale - nearest * shrink;
        factor /= scale;
    }

    math::length(z) * factor
}

// ============================================================================
// Shape
// ============================================================================

/// Placement of a shape: translation plus Z-Y-X rotation angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub translation: Vector3,
    pub rotation: Vector3,
}

impl Pose {
    /// Move a world-space point into the shape's local frame
    pub fn to_local(&self, p: Vector3) -> Vector3 {
        math::rot_xyz_inverse(p - self.translation, self.rotation)
    }
}

/// A colored, posed primitive with its warp and distance pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    primitive: Primitive,
    pose: Pose,
    color: Vector3,
    pre: Vec<Warp>,
    post: Vec<DistanceOp>,
}

impl Shape {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            pose: Pose::default(),
            color: DEFAULT_COLOR,
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    /// Signed distance from `p` to this shape's surface.
    ///
    /// Warps run first (in insertion order), then the pose moves the point
    /// into the local frame, then the distance operations run on the result.
    pub fn distance(&self, p: Vector3) -> f64 {
        let warped = warp::apply_warps(&self.pre, p);
        let local = self.pose.to_local(warped);
        let d = self.primitive.distance(local);
        warp::apply_distance_ops(&self.post, d)
    }

    /// Flat color, independent of the sample point
    pub fn color(&self) -> Vector3 {
        self.color
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn warps(&self) -> &[Warp] {
        &self.pre
    }

    pub fn distance_ops(&self) -> &[DistanceOp] {
        &self.post
    }

    // === Builders ===

    /// Move the shape so its local origin sits at `offset`
    pub fn translate(mut self, offset: Vector3) -> Self {
        self.pose.translation = offset;
        self
    }

    /// Orient the shape by Z-Y-X angles (radians)
    pub fn rotate(mut self, angles: Vector3) -> Self {
        self.pose.rotation = angles;
        self
    }

    pub fn with_color(mut self, color: Vector3) -> Self {
        self.color = color;
        self
    }

    /// Append a domain warp to the pre-processing chain
    pub fn warp(mut self, warp: Warp) -> Self {
        self.pre.push(warp);
        self
    }

    pub fn twist(self, rate: f64) -> Self {
        self.warp(Warp::Twist { rate })
    }

    pub fn repeat(self, cell: Vector3) -> Self {
        self.warp(Warp::Repeat { cell })
    }

    /// Append an operation to the post-processing chain
    pub fn then(mut self, op: DistanceOp) -> Self {
        self.post.push(op);
        self
    }

    pub fn round(self, radius: f64) -> Self {
        self.then(DistanceOp::Round { radius })
    }

    pub fn shell(self, thickness: f64) -> Self {
        self.then(DistanceOp::Shell { thickness })
    }

    pub fn scale_distance(self, factor: f64) -> Self {
        self.then(DistanceOp::Scale { factor })
    }
}
