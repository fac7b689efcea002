//! Domain warps and distance operations
//!
//! A shape carries two ordered pipelines: [`Warp`]s rewrite the sample point
//! before the primitive is evaluated, [`DistanceOp`]s rewrite the distance it
//! returns. Both are plain data so individual steps can be compared, logged
//! and serialized; [`apply_warps`] and [`apply_distance_ops`] interpret them
//! strictly in list order.

use crate::math::{self, Vector3};
use serde::{Deserialize, Serialize};

/// A point-to-point transform applied before the distance test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Warp {
    /// Rotate x/y by `rate * p.y` radians
    Twist { rate: f64 },
    /// Tile space with the given cell size (non-positive axes are not tiled)
    Repeat { cell: Vector3 },
    /// Shift the sample point by `offset`
    Translate { offset: Vector3 },
    /// Rotate the sample point by per-axis angles (Z, then Y, then X)
    Rotate { angles: Vector3 },
}

impl Warp {
    /// Evaluate this single step
    pub fn apply(&self, p: Vector3) -> Vector3 {
        match *self {
            Warp::Twist { rate } => math::twist(p, rate),
            Warp::Repeat { cell } => math::repeat(p, cell),
            Warp::Translate { offset } => math::affine(p, offset),
            Warp::Rotate { angles } => math::rot_xyz(p, angles),
        }
    }
}

/// A scalar transform applied to the distance a primitive returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DistanceOp {
    /// Inflate the surface by `radius`, rounding edges
    Round { radius: f64 },
    /// Hollow the shape into a shell of the given thickness
    Shell { thickness: f64 },
    /// Multiply the distance by `factor`
    Scale { factor: f64 },
}

impl DistanceOp {
    /// Evaluate this single step
    pub fn apply(&self, d: f64) -> f64 {
        match *self {
            DistanceOp::Round { radius } => d - radius,
            DistanceOp::Shell { thickness } => d.abs() - thickness,
            DistanceOp::Scale { factor } => d * factor,
        }
    }
}

/// Run every warp over `p`, first to last
pub fn apply_warps(warps: &[Warp], p: Vector3) -> Vector3 {
    warps.iter().fold(p, |p, w| w.apply(p))
}

/// Run every distance operation over `d`, first to last
pub fn apply_distance_ops(ops: &[DistanceOp], d: f64) -> f64 {
    ops.iter().fold(d, |d, op| op.apply(d))
}
