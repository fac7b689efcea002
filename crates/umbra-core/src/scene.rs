//! Scene aggregation
//!
//! A [`Scene`] is the union of its shapes: the distance at a point is the
//! smallest distance over all shapes, and the color is the color of whichever
//! shape produced it. Normals come from central finite differences.

use crate::math::{self, Vector3};
use crate::shape::Shape;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How [`Scene::aggregate_normal`] derives a surface normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalMode {
    /// Differentiate the union distance field itself
    #[default]
    UnionGradient,
    /// Per-axis minimum of each shape's own normal. Matches renders made by
    /// earlier versions but misestimates normals where different shapes
    /// dominate different axes.
    PerAxisMinimum,
}

/// An ordered, non-empty set of shapes queried read-only during rendering
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create a scene from shapes in priority order.
    ///
    /// Fails with [`Error::EmptyScene`] when `shapes` is empty, so a render
    /// can never start without a candidate surface.
    pub fn new(shapes: Vec<Shape>) -> Result<Self> {
        if shapes.is_empty() {
            return Err(Error::EmptyScene);
        }
        Ok(Self { shapes })
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Always false; kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Smallest distance over all shapes and the color of the closest one.
    ///
    /// Shapes tying at the minimum resolve to the earliest in the list.
    pub fn nearest_surface(&self, p: Vector3) -> (f64, Vector3) {
        let first = &self.shapes[0];
        let mut best = (first.distance(p), first.color());
        for shape in &self.shapes[1..] {
            let d = shape.distance(p);
            if d < best.0 {
                best = (d, shape.color());
            }
        }
        best
    }

    /// Union distance at `p`
    pub fn distance(&self, p: Vector3) -> f64 {
        self.nearest_surface(p).0
    }

    /// Normal of the union field at `p`, or `None` where the gradient vanishes
    pub fn aggregate_normal(&self, p: Vector3, eps: f64, mode: NormalMode) -> Option<Vector3> {
        match mode {
            NormalMode::UnionGradient => gradient(|q| self.distance(q), p, eps),
            NormalMode::PerAxisMinimum => {
                let mut normal: Option<Vector3> = None;
                for shape in &self.shapes {
                    let Some(n) = estimate_normal(p, shape, eps) else {
                        continue;
                    };
                    normal = Some(match normal {
                        Some(acc) => acc.min(n),
                        None => n,
                    });
                }
                normal
            }
        }
    }
}

/// Normal of a single shape at `p` by central differences
pub fn estimate_normal(p: Vector3, shape: &Shape, eps: f64) -> Option<Vector3> {
    gradient(|q| shape.distance(q), p, eps)
}

fn gradient(f: impl Fn(Vector3) -> f64, p: Vector3, eps: f64) -> Option<Vector3> {
    let dx = Vector3::X * eps;
    let dy = Vector3::Y * eps;
    let dz = Vector3::Z * eps;
    let g = Vector3::new(
        f(p + dx) - f(p - dx),
        f(p + dy) - f(p - dy),
        f(p + dz) - f(p - dz),
    );
    math::normalize(g).ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::shape::{box3, sphere};
    use approx::assert_relative_eq;

    const EPS: f64 = 5e-6;

    #[test]
    fn empty_scene_is_rejected() {
        assert!(matches!(Scene::new(Vec::new()), Err(Error::EmptyScene)));
    }

    #[test]
    fn nearest_surface_picks_minimum_and_its_color() {
        let red = Vector3::new(0.9, 0.1, 0.1);
        let blue = Vector3::new(0.1, 0.25, 0.75);
        let scene = Scene::new(vec![
            sphere(1.0).with_color(red),
            sphere(1.0).translate(Vector3::new(5.0, 0.0, 0.0)).with_color(blue),
        ])
        .unwrap();

        let (d, c) = scene.nearest_surface(Vector3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(d, 0.0, epsilon = 1e-12);
        assert_eq!(c, blue);

        let (d, c) = scene.nearest_surface(Vector3::new(-3.0, 0.0, 0.0));
        assert_relative_eq!(d, 2.0, epsilon = 1e-12);
        assert_eq!(c, red);
    }

    #[test]
    fn ties_go_to_first_shape() {
        let first = Vector3::new(1.0, 0.0, 0.0);
        let second = Vector3::new(0.0, 1.0, 0.0);
        let scene = Scene::new(vec![
            sphere(1.0).with_color(first),
            sphere(1.0).with_color(second),
        ])
        .unwrap();
        assert_eq!(scene.nearest_surface(Vector3::new(0.0, 3.0, 0.0)).1, first);
    }

    #[test]
    fn single_shape_normal_points_outward() {
        let s = sphere(1.0);
        let n = estimate_normal(Vector3::new(0.0, 0.0, -1.0), &s, EPS).unwrap();
        assert!(n.abs_diff_eq(Vector3::NEG_Z, 1e-6));
    }

    #[test]
    fn degenerate_gradient_has_no_normal() {
        // The center of a sphere is symmetric in every direction
        assert!(estimate_normal(Vector3::ZERO, &sphere(1.0), EPS).is_none());
    }

    #[test]
    fn union_gradient_follows_dominant_shape() {
        let scene = Scene::new(vec![
            sphere(1.0),
            box3(Vector3::splat(0.5)).translate(Vector3::new(4.0, 0.0, 0.0)),
        ])
        .unwrap();
        let n = scene
            .aggregate_normal(Vector3::new(0.0, 1.0, 0.0), EPS, NormalMode::UnionGradient)
            .unwrap();
        assert!(n.abs_diff_eq(Vector3::Y, 1e-6));
        let n = scene
            .aggregate_normal(Vector3::new(4.5, 0.0, 0.0), EPS, NormalMode::UnionGradient)
            .unwrap();
        assert!(n.abs_diff_eq(Vector3::X, 1e-6));
    }

    #[test]
    fn per_axis_minimum_mixes_shapes() {
        let scene = Scene::new(vec![
            sphere(1.0),
            sphere(1.0).translate(Vector3::new(3.0, 0.0, 0.0)),
        ])
        .unwrap();
        let p = Vector3::new(1.0, 0.0, 0.0);
        let legacy = scene
            .aggregate_normal(p, EPS, NormalMode::PerAxisMinimum)
            .unwrap();
        // The second sphere's normal points toward -X and wins the x axis
        assert_relative_eq!(legacy.x, -1.0, epsilon = 1e-6);
        let exact = scene
            .aggregate_normal(p, EPS, NormalMode::UnionGradient)
            .unwrap();
        assert_relative_eq!(exact.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn per_axis_minimum_single_shape_matches_estimate() {
        let s = sphere(1.5);
        let scene = Scene::new(vec![s.clone()]).unwrap();
        let p = Vector3::new(0.3, 1.2, -0.8);
        let legacy = scene
            .aggregate_normal(p, EPS, NormalMode::PerAxisMinimum)
            .unwrap();
        assert_eq!(legacy, estimate_normal(p, &s, EPS).unwrap());
    }

    #[test]
    fn normal_mode_uses_kebab_case_names() {
        let json = serde_json::to_string(&NormalMode::PerAxisMinimum).unwrap();
        assert_eq!(json, r#""per-axis-minimum""#);
    }
}
