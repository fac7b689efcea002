//! Built-in scenes selectable with `--scene`

use clap::ValueEnum;
use umbra_core::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// Three twisted tori around a twisted sphere and box
    #[default]
    Twisted,
    /// Sierpinski tetrahedron
    Fractal,
    /// Infinite lattice of spheres and rounded boxes
    Tiles,
    /// Single blue sphere at the origin
    Sphere,
}

impl Preset {
    pub fn description(self) -> &'static str {
        match self {
            Preset::Twisted => "three twisted tori around a twisted sphere and box",
            Preset::Fractal => "Sierpinski tetrahedron, 10 folding iterations",
            Preset::Tiles => "repeated spheres and rounded boxes",
            Preset::Sphere => "single blue sphere of radius 1.5 at the origin",
        }
    }

    pub fn build(self) -> Result<Scene> {
        let shapes = match self {
            Preset::Twisted => twisted(),
            Preset::Fractal => vec![
                fractal(2.0)
                    .rotate(Vector3::new(0.4, 0.6, 0.0))
                    .with_color(Vector3::new(0.8, 0.7, 0.2)),
            ],
            Preset::Tiles => vec![
                sphere(0.5)
                    .repeat(Vector3::splat(3.0))
                    .with_color(Vector3::new(0.1, 0.25, 0.75)),
                // Offset by half a cell so boxes sit between the spheres
                box3(Vector3::splat(0.4))
                    .warp(Warp::Translate {
                        offset: Vector3::splat(1.5),
                    })
                    .repeat(Vector3::splat(3.0))
                    .round(0.1)
                    .with_color(Vector3::new(0.9, 0.1, 0.1)),
            ],
            Preset::Sphere => vec![sphere(1.5).with_color(Vector3::new(0.1, 0.25, 0.75))],
        };
        Scene::new(shapes)
    }
}

// Angles are used as given, in radians
fn twisted() -> Vec<Shape> {
    vec![
        torus(3.5, 0.25)
            .translate(Vector3::splat(1.0))
            .rotate(Vector3::splat(45.0))
            .twist(0.3)
            .with_color(Vector3::new(0.5, 0.25, 0.1)),
        torus(3.25, 0.45)
            .translate(Vector3::new(2.0, 1.0, 1.0))
            .rotate(Vector3::new(-90.0, 0.0, 45.0))
            .twist(0.2)
            .with_color(Vector3::new(0.1, 0.75, 0.25)),
        sphere(0.75)
            .twist(0.1)
            .with_color(Vector3::new(0.1, 0.25, 0.75)),
        box3(Vector3::splat(0.5))
            .rotate(Vector3::new(45.0, 45.0, 10.0))
            .twist(0.3)
            .with_color(Vector3::new(0.9, 0.1, 0.1)),
        torus(3.0, 0.15)
            .translate(Vector3::splat(1.0))
            .rotate(Vector3::new(90.0, 20.0, 0.0))
            .twist(0.2)
            .with_color(Vector3::new(0.3, 0.4, 0.6)),
    ]
}
