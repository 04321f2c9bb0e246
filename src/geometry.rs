use std::f64::consts::TAU;

use log::trace;
use nalgebra::Vector3;

use crate::error::{non_zero, positive, Error, Result};

/// Parameters of the torus being drawn.
///
/// The surface is a circle of radius `r1` centred `r2` away from the Y axis,
/// revolved around that axis, then rotated by `a` about X and `b` about Z.
/// The spacings control how densely the two surface parameters are sampled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Torus {
    theta_spacing: f64,
    phi_spacing: f64,
    r1: f64,
    r2: f64,
    a: f64,
    b: f64,
}

impl Torus {
    pub fn new(theta_spacing: f64, phi_spacing: f64, r1: f64, r2: f64) -> Result<Torus> {
        Ok(Torus {
            theta_spacing: positive("theta spacing", theta_spacing)?,
            phi_spacing: positive("phi spacing", phi_spacing)?,
            r1: positive("tube radius", r1)?,
            r2: positive("revolution radius", r2)?,
            a: 0.0,
            b: 0.0,
        })
    }

    pub fn with_angles(mut self, a: f64, b: f64) -> Torus {
        self.a = a;
        self.b = b;
        self
    }

    /// Advances both rotation angles. Angles are never wrapped.
    pub fn rotate(&mut self, da: f64, db: f64) {
        self.a += da;
        self.b += db;
    }

    pub fn theta_spacing(&self) -> f64 {
        self.theta_spacing
    }

    pub fn phi_spacing(&self) -> f64 {
        self.phi_spacing
    }

    pub fn r1(&self) -> f64 {
        self.r1
    }

    pub fn r2(&self) -> f64 {
        self.r2
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Radius of the smallest sphere around the centre containing the surface.
    pub fn outer_radius(&self) -> f64 {
        self.r1 + self.r2
    }

    /// Every `(theta, phi)` pair of one pass, theta outer and phi inner.
    pub fn parameters(&self) -> impl Iterator<Item = (f64, f64)> {
        let phi_spacing = self.phi_spacing;
        steps(self.theta_spacing)
            .flat_map(move |theta| steps(phi_spacing).map(move |phi| (theta, phi)))
    }
}

impl Default for Torus {
    fn default() -> Torus {
        Torus {
            theta_spacing: 0.07,
            phi_spacing: 0.02,
            r1: 1.0,
            r2: 2.0,
            a: 0.0,
            b: 0.0,
        }
    }
}

/// Ascending angles from zero below a full turn, accumulated by repeated
/// addition of the step.
pub struct Steps {
    next: f64,
    step: f64,
}

pub fn steps(step: f64) -> Steps {
    Steps { next: 0.0, step }
}

impl Iterator for Steps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next < TAU {
            let angle = self.next;
            self.next += self.step;
            Some(angle)
        } else {
            None
        }
    }
}

/// Viewport, camera and light.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    k1: f64,
    k2: f64,
    light: Vector3<f64>,
}

impl Scene {
    /// `k1` is the camera to viewport distance, `k2` the camera to torus
    /// distance. The light direction is used as given, without normalizing.
    pub fn new(width: usize, height: usize, k1: f64, k2: f64, light: Vector3<f64>) -> Result<Scene> {
        Ok(Scene {
            width: non_zero("width", width)?,
            height: non_zero("height", height)?,
            k1: positive("viewport distance", k1)?,
            k2: positive("camera distance", k2)?,
            light,
        })
    }

    /// Builds a scene whose projection scale keeps `torus` inside the smaller
    /// viewport dimension.
    pub fn fitted(width: usize, height: usize, k2: f64, light: Vector3<f64>, torus: &Torus) -> Result<Scene> {
        let k2 = positive("camera distance", k2)?;
        if k2 <= torus.outer_radius() {
            return Err(Error::CameraInside {
                k2,
                outer: torus.outer_radius(),
            });
        }
        let k1 = fit_k1(width.min(height), k2, torus);
        Scene::new(width, height, k1, k2, light)
    }

    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn k2(&self) -> f64 {
        self.k2
    }

    pub fn light(&self) -> &Vector3<f64> {
        &self.light
    }

    pub fn with_light(mut self, light: Vector3<f64>) -> Scene {
        self.light = light;
        self
    }
}

/// Projection scale that puts the torus edge at three eighths of `size`
/// from the viewport centre.
pub fn fit_k1(size: usize, k2: f64, torus: &Torus) -> f64 {
    size as f64 * k2 * 3.0 / (8.0 * torus.outer_radius())
}

/// One surface sample after projection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub x: i64,
    pub y: i64,
    /// `1 / z`, larger is nearer the camera.
    pub inv_depth: f64,
    pub luminance: f64,
}

/// Projects surface points for one pose of a torus into one scene.
pub struct Projector {
    r1: f64,
    r2: f64,
    cos_a: f64,
    sin_a: f64,
    cos_b: f64,
    sin_b: f64,
    half_width: f64,
    half_height: f64,
    k1: f64,
    k2: f64,
    light: Vector3<f64>,
}

impl Projector {
    pub fn new(torus: &Torus, scene: &Scene) -> Projector {
        Projector {
            r1: torus.r1,
            r2: torus.r2,
            cos_a: torus.a.cos(),
            sin_a: torus.a.sin(),
            cos_b: torus.b.cos(),
            sin_b: torus.b.sin(),
            half_width: scene.width as f64 / 2.0,
            half_height: scene.height as f64 / 2.0,
            k1: scene.k1,
            k2: scene.k2,
            light: scene.light,
        }
    }

    /// Rotated surface point, relative to the torus centre.
    pub fn point(&self, theta: f64, phi: f64) -> Vector3<f64> {
        let (cos_a, sin_a, cos_b, sin_b) = (self.cos_a, self.sin_a, self.cos_b, self.sin_b);
        let (sin_phi, cos_phi) = phi.sin_cos();

        let circle_x = self.r2 + self.r1 * theta.cos();
        let circle_y = self.r1 * theta.sin();

        Vector3::new(
            circle_x * (cos_b * cos_phi + sin_a * sin_b * sin_phi) - circle_y * cos_a * sin_b,
            circle_x * (sin_b * cos_phi - sin_a * cos_b * sin_phi) + circle_y * cos_a * cos_b,
            cos_a * circle_x * sin_phi + circle_y * sin_a,
        )
    }

    /// Unit surface normal, carried through the same rotation as `point`.
    pub fn normal(&self, theta: f64, phi: f64) -> Vector3<f64> {
        let (cos_a, sin_a, cos_b, sin_b) = (self.cos_a, self.sin_a, self.cos_b, self.sin_b);
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        Vector3::new(
            cos_b * cos_theta * cos_phi - sin_b * (cos_a * sin_theta - sin_a * cos_theta * sin_phi),
            cos_phi * cos_theta * sin_b + cos_b * (cos_a * sin_theta - cos_theta * sin_a * sin_phi),
            cos_a * cos_theta * sin_phi + sin_a * sin_theta,
        )
    }

    /// Returns `None` for points at or behind the camera plane. The screen
    /// coordinates are not clipped.
    pub fn project(&self, theta: f64, phi: f64) -> Option<Sample> {
        let p = self.point(theta, phi);
        let z = self.k2 + p.z;
        let inv_depth = 1.0 / z;
        if !(z > 0.0 && inv_depth.is_finite()) {
            trace!("theta {} phi {} behind camera (z = {})", theta, phi, z);
            return None;
        }

        // Raster y grows downward while world y grows upward.
        let x = (self.half_width + self.k1 * inv_depth * p.x).round() as i64;
        let y = (self.half_height - self.k1 * inv_depth * p.y).round() as i64;

        Some(Sample {
            x,
            y,
            inv_depth,
            luminance: self.light.dot(&self.normal(theta, phi)),
        })
    }
}

/// Projects a single surface sample. Prefer a `Projector` when sweeping.
pub fn project(theta: f64, phi: f64, torus: &Torus, scene: &Scene) -> Option<Sample> {
    Projector::new(torus, scene).project(theta, phi)
}
