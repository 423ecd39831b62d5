//! Pluggable coordinate sources for vertex proposal.
//!
//! Purpose
//! - Decouple "where coordinates come from" (uniform noise, a template
//!   polygon, a perturbed template, a regular n-gon, a terminal prompt) from
//!   the assembly and retry machinery in the parent module.
//!
//! Why this design
//! - Each source owns its parameters and RNG by value; there is no shared
//!   register state, so sources can be built, used and dropped per batch.
//! - The perturbation source draws its displacement pair (angle, length)
//!   once per vertex when asked for the x-axis and replays it for the
//!   y-axis, so both coordinates of one point always describe the same
//!   displacement.

use std::f64::consts::PI;
use std::io::{BufRead, Write};

use nalgebra::Vector2;
use rand::Rng;

use crate::geom::decmod;

/// Coordinate axis selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Supplies one raw coordinate per (vertex, axis) query.
///
/// Sources may cache state between the X and Y query of the same vertex;
/// callers must therefore query X before Y for each vertex, in vertex order.
pub trait CoordinateSource {
    fn coordinate(&mut self, vertex: usize, axis: Axis) -> f64;
}

/// Standard normal deviate via the Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let v: f64 = rng.gen();
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Dispersion rule for perturbation displacement lengths.
///
/// The standard deviation of the displacement of vertex i is either a
/// constant or a combination of the two edge lengths meeting at i.
#[derive(Clone, Debug)]
pub enum Dispersion {
    Constant(f64),
    Combine { lengths: Vec<f64>, rule: Combine },
}

/// How neighboring edge lengths are combined into a deviation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combine {
    Min,
    Max,
}

impl Dispersion {
    /// Deviation for vertex `i`; 0 when `i` is out of range of the captured
    /// length array.
    pub fn amount(&self, i: usize) -> f64 {
        match self {
            Dispersion::Constant(sd) => *sd,
            Dispersion::Combine { lengths, rule } => {
                let n = lengths.len();
                if i >= n {
                    return 0.0;
                }
                let a = lengths[decmod(i, n)];
                let b = lengths[i];
                match rule {
                    Combine::Min => a.min(b),
                    Combine::Max => a.max(b),
                }
            }
        }
    }
}

/// Uniform pseudorandom coordinates in [0, 1].
#[derive(Clone, Debug)]
pub struct UniformSource<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CoordinateSource for UniformSource<R> {
    fn coordinate(&mut self, _vertex: usize, _axis: Axis) -> f64 {
        self.rng.gen()
    }
}

/// Copies coordinates of a template polygon captured by value.
#[derive(Clone, Debug)]
pub struct TemplateSource {
    template: Vec<Vector2<f64>>,
}

impl TemplateSource {
    pub fn new(template: Vec<Vector2<f64>>) -> Self {
        Self { template }
    }
}

impl CoordinateSource for TemplateSource {
    fn coordinate(&mut self, vertex: usize, axis: Axis) -> f64 {
        match self.template.get(vertex) {
            Some(p) => match axis {
                Axis::X => p.x,
                Axis::Y => p.y,
            },
            None => 0.0,
        }
    }
}

/// Displaces template vertices by a random direction and a normally
/// distributed distance.
///
/// The direction is uniform in [0, π] and the distance is a standard normal
/// scaled by the dispersion rule; a negative distance flips the direction,
/// so the displacement covers the full circle.
#[derive(Clone, Debug)]
pub struct PerturbSource<R: Rng> {
    template: Vec<Vector2<f64>>,
    dispersion: Dispersion,
    rng: R,
    r: f64,
    phi: f64,
}

impl<R: Rng> PerturbSource<R> {
    pub fn new(template: Vec<Vector2<f64>>, dispersion: Dispersion, rng: R) -> Self {
        Self {
            template,
            dispersion,
            rng,
            r: 0.0,
            phi: 0.0,
        }
    }
}

impl<R: Rng> CoordinateSource for PerturbSource<R> {
    fn coordinate(&mut self, vertex: usize, axis: Axis) -> f64 {
        let Some(p) = self.template.get(vertex).copied() else {
            return 0.0;
        };
        if axis == Axis::X {
            self.r = standard_normal(&mut self.rng) * self.dispersion.amount(vertex).abs();
            self.phi = self.rng.gen::<f64>() * PI;
        }
        match axis {
            Axis::X => p.x + self.r * self.phi.cos(),
            Axis::Y => p.y + self.r * self.phi.sin(),
        }
    }
}

/// Vertices of the regular n-gon inscribed in the unit circle.
#[derive(Clone, Copy, Debug)]
pub struct RegularSource {
    n: usize,
}

impl RegularSource {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl CoordinateSource for RegularSource {
    fn coordinate(&mut self, vertex: usize, axis: Axis) -> f64 {
        if self.n == 0 || vertex >= self.n {
            return 0.0;
        }
        let theta = 2.0 * PI * (vertex as f64) / (self.n as f64);
        match axis {
            Axis::X => theta.cos(),
            Axis::Y => theta.sin(),
        }
    }
}

/// Coordinates typed in interactively, with parse-retry.
///
/// Blocks on the reader; meant for single-polygon interactive sessions, not
/// unattended batch runs.
pub struct PromptSource<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

fn ordinal(i: usize) -> &'static str {
    match (i % 100, i % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    }
}

impl<R: BufRead, W: Write> CoordinateSource for PromptSource<R, W> {
    fn coordinate(&mut self, vertex: usize, axis: Axis) -> f64 {
        let name = match axis {
            Axis::X => 'x',
            Axis::Y => 'y',
        };
        let ord = vertex + 1;
        loop {
            let _ = write!(
                self.output,
                "Enter {name}-coordinate of the {ord}{} point: ",
                ordinal(ord)
            );
            let _ = self.output.flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return 0.0,
                Ok(_) => {
                    if let Ok(v) = line.trim().parse::<f64>() {
                        return v;
                    }
                }
                Err(_) => return 0.0,
            }
        }
    }
}
