//! Planar polygon geometry: validity, canonical placement, description.
//!
//! Purpose
//! - Provide a single owned vertex-cycle polygon (`Polygon`) with eps-aware
//!   validity checks and in-place canonicalization, the shape every other
//!   module consumes.
//!
//! Why this design
//! - Mutating, in-place passes (simplify, orient, centralize, standardize)
//!   match the batch pipeline: each polygon lives for one
//!   generate→validate→normalize→describe→fingerprint run and is then
//!   discarded.
//! - Tolerances are centralized in `GeomCfg` rather than scattered literals.

mod describe;
mod normalize;
mod types;
mod util;
mod validate;

pub use describe::{describe, EdgeDescriptors};
pub use normalize::{
    centralize, correct_orientation, diameter, normalize, signed_area, standardize,
};
pub use types::{GeomCfg, Polygon};
pub use util::{decmod, incmod};
pub use validate::{check, simplify, simplify_check};

#[cfg(test)]
mod tests;
