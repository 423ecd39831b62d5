//! Synthesis, validation, canonicalization and fingerprinting of simple
//! polygons used as research test fixtures.
//!
//! The pipeline is: propose vertex coordinates (a pluggable
//! [`gen::source::CoordinateSource`]), assemble and retry until the candidate
//! survives simplification as a true n-gon ([`gen::generate_simple`]), reduce
//! it to a canonical placement ([`geom::normalize`]), extract the edge-length
//! and turning-angle sequences ([`geom::describe`]), and collapse those into
//! a starting-vertex- and direction-independent singular-value signature
//! ([`signature::fingerprint`]).
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Prefer clarity and better design over compatibility; breaking changes
//!   are fine when they improve quality.

pub mod gen;
pub mod geom;
pub mod io;
pub mod signature;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::gen::source::{
        Axis, Combine, CoordinateSource, Dispersion, PerturbSource, PromptSource, RegularSource,
        TemplateSource, UniformSource,
    };
    pub use crate::gen::{generate_simple, generate_simple_plain, GenCfg, Outcome, ReplayToken};
    pub use crate::geom::{
        check, correct_orientation, describe, normalize, simplify_check, EdgeDescriptors, GeomCfg,
        Polygon,
    };
    pub use crate::signature::{build_repr_matrix, fingerprint, ReprMatrix, SvdError};
    pub use nalgebra::Vector2 as Vec2;
}
