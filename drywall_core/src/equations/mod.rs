//! # Structural Equations
//!
//! Every formula used by the stud and ceiling checks lives here, so the
//! numbers in a calculation trace can be checked against one place.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported member formulas (reactions, moment, deflection)
//! - [`capacity`] - Bending, shear, web-crippling and hanger resistances
//! - [`registry`] - Equation metadata used by traces and `EQUATIONS.md`
//!
//! ## Sign Conventions
//!
//! All loads on a member act in one direction (out of plane for studs,
//! downward for runners) and are entered as non-negative magnitudes. Moments,
//! shears and deflections are therefore non-negative as well.
//!
//! ## References
//!
//! - BS 5950-5: Code of practice for design of cold formed thin gauge sections
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod beam;
pub mod capacity;
pub mod registry;

pub use beam::{
    eccentric_point_load_deflection,
    point_load_max_moment,
    point_load_reactions,
    uniform_load_max_deflection,
    uniform_load_max_moment,
    uniform_load_reactions,
};

pub use capacity::{
    bending_capacity,
    hanger_tension_capacity,
    shear_capacity,
    web_crippling_capacity,
    WebCripplingCoefficients,
    WEB_CRIPPLING_RADIUS_MM,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
