//! # drywall_core - Drywall Framing Verification Engine
//!
//! `drywall_core` checks light-gauge steel partition studs and suspended-ceiling
//! runners, hangers and anchors against factored wind, imposed, fixture and
//! dead loads. Every member gets five checks (bending, shear, web crippling,
//! deflection, combined action), each reported as demand, capacity,
//! utilization ratio and pass flag, together with a formula-by-formula
//! calculation trace.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Unknown components and bad inputs are explicit errors
//! - **Traceable**: Formula strings come from one equation registry
//!
//! ## Quick Start
//!
//! ```rust
//! use drywall_core::{calculate_wall_stud, Catalog, ComponentRepository};
//! use drywall_core::calculations::WallStudInput;
//!
//! let stud = Catalog::builtin().find_section("C75x45x0.8t").unwrap();
//! let input = WallStudInput::new(2700.0);
//!
//! let result = calculate_wall_stud(&input, stud).unwrap();
//! println!("governing: {} ({:.3})", result.governing_check(), result.max_utilization());
//! print!("{}", result.trace);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Wall-stud and ceiling-system calculations
//! - [`components`] - Section, hanger and anchor catalog
//! - [`loads`] - Load sources, dead-load build-up and member load aggregation
//! - [`equations`] - Beam formulas, capacity formulas and the equation registry
//! - [`verification`] - Check results and the five-check verdict
//! - [`trace`] - Calculation trace
//! - [`project`] - Job file container, metadata and settings
//! - [`file_io`] - Reading and atomically writing JSON files
//! - [`materials`] - Steel design properties
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod components;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod trace;
pub mod units;
pub mod verification;

// Re-export commonly used types at crate root for convenience
pub use calculations::ceiling_system::calculate as calculate_ceiling_system;
pub use calculations::wall_stud::calculate as calculate_wall_stud;
pub use components::{Catalog, ComponentRepository};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use trace::CalculationTrace;
pub use verification::{CheckKind, CheckResult, VerificationResult};
