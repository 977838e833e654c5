//! # Steel Material Properties
//!
//! Design strength, stiffness and material factor for light-gauge galvanized
//! steel. Every value ends up in a denominator or a capacity, so all three must
//! be strictly positive.
//!
//! ## Example
//!
//! ```rust
//! use drywall_core::materials::MaterialProperties;
//!
//! let steel = MaterialProperties::default();
//! assert_eq!(steel.yield_strength_mpa, 200.0);
//! assert!((steel.design_strength_mpa() - 166.6667).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};

/// Material properties used by the capacity formulas.
///
/// ## JSON Example
///
/// ```json
/// { "yield_strength_mpa": 200.0, "elastic_modulus_mpa": 205000.0, "material_factor": 1.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Design strength Py (MPa)
    pub yield_strength_mpa: f64,

    /// Modulus of elasticity E (MPa)
    pub elastic_modulus_mpa: f64,

    /// Material safety factor γm
    pub material_factor: f64,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        MaterialProperties {
            yield_strength_mpa: 200.0,
            elastic_modulus_mpa: 205_000.0,
            material_factor: 1.2,
        }
    }
}

impl MaterialProperties {
    pub fn new(yield_strength_mpa: f64, elastic_modulus_mpa: f64, material_factor: f64) -> Self {
        Self {
            yield_strength_mpa,
            elastic_modulus_mpa,
            material_factor,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("yield_strength_mpa", self.yield_strength_mpa)?;
        require_positive("elastic_modulus_mpa", self.elastic_modulus_mpa)?;
        require_positive("material_factor", self.material_factor)?;
        Ok(())
    }

    /// Py / γm
    pub fn design_strength_mpa(&self) -> f64 {
        self.yield_strength_mpa / self.material_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_material_factor_rejected() {
        let steel = MaterialProperties::new(200.0, 205_000.0, 0.0);
        let err = steel.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("material_factor"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(MaterialProperties::new(f64::NAN, 205_000.0, 1.2).validate().is_err());
        assert!(MaterialProperties::new(200.0, f64::INFINITY, 1.2).validate().is_err());
        assert!(MaterialProperties::new(200.0, -1.0, 1.2).validate().is_err());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(MaterialProperties::default().validate().is_ok());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&MaterialProperties::default()).unwrap();
        assert!(json.contains("\"yield_strength_mpa\":200.0"));
        assert!(json.contains("\"material_factor\":1.2"));
    }
}
