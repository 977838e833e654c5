//! Loads acting on studs and ceiling runners
//!
//! A partition stud sees four independent load sources: out-of-plane wind
//! pressure, an imposed line load (crowd, handrail) at a given height, wall
//! fixtures hung at a given height, and the self-weight of boards, insulation
//! and framing. A ceiling runner sees wind (uplift/suction) and dead load only.
//!
//! # Overview
//!
//! - [`LoadSource`] - The four load sources
//! - [`DeadLoadInput`] - Board / insulation / frame self-weight build-up
//! - [`DeflectionCriterion`] - L/240, L/360 or a custom divisor
//! - [`aggregate::MemberLoads`] - Superposition of factored loads on one member
//!
//! # Example
//!
//! ```
//! use drywall_core::loads::{DeadLoadInput, DesignConstants};
//!
//! let wall = DeadLoadInput {
//!     board_layers: 2,
//!     board_weight_kg_per_m2: 13.0,
//!     insulation_thickness_mm: Some(50.0),
//!     frame_weight_kg_per_m2: 15.0,
//! };
//! let constants = DesignConstants::default();
//! // 26 + 0.8 + 15 kg/m²
//! assert!((wall.areal_mass(&constants).value() - 41.8).abs() < 1e-9);
//! ```

pub mod aggregate;

pub use aggregate::{LoadContribution, LoadSummary, MemberLoads, PointLoad, UniformLoad};

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::units::{
    Kilograms, KilogramsPerSquareMeter, Kilopascals, Millimeters, Newtons, GRAVITY,
};

/// Load sources acting on a stud or runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadSource {
    /// W - Wind pressure, uniform over the tributary width
    Wind,
    /// Q - Imposed load, a point load at its height above the floor
    Imposed,
    /// F - Wall fixture (cabinet, sink, handrail bracket)
    Fixture,
    /// D - Self-weight of boards, insulation and frame
    Dead,
}

impl LoadSource {
    pub const ALL: [LoadSource; 4] = [
        LoadSource::Wind,
        LoadSource::Imposed,
        LoadSource::Fixture,
        LoadSource::Dead,
    ];

    /// Subscript used in trace formulas (Mw, Mq, Mf, Md)
    pub fn code(&self) -> &'static str {
        match self {
            LoadSource::Wind => "w",
            LoadSource::Imposed => "q",
            LoadSource::Fixture => "f",
            LoadSource::Dead => "d",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LoadSource::Wind => "Wind load",
            LoadSource::Imposed => "Imposed load",
            LoadSource::Fixture => "Fixture load",
            LoadSource::Dead => "Dead load",
        }
    }
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Physical constants used to turn masses into forces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignConstants {
    /// Gravitational acceleration (m/s²), kgf → N
    pub gravity_m_per_s2: f64,

    /// Assumed bulk density of insulation (kg/m³)
    pub insulation_density_kg_per_m3: f64,
}

impl Default for DesignConstants {
    fn default() -> Self {
        DesignConstants {
            gravity_m_per_s2: GRAVITY,
            insulation_density_kg_per_m3: 16.0,
        }
    }
}

impl DesignConstants {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("gravity_m_per_s2", self.gravity_m_per_s2)?;
        require_non_negative("insulation_density_kg_per_m3", self.insulation_density_kg_per_m3)?;
        Ok(())
    }

    /// Weight of a mass
    pub fn weight(&self, mass: Kilograms) -> Newtons {
        Newtons(mass.0 * self.gravity_m_per_s2)
    }

    /// Pressure exerted by an areal mass (N/m² → kPa)
    pub fn pressure(&self, areal_mass: KilogramsPerSquareMeter) -> Kilopascals {
        Kilopascals(areal_mass.0 * self.gravity_m_per_s2 / 1000.0)
    }
}

/// Self-weight build-up of a wall or ceiling lining.
///
/// ## JSON Example
///
/// ```json
/// {
///   "board_layers": 1,
///   "board_weight_kg_per_m2": 13.0,
///   "insulation_thickness_mm": null,
///   "frame_weight_kg_per_m2": 15.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadLoadInput {
    /// Number of board layers
    pub board_layers: u32,

    /// Areal mass of one board layer (kg/m²)
    pub board_weight_kg_per_m2: f64,

    /// Insulation thickness (mm); `None` when the cavity is empty
    #[serde(default)]
    pub insulation_thickness_mm: Option<f64>,

    /// Areal mass of the metal frame (kg/m²)
    pub frame_weight_kg_per_m2: f64,
}

impl DeadLoadInput {
    /// No lining at all
    pub fn none() -> Self {
        DeadLoadInput {
            board_layers: 0,
            board_weight_kg_per_m2: 0.0,
            insulation_thickness_mm: None,
            frame_weight_kg_per_m2: 0.0,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("board_weight_kg_per_m2", self.board_weight_kg_per_m2)?;
        require_non_negative("frame_weight_kg_per_m2", self.frame_weight_kg_per_m2)?;
        if let Some(t) = self.insulation_thickness_mm {
            require_non_negative("insulation_thickness_mm", t)?;
        }
        Ok(())
    }

    /// Boards
    pub fn board_mass(&self) -> KilogramsPerSquareMeter {
        KilogramsPerSquareMeter(f64::from(self.board_layers) * self.board_weight_kg_per_m2)
    }

    /// Insulation, thickness × density; zero when absent
    pub fn insulation_mass(&self, constants: &DesignConstants) -> KilogramsPerSquareMeter {
        match self.insulation_thickness_mm {
            Some(t_mm) => KilogramsPerSquareMeter(t_mm / 1000.0 * constants.insulation_density_kg_per_m3),
            None => KilogramsPerSquareMeter(0.0),
        }
    }

    /// Boards + insulation + frame (kg/m²)
    pub fn areal_mass(&self, constants: &DesignConstants) -> KilogramsPerSquareMeter {
        self.board_mass() + self.insulation_mass(constants) + KilogramsPerSquareMeter(self.frame_weight_kg_per_m2)
    }

    /// Unfactored dead pressure (kPa)
    pub fn pressure(&self, constants: &DesignConstants) -> Kilopascals {
        constants.pressure(self.areal_mass(constants))
    }
}

/// Serviceability deflection limit, span / divisor.
///
/// Serialized as `"L/240"`, `"L/360"` or `{ "Custom": 500.0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DeflectionCriterion {
    #[default]
    #[serde(rename = "L/240")]
    L240,
    #[serde(rename = "L/360")]
    L360,
    /// L / n for a user-supplied n
    Custom(f64),
}

impl DeflectionCriterion {
    pub fn divisor(&self) -> f64 {
        match self {
            DeflectionCriterion::L240 => 240.0,
            DeflectionCriterion::L360 => 360.0,
            DeflectionCriterion::Custom(n) => *n,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if let DeflectionCriterion::Custom(n) = self {
            if !n.is_finite() || *n <= 0.0 {
                return Err(CalcError::invalid_input(
                    "deflection_criterion",
                    n.to_string(),
                    "Custom deflection divisor must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// Allowable deflection for a span
    pub fn limit(&self, span: Millimeters) -> Millimeters {
        Millimeters(span.0 / self.divisor())
    }

    /// Display form, e.g. "L / 240"
    pub fn label(&self) -> String {
        format!("L / {}", self.divisor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deflection_limit_ordering() {
        let span = Millimeters(4100.0);
        let l360 = DeflectionCriterion::L360.limit(span);
        let l240 = DeflectionCriterion::L240.limit(span);
        assert!(l360 < l240);
        assert!((l240.0 - 17.083_333).abs() < 1e-6);
    }

    #[test]
    fn test_custom_divisor() {
        let c = DeflectionCriterion::Custom(500.0);
        assert!(c.validate().is_ok());
        assert_eq!(c.limit(Millimeters(3000.0)).0, 6.0);
        assert_eq!(c.label(), "L / 500");

        assert!(DeflectionCriterion::Custom(0.0).validate().is_err());
        assert!(DeflectionCriterion::Custom(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_criterion_json() {
        assert_eq!(serde_json::to_string(&DeflectionCriterion::L240).unwrap(), "\"L/240\"");
        let c: DeflectionCriterion = serde_json::from_str("{\"Custom\":180.0}").unwrap();
        assert_eq!(c, DeflectionCriterion::Custom(180.0));
    }

    #[test]
    fn test_dead_load_without_insulation() {
        let d = DeadLoadInput {
            board_layers: 1,
            board_weight_kg_per_m2: 13.0,
            insulation_thickness_mm: None,
            frame_weight_kg_per_m2: 15.0,
        };
        let constants = DesignConstants::default();
        assert_eq!(d.areal_mass(&constants).0, 28.0);
        // 28 × 9.81 / 1000
        assert!((d.pressure(&constants).0 - 0.27468).abs() < 1e-12);
    }

    #[test]
    fn test_insulation_density() {
        let d = DeadLoadInput {
            insulation_thickness_mm: Some(100.0),
            ..DeadLoadInput::none()
        };
        let constants = DesignConstants {
            insulation_density_kg_per_m3: 32.0,
            ..DesignConstants::default()
        };
        assert!((d.insulation_mass(&constants).0 - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let d = DeadLoadInput {
            frame_weight_kg_per_m2: -1.0,
            ..DeadLoadInput::none()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_fixture_weight() {
        let w = DesignConstants::default().weight(Kilograms(8.0));
        assert!((w.0 - 78.48).abs() < 1e-9);
    }
}
