//! # Drywall Framing Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results with checks and trace (JSON-serializable)
//! - `calculate(input, components..) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! The `*Job` wrappers reference components by catalog id and are what a
//! project file stores. Material, bearing length, deflection limit and
//! constants an input leaves out are taken from the project's
//! [`GlobalSettings`]; the values a calculation actually ran with are
//! reported as its [`DesignBasis`].
//!
//! ## Available Calculations
//!
//! - [`wall_stud`] - Partition stud under wind, imposed, fixture and dead loads
//! - [`ceiling_system`] - Suspended-ceiling runner, hanger and anchor

pub mod ceiling_system;
pub mod member;
pub mod wall_stud;

use serde::{Deserialize, Serialize};

use crate::components::{ComponentRepository, SectionKind};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::loads::{DeflectionCriterion, DesignConstants};
use crate::materials::MaterialProperties;
use crate::project::GlobalSettings;

// Re-export commonly used types
pub use ceiling_system::{CeilingJob, CeilingSystemInput, CeilingSystemResult};
pub use member::MemberCapacities;
pub use wall_stud::{FixtureInput, WallStudInput, WallStudJob, WallStudResult};

/// Bearing length at tracks and hanger clips when none is given (mm)
pub const DEFAULT_BEARING_LENGTH_MM: f64 = 32.0;

/// Load factor applied when none is given
pub const DEFAULT_LOAD_FACTOR: f64 = 1.5;

/// Material, bearing length, deflection limit and constants a calculation
/// ran with, after project defaults filled whatever the input omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignBasis {
    pub material: MaterialProperties,

    /// Bearing length Ny at tracks and hanger clips (mm)
    pub bearing_length_mm: f64,

    pub deflection_criterion: DeflectionCriterion,

    pub constants: DesignConstants,
}

impl DesignBasis {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("bearing_length_mm", self.bearing_length_mm)?;
        self.material.validate()?;
        self.deflection_criterion.validate()?;
        self.constants.validate()?;
        Ok(())
    }
}

/// Enum wrapper for all calculation types.
///
/// ## JSON Example
///
/// ```json
/// {
///   "type": "WallStud",
///   "label": "P-1",
///   "stud_id": "C75x45x0.8t",
///   "input": { "span_mm": 2700.0, "tributary_width_mm": 610.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Partition stud
    WallStud(WallStudJob),
    /// Suspended ceiling
    CeilingSystem(CeilingJob),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::WallStud(j) => &j.label,
            CalculationItem::CeilingSystem(j) => &j.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::WallStud(_) => "WallStud",
            CalculationItem::CeilingSystem(_) => "CeilingSystem",
        }
    }

    /// Resolve component ids against a repository and run the calculation,
    /// filling omitted input fields from `settings`.
    pub fn run(&self, repo: &dyn ComponentRepository, settings: &GlobalSettings) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::WallStud(job) => job.run_with_settings(repo, settings).map(CalculationOutput::WallStud),
            CalculationItem::CeilingSystem(job) => {
                job.run_with_settings(repo, settings).map(CalculationOutput::CeilingSystem)
            }
        }
    }
}

/// Result of running a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    WallStud(WallStudResult),
    CeilingSystem(CeilingSystemResult),
}

impl CalculationOutput {
    pub fn passes(&self) -> bool {
        match self {
            CalculationOutput::WallStud(r) => r.passes(),
            CalculationOutput::CeilingSystem(r) => r.passes(),
        }
    }

    pub fn max_utilization(&self) -> f64 {
        match self {
            CalculationOutput::WallStud(r) => r.max_utilization(),
            CalculationOutput::CeilingSystem(r) => r.max_utilization(),
        }
    }

    pub fn governing_condition(&self) -> &'static str {
        match self {
            CalculationOutput::WallStud(r) => r.governing_check().display_name(),
            CalculationOutput::CeilingSystem(r) => r.governing_condition(),
        }
    }
}

impl WallStudJob {
    /// Run with the built-in defaults for omitted fields.
    pub fn run(&self, repo: &dyn ComponentRepository) -> CalcResult<WallStudResult> {
        self.run_with_settings(repo, &GlobalSettings::default())
    }

    pub fn run_with_settings(
        &self,
        repo: &dyn ComponentRepository,
        settings: &GlobalSettings,
    ) -> CalcResult<WallStudResult> {
        let stud = repo.find_section_of_kind(component_id("stud_id", &self.stud_id)?, SectionKind::Stud)?;
        wall_stud::calculate_with_settings(&self.input, stud, settings)
    }
}

impl CeilingJob {
    /// Run with the built-in defaults for omitted fields.
    pub fn run(&self, repo: &dyn ComponentRepository) -> CalcResult<CeilingSystemResult> {
        self.run_with_settings(repo, &GlobalSettings::default())
    }

    pub fn run_with_settings(
        &self,
        repo: &dyn ComponentRepository,
        settings: &GlobalSettings,
    ) -> CalcResult<CeilingSystemResult> {
        let runner = repo.find_section_of_kind(component_id("runner_id", &self.runner_id)?, SectionKind::Runner)?;
        let hanger = repo.find_hanger(component_id("hanger_id", &self.hanger_id)?)?;
        let anchor = repo.find_anchor(component_id("anchor_id", &self.anchor_id)?)?;
        ceiling_system::calculate_with_settings(&self.input, runner, hanger, anchor, settings)
    }
}

/// A job's component id, trimmed; blank is a missing field.
fn component_id<'a>(field: &str, id: &'a str) -> CalcResult<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Catalog;

    fn stud_job(stud_id: &str) -> CalculationItem {
        CalculationItem::WallStud(WallStudJob {
            label: "P-1".to_string(),
            stud_id: stud_id.to_string(),
            input: WallStudInput::new(2700.0),
        })
    }

    #[test]
    fn test_item_json_tagged() {
        let json = serde_json::to_string(&stud_job("C75x45x1.0t")).unwrap();
        assert!(json.contains("\"type\":\"WallStud\""));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.label(), "P-1");
        assert_eq!(roundtrip.calc_type(), "WallStud");
    }

    #[test]
    fn test_item_from_minimal_json() {
        let json = r#"{
            "type": "CeilingSystem",
            "label": "Ceiling level 2",
            "runner_id": "RRC19x40x0.6t",
            "hanger_id": "M10",
            "anchor_id": "HST3-M10",
            "input": { "hanger_spacing_mm": 920.0, "runner_spacing_mm": 610.0 }
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.calc_type(), "CeilingSystem");
        let output = item.run(Catalog::builtin(), &GlobalSettings::default()).unwrap();
        assert!(matches!(output, CalculationOutput::CeilingSystem(_)));
    }

    #[test]
    fn test_run_resolves_ids() {
        let output = stud_job("C75x45x1.0t").run(Catalog::builtin(), &GlobalSettings::default()).unwrap();
        match &output {
            CalculationOutput::WallStud(r) => assert_eq!(r.section_id, "C75x45x1.0t"),
            other => panic!("unexpected output {:?}", other),
        }
        assert!(output.max_utilization() > 0.0);
    }

    #[test]
    fn test_unknown_stud_is_an_error() {
        let err = stud_job("C200x50x1.2t").run(Catalog::builtin(), &GlobalSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "SECTION_NOT_FOUND");
    }

    #[test]
    fn test_blank_component_id_is_missing() {
        let err = stud_job("  ").run(Catalog::builtin(), &GlobalSettings::default()).unwrap_err();
        assert_eq!(err, CalcError::missing_field("stud_id"));

        let ceiling = CeilingJob {
            label: "C-1".to_string(),
            runner_id: "RRC19x40x0.6t".to_string(),
            hanger_id: String::new(),
            anchor_id: "HST3-M10".to_string(),
            input: CeilingSystemInput::new(),
        };
        assert_eq!(ceiling.run(Catalog::builtin()).unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_runner_id_for_stud_rejected() {
        let err = stud_job("RRC19x40x0.6t").run(Catalog::builtin(), &GlobalSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
