//! # Suspended Ceiling Calculation
//!
//! Verifies a suspended ceiling: a runner spanning between hangers, the
//! threaded-rod hanger carrying the runner, and the anchor holding the hanger
//! in the slab above.
//!
//! ```text
//!   ══════════╤═══════════════╤══════════  slab
//!             ▼ anchor        ▼
//!             │ hanger        │
//!   ──────────┴───────────────┴──────────  runner (span = hanger spacing)
//!             ←──── 920 ─────→
//! ```
//!
//! ## Assumptions
//!
//! - Runner simply supported between hangers, tributary width = runner spacing
//! - Wind (suction) and dead load only, both uniform
//! - Gross second moment of area for the runner deflection
//! - Each hanger carries one runner span, increased by an installation factor
//! - One anchor per hanger
//! - One material factor for runner and hanger unless the hanger is given
//!   its own

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::member::{
    record_capacities, record_checks, record_dead_line_load, record_total_deflection, record_totals,
    record_uniform_deflection, record_uniform_effects, record_wind_line_load, verdict, verify_member,
    MemberCapacities,
};
use crate::calculations::{DesignBasis, DEFAULT_LOAD_FACTOR};
use crate::components::{Anchor, Hanger, Section, SectionKind};
use crate::equations::capacity::hanger_tension_capacity;
use crate::equations::Equation;
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::loads::{DeadLoadInput, DeflectionCriterion, DesignConstants, LoadSource, LoadSummary, MemberLoads};
use crate::materials::MaterialProperties;
use crate::project::GlobalSettings;
use crate::trace::{format_newtons, format_number, CalculationTrace, TraceBuilder};
use crate::units::{KiloNewtons, Kilopascals, Millimeters, Newtons, NewtonsPerMillimeter};
use crate::verification::{CheckResult, VerificationResult};

/// Default installation factor on hanger and anchor tension
pub const DEFAULT_INSTALLATION_FACTOR: f64 = 1.4;

/// Default material factor for ceiling runners and hangers
pub const DEFAULT_CEILING_MATERIAL_FACTOR: f64 = 1.4;

/// Runner deflection superposes both uniform loads
const RUNNER_DEFLECTION_SOURCES: [LoadSource; 2] = [LoadSource::Wind, LoadSource::Dead];

/// Input parameters for a suspended ceiling.
///
/// ## JSON Example
///
/// ```json
/// {
///   "hanger_spacing_mm": 920.0,
///   "runner_spacing_mm": 610.0,
///   "wind_pressure_kpa": 0.24,
///   "dead_load": {
///     "board_layers": 1,
///     "board_weight_kg_per_m2": 9.5,
///     "frame_weight_kg_per_m2": 3.0
///   },
///   "installation_factor": 1.4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingSystemInput {
    /// Hanger spacing along the runner = runner span (mm)
    pub hanger_spacing_mm: f64,

    /// Runner spacing = tributary width (mm)
    pub runner_spacing_mm: f64,

    /// Runner steel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialProperties>,

    /// Material factor applied to the hanger rod; the runner's when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_material_factor: Option<f64>,

    /// Bearing length at the hanger clip (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing_length_mm: Option<f64>,

    /// Wind suction pw (kPa)
    #[serde(default)]
    pub wind_pressure_kpa: f64,

    #[serde(default = "default_load_factor")]
    pub wind_load_factor: f64,

    #[serde(default = "DeadLoadInput::none")]
    pub dead_load: DeadLoadInput,

    #[serde(default = "default_load_factor")]
    pub dead_load_factor: f64,

    /// γi, multiplies the hanger and anchor demand
    #[serde(default = "default_installation_factor")]
    pub installation_factor: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deflection_criterion: Option<DeflectionCriterion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<DesignConstants>,
}

fn default_load_factor() -> f64 {
    DEFAULT_LOAD_FACTOR
}

fn default_installation_factor() -> f64 {
    DEFAULT_INSTALLATION_FACTOR
}

impl CeilingSystemInput {
    /// A typical ceiling: hangers at 920 mm, runners at 610 mm, 0.24 kPa
    /// suction, one 9.5 kg/m² board on a 3 kg/m² grid, loads factored by 1.5.
    /// Material, bearing, deflection limit and constants are left to the
    /// project settings.
    pub fn new() -> Self {
        CeilingSystemInput {
            hanger_spacing_mm: 920.0,
            runner_spacing_mm: 610.0,
            material: None,
            hardware_material_factor: None,
            bearing_length_mm: None,
            wind_pressure_kpa: 0.24,
            wind_load_factor: DEFAULT_LOAD_FACTOR,
            dead_load: DeadLoadInput {
                board_layers: 1,
                board_weight_kg_per_m2: 9.5,
                insulation_thickness_mm: None,
                frame_weight_kg_per_m2: 3.0,
            },
            dead_load_factor: DEFAULT_LOAD_FACTOR,
            installation_factor: DEFAULT_INSTALLATION_FACTOR,
            deflection_criterion: None,
            constants: None,
        }
    }

    /// Runner material, bearing, deflection limit and constants, each taken
    /// from `settings` when this input omits it. The runner material falls
    /// back to the project steel with the ceiling material factor.
    pub fn basis(&self, settings: &GlobalSettings) -> DesignBasis {
        DesignBasis {
            material: self.material.unwrap_or_else(|| settings.ceiling_material()),
            bearing_length_mm: self.bearing_length_mm.unwrap_or(settings.default_bearing_length_mm),
            deflection_criterion: self.deflection_criterion.unwrap_or(settings.default_deflection),
            constants: self.constants.unwrap_or(settings.constants),
        }
    }

    /// γm for the hanger rod: its own factor, else the runner's
    pub fn hanger_material_factor(&self, basis: &DesignBasis) -> f64 {
        self.hardware_material_factor.unwrap_or(basis.material.material_factor)
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("hanger_spacing_mm", self.hanger_spacing_mm)?;
        require_positive("runner_spacing_mm", self.runner_spacing_mm)?;
        if let Some(factor) = self.hardware_material_factor {
            require_positive("hardware_material_factor", factor)?;
        }
        require_positive("installation_factor", self.installation_factor)?;
        require_non_negative("wind_pressure_kpa", self.wind_pressure_kpa)?;
        require_non_negative("wind_load_factor", self.wind_load_factor)?;
        require_non_negative("dead_load_factor", self.dead_load_factor)?;
        self.dead_load.validate()?;
        Ok(())
    }

    fn span(&self) -> Millimeters {
        Millimeters(self.hanger_spacing_mm)
    }

    pub fn wind_line_load(&self) -> NewtonsPerMillimeter {
        Kilopascals(self.wind_pressure_kpa).over_width(Millimeters(self.runner_spacing_mm)) * self.wind_load_factor
    }

    pub fn dead_line_load(&self, constants: &DesignConstants) -> NewtonsPerMillimeter {
        self.dead_load
            .pressure(constants)
            .over_width(Millimeters(self.runner_spacing_mm))
            * self.dead_load_factor
    }
}

impl Default for CeilingSystemInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Ceiling calculation referencing catalog components by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingJob {
    pub label: String,
    pub runner_id: String,
    pub hanger_id: String,
    pub anchor_id: String,
    pub input: CeilingSystemInput,
}

/// Ceiling results: runner checks, hanger and anchor tension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingSystemResult {
    pub runner_id: String,
    pub hanger_id: String,
    pub anchor_id: String,

    /// Runner material, bearing, deflection limit and constants used
    pub basis: DesignBasis,

    /// γm applied to the hanger rod
    pub hanger_material_factor: f64,

    /// Runner demand per source and superposed moment and shear (N, N·mm, mm)
    pub loads: LoadSummary,

    pub capacities: MemberCapacities,

    /// Five runner checks
    pub runner: VerificationResult,

    /// Hanger tension (N)
    pub hanger: CheckResult,

    /// Anchor tension (N)
    pub anchor: CheckResult,

    /// Runner AND hanger AND anchor
    pub overall_result: bool,

    pub trace: CalculationTrace,
}

impl CeilingSystemResult {
    pub fn passes(&self) -> bool {
        self.overall_result
    }

    /// Highest ratio over the runner, hanger and anchor checks
    pub fn max_utilization(&self) -> f64 {
        self.runner.max_ratio().max(self.hanger.ratio).max(self.anchor.ratio)
    }

    /// Name of the check with the highest ratio
    pub fn governing_condition(&self) -> &'static str {
        let runner = self.runner.max_ratio();
        if runner >= self.hanger.ratio && runner >= self.anchor.ratio {
            self.runner.governing_check().display_name()
        } else if self.hanger.ratio >= self.anchor.ratio {
            "Hanger tension"
        } else {
            "Anchor tension"
        }
    }
}

/// Runner loads: wind and dead line loads over the hanger spacing.
pub fn build_loads(input: &CeilingSystemInput, constants: &DesignConstants) -> CalcResult<MemberLoads> {
    let mut loads = MemberLoads::new(input.span())?;
    loads.add_uniform(LoadSource::Wind, input.wind_line_load())?;
    loads.add_uniform(LoadSource::Dead, input.dead_line_load(constants))?;
    Ok(loads)
}

/// Verify a suspended ceiling, with the built-in defaults for omitted
/// material, bearing, deflection limit and constants.
///
/// # Arguments
///
/// * `input` - Spacings, loads, factors and runner material
/// * `runner` - Runner section; a stud section is rejected
/// * `hanger` - Hanger rod
/// * `anchor` - Anchor fixing the hanger
pub fn calculate(
    input: &CeilingSystemInput,
    runner: &Section,
    hanger: &Hanger,
    anchor: &Anchor,
) -> CalcResult<CeilingSystemResult> {
    calculate_with_settings(input, runner, hanger, anchor, &GlobalSettings::default())
}

/// Verify a suspended ceiling, taking omitted fields from project settings.
pub fn calculate_with_settings(
    input: &CeilingSystemInput,
    runner: &Section,
    hanger: &Hanger,
    anchor: &Anchor,
    settings: &GlobalSettings,
) -> CalcResult<CeilingSystemResult> {
    input.validate()?;
    let basis = input.basis(settings);
    basis.validate()?;
    let hanger_material_factor = input.hanger_material_factor(&basis);
    runner.validate()?;
    hanger.validate()?;
    anchor.validate()?;
    if runner.kind != SectionKind::Runner {
        return Err(CalcError::invalid_input(
            "runner_id",
            runner.id.clone(),
            format!("'{}' is a {}, a ceiling needs a runner section", runner.id, runner.kind.display_name()),
        ));
    }

    debug!(
        runner = %runner.id,
        hanger = %hanger.id,
        anchor = %anchor.id,
        span_mm = input.hanger_spacing_mm,
        "calculating ceiling system"
    );

    let e = basis.material.elastic_modulus_mpa;
    let i = runner.inertia_mm4;

    let loads = build_loads(input, &basis.constants)?;
    let summary = loads.summarize(e, i)?;
    let capacities = MemberCapacities::new(
        runner,
        &basis.material,
        basis.bearing_length_mm,
        basis.deflection_criterion,
        input.span(),
    );
    let deflection = summary.deflection_from(&RUNNER_DEFLECTION_SOURCES);
    let runner_checks = verify_member(&summary, deflection, &capacities)?;

    let line_load = loads.total_line_load();
    let hanger_demand = line_load.over_length(input.span()).value() * input.installation_factor;
    let hanger_capacity = hanger_tension_capacity(hanger.area_mm2, hanger.tensile_strength_mpa, hanger_material_factor);
    let hanger_check = CheckResult::evaluate(hanger_demand, hanger_capacity)?;

    let anchor_capacity = Newtons::from(KiloNewtons(anchor.design_resistance_kn));
    let anchor_check = CheckResult::evaluate(hanger_demand, anchor_capacity.value())?;

    let overall_result = runner_checks.overall_result && hanger_check.pass && anchor_check.pass;
    debug!(
        runner = %runner.id,
        overall = overall_result,
        hanger_ratio = hanger_check.ratio,
        anchor_ratio = anchor_check.ratio,
        "ceiling system verified"
    );

    let mut t = TraceBuilder::new();
    for (load, contribution) in loads.uniform_loads().iter().zip(&summary.contributions) {
        if load.line_load.value() == 0.0 {
            continue;
        }
        match load.source {
            LoadSource::Dead => record_dead_line_load(
                &mut t,
                input.dead_load_factor,
                &input.dead_load,
                &basis.constants,
                input.runner_spacing_mm,
                load.line_load.value(),
            ),
            _ => record_wind_line_load(
                &mut t,
                input.wind_load_factor,
                input.wind_pressure_kpa,
                input.runner_spacing_mm,
                load.line_load.value(),
            ),
        }
        record_uniform_effects(&mut t, load, contribution, input.hanger_spacing_mm);
        record_uniform_deflection(&mut t, load, contribution, input.hanger_spacing_mm, e, i);
    }
    record_totals(&mut t, &summary);
    record_total_deflection(&mut t, &summary, &RUNNER_DEFLECTION_SOURCES);
    record_capacities(&mut t, runner, &basis.material, basis.bearing_length_mm, &capacities);
    record_checks(&mut t, input.hanger_spacing_mm, basis.deflection_criterion, &capacities, &runner_checks);
    record_hardware(
        &mut t,
        input,
        line_load,
        hanger_material_factor,
        (hanger, &hanger_check),
        (anchor, &anchor_check),
    );

    Ok(CeilingSystemResult {
        runner_id: runner.id.clone(),
        hanger_id: hanger.id.clone(),
        anchor_id: anchor.id.clone(),
        basis,
        hanger_material_factor,
        loads: summary,
        capacities,
        runner: runner_checks,
        hanger: hanger_check,
        anchor: anchor_check,
        overall_result,
        trace: t.finish(),
    })
}

fn record_hardware(
    t: &mut TraceBuilder,
    input: &CeilingSystemInput,
    line_load: NewtonsPerMillimeter,
    hanger_material_factor: f64,
    (hanger, hanger_check): (&Hanger, &CheckResult),
    (anchor, anchor_check): (&Anchor, &CheckResult),
) {
    let n = format_number;
    t.record(
        "Hanger tension",
        Equation::HangerTensionDemand,
        format!(
            "{} × {} × {}",
            n(line_load.value()),
            n(input.hanger_spacing_mm),
            n(input.installation_factor)
        ),
        format_newtons(hanger_check.demand),
    )
    .record(
        format!("Hanger capacity ({})", hanger.id),
        Equation::HangerTensionCapacity,
        format!(
            "{} × {} / {}",
            n(hanger.area_mm2),
            n(hanger.tensile_strength_mpa),
            n(hanger_material_factor)
        ),
        format_newtons(hanger_check.capacity),
    )
    .record(
        "Hanger check",
        Equation::UtilizationRatio,
        format!("{:.2} / {:.2}", hanger_check.demand, hanger_check.capacity),
        verdict(hanger_check),
    )
    .record(
        "Anchor tension",
        Equation::AnchorTensionDemand,
        format!("{:.2}", anchor_check.demand),
        format_newtons(anchor_check.demand),
    )
    .record(
        format!("Anchor capacity ({})", anchor.id),
        Equation::AnchorTensionCapacity,
        format!("{} × 1000", n(anchor.design_resistance_kn)),
        format_newtons(anchor_check.capacity),
    )
    .record(
        "Anchor check",
        Equation::UtilizationRatio,
        format!("{:.2} / {:.2}", anchor_check.demand, anchor_check.capacity),
        verdict(anchor_check),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Catalog, ComponentRepository};

    fn run(input: &CeilingSystemInput, runner: &str, hanger: &str, anchor: &str) -> CalcResult<CeilingSystemResult> {
        let catalog = Catalog::builtin();
        calculate(
            input,
            catalog.find_section(runner)?,
            catalog.find_hanger(hanger)?,
            catalog.find_anchor(anchor)?,
        )
    }

    #[test]
    fn test_default_ceiling_loads() {
        let input = CeilingSystemInput::new();
        // 1.5 × 0.24 × 610 / 1000
        assert!((input.wind_line_load().value() - 0.2196).abs() < 1e-12);
        // 1.5 × 9.81 × 12.5 × 610 / 1e6
        assert!((input.dead_line_load(&DesignConstants::default()).value() - 0.112_201_875).abs() < 1e-12);
    }

    #[test]
    fn test_hanger_and_anchor_demand() {
        let result = run(&CeilingSystemInput::new(), "RRC19x40x0.6t", "M10", "HST3-M10").unwrap();
        // (0.2196 + 0.112201875) × 920 × 1.4
        let expected = 0.331_801_875 * 920.0 * 1.4;
        assert!((result.hanger.demand - expected).abs() < 1e-6);
        assert_eq!(result.anchor.demand, result.hanger.demand);
        assert!((result.hanger.capacity - 58.0 * 400.0 / 1.4).abs() < 1e-6);
        assert!((result.anchor.capacity - 11_200.0).abs() < 1e-9);
        assert!(result.hanger.pass);
        assert!(result.anchor.pass);
    }

    #[test]
    fn test_runner_uses_gross_inertia() {
        let catalog = Catalog::builtin();
        let runner = catalog.find_section("FRC38x12x0.8t").unwrap();
        let result = run(&CeilingSystemInput::new(), "FRC38x12x0.8t", "M8", "HST3-M8").unwrap();

        let w = 0.331_801_875;
        let expected = 5.0 * w * 920.0_f64.powi(4) / (384.0 * 205_000.0 * runner.inertia_mm4);
        assert!((result.runner.deflection.demand - expected).abs() < 1e-9);
    }

    #[test]
    fn test_overall_is_and_of_parts() {
        let result = run(&CeilingSystemInput::new(), "FRC38x12x0.8t", "M8", "HST3-M8").unwrap();
        assert_eq!(
            result.overall_result,
            result.runner.overall_result && result.hanger.pass && result.anchor.pass
        );

        // Heavy lining on a long span overloads the hanger
        let mut heavy = CeilingSystemInput::new();
        heavy.hanger_spacing_mm = 1200.0;
        heavy.runner_spacing_mm = 1200.0;
        heavy.dead_load.board_layers = 40;
        heavy.dead_load.board_weight_kg_per_m2 = 25.0;
        let result = run(&heavy, "FRC38x12x0.8t", "M8", "HST3-M8").unwrap();
        assert!(!result.hanger.pass);
        assert!(!result.overall_result);
        assert_eq!(result.governing_condition(), result.runner.governing_check().display_name());
    }

    #[test]
    fn test_web_crippling_at_hanger_clip() {
        let mut input = CeilingSystemInput::new();
        input.bearing_length_mm = Some(50.0);
        let long = run(&input, "FRC38x12x0.8t", "M8", "HST3-M8").unwrap();
        input.bearing_length_mm = Some(20.0);
        let short = run(&input, "FRC38x12x0.8t", "M8", "HST3-M8").unwrap();
        assert!(long.runner.web_crippling.capacity > short.runner.web_crippling.capacity);
        assert_eq!(long.runner.web_crippling.demand, long.runner.shear_force.demand);
    }

    #[test]
    fn test_one_material_factor_for_runner_and_hanger() {
        let result = run(&CeilingSystemInput::new(), "RRC19x40x0.6t", "M10", "HST3-M10").unwrap();
        assert_eq!(result.basis.material.material_factor, 1.4);
        assert_eq!(result.hanger_material_factor, 1.4);
        // 200 × Sxe / 1.4 for the runner as well as the hanger
        let runner = Catalog::builtin().find_section("RRC19x40x0.6t").unwrap();
        let expected = 200.0 * runner.effective_modulus_mm3 / 1.4;
        assert!((result.capacities.bending_capacity_n_mm - expected).abs() < 1e-6);

        let mut input = CeilingSystemInput::new();
        input.material = Some(MaterialProperties::new(200.0, 205_000.0, 1.2));
        let result = run(&input, "RRC19x40x0.6t", "M10", "HST3-M10").unwrap();
        assert_eq!(result.hanger_material_factor, 1.2);

        input.hardware_material_factor = Some(1.5);
        let result = run(&input, "RRC19x40x0.6t", "M10", "HST3-M10").unwrap();
        assert_eq!(result.hanger_material_factor, 1.5);
        assert_eq!(result.basis.material.material_factor, 1.2);
    }

    #[test]
    fn test_stud_section_rejected() {
        let err = run(&CeilingSystemInput::new(), "C75x45x0.8t", "M8", "HST3-M8").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_components() {
        let input = CeilingSystemInput::new();
        assert_eq!(run(&input, "RRC19x40x0.6t", "M16", "HST3-M8").unwrap_err().error_code(), "HANGER_NOT_FOUND");
        assert_eq!(run(&input, "RRC19x40x0.6t", "M8", "HST3-M16").unwrap_err().error_code(), "ANCHOR_NOT_FOUND");
        assert_eq!(run(&input, "RRC99", "M8", "HST3-M8").unwrap_err().error_code(), "SECTION_NOT_FOUND");
    }

    #[test]
    fn test_installation_factor_must_be_positive() {
        let mut input = CeilingSystemInput::new();
        input.installation_factor = 0.0;
        assert!(run(&input, "RRC19x40x0.6t", "M8", "HST3-M8").is_err());
    }

    #[test]
    fn test_trace_has_hardware_steps() {
        let result = run(&CeilingSystemInput::new(), "RRC19x40x0.6t", "M12", "HST3-M12").unwrap();
        let trace = &result.trace;
        let tc = trace.find(Equation::HangerTensionCapacity).unwrap();
        assert_eq!(tc.formula, "Tc = As × fu / Ym");
        assert_eq!(tc.substitution, "Tc = 84.3 × 400 / 1.4");
        assert!(trace.find(Equation::AnchorTensionCapacity).is_some());
        assert!(trace.find_symbol("Mw").is_some());
        assert!(trace.find_symbol("Md").is_some());
        assert!(trace.find_symbol("Mq").is_none());
        // five runner checks plus hanger and anchor
        let checks = trace.steps().iter().filter(|s| s.equation == Equation::UtilizationRatio).count();
        assert_eq!(checks, 7);
    }
}
