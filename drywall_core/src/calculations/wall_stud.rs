//! # Wall Stud Calculation
//!
//! Verifies a cold-formed steel partition stud spanning floor track to head
//! track under four load sources, superposed:
//!
//! - Wind pressure, uniform over the stud spacing
//! - Imposed line load (crowd, handrail) at a height above the floor
//! - Wall fixtures hung at a height, shared by the studs within their spacing
//! - Self-weight of boards, insulation and frame
//!
//! ## Assumptions
//!
//! - Simply-supported stud (pin at both tracks)
//! - Effective section properties for bending and deflection
//! - Boards restrain the stud against lateral-torsional buckling
//! - Web-crippling demand is the larger track reaction
//! - Deflection demand is the imposed-load expression of the reference
//!   calculation; wind, dead and fixture loads enter strength checks only
//!
//! ## Example
//!
//! ```rust
//! use drywall_core::calculations::wall_stud::{calculate, WallStudInput};
//! use drywall_core::components::{Catalog, ComponentRepository};
//!
//! let stud = Catalog::builtin().find_section("C75x45x0.8t").unwrap();
//! let input = WallStudInput::new(2700.0);
//!
//! let result = calculate(&input, stud).unwrap();
//! assert_eq!(result.basis.bearing_length_mm, 32.0);
//! println!("Design moment: {:.2} kN·mm", result.design_moment_kn_mm());
//! println!("Governing: {}", result.governing_check());
//! assert_eq!(result.verification.overall_result, result.passes());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::member::{
    record_capacities, record_checks, record_dead_line_load, record_totals, record_uniform_effects,
    record_wind_line_load, verify_member, MemberCapacities,
};
use crate::calculations::{DesignBasis, DEFAULT_LOAD_FACTOR};
use crate::components::{Section, SectionKind};
use crate::equations::Equation;
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::loads::{
    DeadLoadInput, DeflectionCriterion, DesignConstants, LoadContribution, LoadSource, LoadSummary,
    MemberLoads, PointLoad,
};
use crate::materials::MaterialProperties;
use crate::project::GlobalSettings;
use crate::trace::{
    format_kn_mm, format_mm, format_newtons, format_number, CalculationTrace, TraceBuilder,
};
use crate::units::{
    KiloNewtonMillimeters, KiloNewtonsPerMeter, Kilograms, Kilopascals, Meters, Millimeters, Newtons,
    NewtonsPerMillimeter,
};
use crate::verification::{CheckKind, VerificationResult};

/// A fixture hung on the wall (cabinet, basin, handrail bracket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureInput {
    /// Fixture mass (kg)
    pub mass_kg: f64,

    /// Height of the fixture load above the floor (m)
    pub height_m: f64,

    /// Centre-to-centre spacing of fixtures along the wall (mm).
    /// Zero means a single fixture carried entirely by one stud.
    pub spacing_mm: f64,

    /// Fixture load factor γf
    pub load_factor: f64,
}

impl FixtureInput {
    /// Fraction of one fixture carried by a stud, Tw / s
    pub fn share(&self, tributary_width_mm: f64) -> f64 {
        if self.spacing_mm > 0.0 {
            tributary_width_mm / self.spacing_mm
        } else {
            1.0
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_negative("fixture.mass_kg", self.mass_kg)?;
        require_non_negative("fixture.height_m", self.height_m)?;
        require_non_negative("fixture.spacing_mm", self.spacing_mm)?;
        require_non_negative("fixture.load_factor", self.load_factor)?;
        Ok(())
    }
}

/// Input parameters for a wall stud.
///
/// Lengths are in mm except load heights (m). Pressures in kPa, line loads in
/// kN/m, masses in kg.
///
/// ## JSON Example
///
/// ```json
/// {
///   "span_mm": 4100.0,
///   "tributary_width_mm": 406.0,
///   "material": { "yield_strength_mpa": 200.0, "elastic_modulus_mpa": 205000.0, "material_factor": 1.2 },
///   "bearing_length_mm": 32.0,
///   "wind_pressure_kpa": 0.0,
///   "imposed_load_kn_per_m": 0.75,
///   "imposed_load_height_m": 1.1,
///   "imposed_load_factor": 1.6,
///   "deflection_criterion": "L/240"
/// }
/// ```
///
/// Omitted loads and factors take their defaults: no wind, imposed load or
/// fixture, no lining, load factors of 1.5. Omitted material, bearing length,
/// deflection criterion and constants come from the project settings
/// (Py 200 MPa, γm 1.2, 32 mm, L/240 outside a project).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStudInput {
    /// Stud height, floor track to head track (mm)
    pub span_mm: f64,

    /// Stud spacing Tw (mm)
    pub tributary_width_mm: f64,

    /// Stud steel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialProperties>,

    /// Bearing length Ny at the tracks (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing_length_mm: Option<f64>,

    /// Wind pressure pw (kPa)
    #[serde(default)]
    pub wind_pressure_kpa: f64,

    #[serde(default = "default_load_factor")]
    pub wind_load_factor: f64,

    /// Imposed line load along the wall W (kN/m)
    #[serde(default)]
    pub imposed_load_kn_per_m: f64,

    /// Height of the imposed load above the floor h (m)
    #[serde(default)]
    pub imposed_load_height_m: f64,

    /// Imposed load factor Qk
    #[serde(default = "default_load_factor")]
    pub imposed_load_factor: f64,

    #[serde(default = "DeadLoadInput::none")]
    pub dead_load: DeadLoadInput,

    #[serde(default = "default_load_factor")]
    pub dead_load_factor: f64,

    #[serde(default)]
    pub fixture: Option<FixtureInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deflection_criterion: Option<DeflectionCriterion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<DesignConstants>,
}

fn default_load_factor() -> f64 {
    DEFAULT_LOAD_FACTOR
}

impl WallStudInput {
    /// A typical partition: studs at 610 mm, 0.24 kPa wind, 0.75 kN/m at
    /// 1.1 m, one 13 kg/m² board layer on a 15 kg/m² frame, an 8 kg fixture
    /// at 1.8 m every 600 mm, all loads factored by 1.5. Material, bearing,
    /// deflection limit and constants are left to the project settings.
    pub fn new(span_mm: f64) -> Self {
        WallStudInput {
            span_mm,
            tributary_width_mm: 610.0,
            material: None,
            bearing_length_mm: None,
            wind_pressure_kpa: 0.24,
            wind_load_factor: DEFAULT_LOAD_FACTOR,
            imposed_load_kn_per_m: 0.75,
            imposed_load_height_m: 1.1,
            imposed_load_factor: DEFAULT_LOAD_FACTOR,
            dead_load: DeadLoadInput {
                board_layers: 1,
                board_weight_kg_per_m2: 13.0,
                insulation_thickness_mm: None,
                frame_weight_kg_per_m2: 15.0,
            },
            dead_load_factor: DEFAULT_LOAD_FACTOR,
            fixture: Some(FixtureInput {
                mass_kg: 8.0,
                height_m: 1.8,
                spacing_mm: 600.0,
                load_factor: DEFAULT_LOAD_FACTOR,
            }),
            deflection_criterion: None,
            constants: None,
        }
    }

    /// Material, bearing, deflection limit and constants, each taken from
    /// `settings` when this input omits it.
    pub fn basis(&self, settings: &GlobalSettings) -> DesignBasis {
        DesignBasis {
            material: self.material.unwrap_or(settings.default_material),
            bearing_length_mm: self.bearing_length_mm.unwrap_or(settings.default_bearing_length_mm),
            deflection_criterion: self.deflection_criterion.unwrap_or(settings.default_deflection),
            constants: self.constants.unwrap_or(settings.constants),
        }
    }

    /// Validate input parameters.
    ///
    /// Every value that ends up in a denominator must be strictly positive;
    /// loads and factors may be zero but not negative.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("span_mm", self.span_mm)?;
        require_positive("tributary_width_mm", self.tributary_width_mm)?;
        require_non_negative("wind_pressure_kpa", self.wind_pressure_kpa)?;
        require_non_negative("wind_load_factor", self.wind_load_factor)?;
        require_non_negative("imposed_load_kn_per_m", self.imposed_load_kn_per_m)?;
        require_non_negative("imposed_load_height_m", self.imposed_load_height_m)?;
        require_non_negative("imposed_load_factor", self.imposed_load_factor)?;
        require_non_negative("dead_load_factor", self.dead_load_factor)?;
        self.dead_load.validate()?;
        if let Some(fixture) = &self.fixture {
            fixture.validate()?;
        }
        Ok(())
    }

    fn span(&self) -> Millimeters {
        Millimeters(self.span_mm)
    }

    fn tributary_width(&self) -> Millimeters {
        Millimeters(self.tributary_width_mm)
    }

    /// Factored wind line load γw × pw × Tw
    pub fn wind_line_load(&self) -> NewtonsPerMillimeter {
        Kilopascals(self.wind_pressure_kpa).over_width(self.tributary_width()) * self.wind_load_factor
    }

    /// Factored dead line load
    pub fn dead_line_load(&self, constants: &DesignConstants) -> NewtonsPerMillimeter {
        self.dead_load.pressure(constants).over_width(self.tributary_width()) * self.dead_load_factor
    }

    /// Factored imposed point load Qk × W × Tw
    pub fn imposed_point_load(&self) -> Newtons {
        NewtonsPerMillimeter::from(KiloNewtonsPerMeter(self.imposed_load_kn_per_m))
            .over_length(self.tributary_width())
            * self.imposed_load_factor
    }

    /// Factored fixture point load carried by one stud
    pub fn fixture_point_load(&self, constants: &DesignConstants) -> Newtons {
        match &self.fixture {
            Some(f) => constants.weight(Kilograms(f.mass_kg)) * f.load_factor * f.share(self.tributary_width_mm),
            None => Newtons(0.0),
        }
    }
}

/// Wall-stud calculation referencing a catalog stud by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStudJob {
    /// User label (e.g., "Partition P-3, corridor side")
    pub label: String,

    /// Catalog id of the stud section
    pub stud_id: String,

    pub input: WallStudInput,
}

/// Wall-stud results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStudResult {
    pub section_id: String,

    /// Material, bearing, deflection limit and constants used
    pub basis: DesignBasis,

    /// Per-source demand and superposed moment and shear (N, N·mm, mm)
    pub loads: LoadSummary,

    /// Resistances, web-crippling coefficients and the deflection limit
    pub capacities: MemberCapacities,

    /// The five checks and the overall verdict
    pub verification: VerificationResult,

    pub trace: CalculationTrace,
}

impl WallStudResult {
    pub fn passes(&self) -> bool {
        self.verification.overall_result
    }

    pub fn governing_check(&self) -> CheckKind {
        self.verification.governing_check()
    }

    /// Highest utilization ratio
    pub fn max_utilization(&self) -> f64 {
        self.verification.max_ratio()
    }

    pub fn design_moment(&self) -> KiloNewtonMillimeters {
        self.loads.total_moment.into()
    }

    pub fn design_moment_kn_mm(&self) -> f64 {
        self.design_moment().value()
    }

    pub fn design_shear_n(&self) -> f64 {
        self.loads.total_shear.value()
    }

    /// Deflection demand of the deflection check (imposed load only)
    pub fn max_deflection_mm(&self) -> f64 {
        self.verification.deflection.demand
    }
}

/// Factored loads on the stud: wind and dead as line loads, imposed and
/// fixture as point loads at their heights.
pub fn build_loads(input: &WallStudInput, constants: &DesignConstants) -> CalcResult<MemberLoads> {
    let mut loads = MemberLoads::new(input.span())?;
    loads.add_uniform(LoadSource::Wind, input.wind_line_load())?;
    loads.add_uniform(LoadSource::Dead, input.dead_line_load(constants))?;
    loads.add_point(
        LoadSource::Imposed,
        input.imposed_point_load(),
        Meters(input.imposed_load_height_m).into(),
    )?;
    if let Some(fixture) = &input.fixture {
        loads.add_point(
            LoadSource::Fixture,
            input.fixture_point_load(constants),
            Meters(fixture.height_m).into(),
        )?;
    }
    Ok(loads)
}

/// Verify a wall stud, with the built-in defaults for omitted material,
/// bearing, deflection limit and constants.
///
/// # Arguments
///
/// * `input` - Geometry, loads, factors and material
/// * `section` - Stud section; a runner section is rejected
///
/// # Returns
///
/// * `Ok(WallStudResult)` - All five checks with the trace
/// * `Err(CalcError)` - Invalid input, or a capacity that is not positive
pub fn calculate(input: &WallStudInput, section: &Section) -> CalcResult<WallStudResult> {
    calculate_with_settings(input, section, &GlobalSettings::default())
}

/// Verify a wall stud, taking omitted fields from project settings.
pub fn calculate_with_settings(
    input: &WallStudInput,
    section: &Section,
    settings: &GlobalSettings,
) -> CalcResult<WallStudResult> {
    input.validate()?;
    let basis = input.basis(settings);
    basis.validate()?;
    section.validate()?;
    if section.kind != SectionKind::Stud {
        return Err(CalcError::invalid_input(
            "section_id",
            section.id.clone(),
            format!("'{}' is a {}, a wall stud needs a stud section", section.id, section.kind.display_name()),
        ));
    }

    debug!(section = %section.id, span_mm = input.span_mm, "calculating wall stud");

    let e = basis.material.elastic_modulus_mpa;
    let i = section.effective_inertia_mm4;

    let loads = build_loads(input, &basis.constants)?;
    let summary = loads.summarize(e, i)?;
    let capacities = MemberCapacities::new(
        section,
        &basis.material,
        basis.bearing_length_mm,
        basis.deflection_criterion,
        input.span(),
    );
    let deflection = summary.deflection_from(&[LoadSource::Imposed]);
    let verification = verify_member(&summary, deflection, &capacities)?;

    debug!(
        section = %section.id,
        overall = verification.overall_result,
        governing = %verification.governing_check(),
        "wall stud verified"
    );

    let trace = build_trace(input, &basis, section, &loads, &summary, &capacities, &verification);

    Ok(WallStudResult {
        section_id: section.id.clone(),
        basis,
        loads: summary,
        capacities,
        verification,
        trace,
    })
}

fn build_trace(
    input: &WallStudInput,
    basis: &DesignBasis,
    section: &Section,
    loads: &MemberLoads,
    summary: &LoadSummary,
    capacities: &MemberCapacities,
    verification: &VerificationResult,
) -> CalculationTrace {
    let l = input.span_mm;

    let mut t = TraceBuilder::new();
    let uniform_count = loads.uniform_loads().len();

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
                input.tributary_width_mm,
                load.line_load.value(),
            ),
            _ => record_wind_line_load(
                &mut t,
                input.wind_load_factor,
                input.wind_pressure_kpa,
                input.tributary_width_mm,
                load.line_load.value(),
            ),
        }
        record_uniform_effects(&mut t, load, contribution, l);
    }

    for (load, contribution) in loads.point_loads().iter().zip(summary.contributions.iter().skip(uniform_count)) {
        if load.load.value() == 0.0 {
            continue;
        }
        match load.source {
            LoadSource::Imposed => record_imposed(&mut t, input, basis, section, load, contribution),
            _ => record_fixture(&mut t, input, basis, load, contribution),
        }
    }

    record_totals(&mut t, summary);
    record_capacities(&mut t, section, &basis.material, basis.bearing_length_mm, capacities);
    record_checks(&mut t, l, basis.deflection_criterion, capacities, verification);
    t.finish()
}

fn record_imposed(
    t: &mut TraceBuilder,
    input: &WallStudInput,
    basis: &DesignBasis,
    section: &Section,
    load: &PointLoad,
    c: &LoadContribution,
) {
    let n = format_number;
    let factored = format!(
        "{} × {} × {}",
        n(input.imposed_load_factor),
        n(input.imposed_load_kn_per_m),
        n(input.tributary_width_mm)
    );
    let h = n(load.position.value());
    let l = n(input.span_mm);

    t.record("Imposed load", Equation::ImposedPointLoad, factored.as_str(), format_newtons(load.load.value()))
        .record(
            "Imposed load moment",
            Equation::ImposedLoadMoment,
            format!("{} × {} × ({} - {}) / {}", factored, h, l, h, l),
            format_kn_mm(c.moment.value()),
        )
        .record(
            "Imposed load shear",
            Equation::ImposedLoadReaction,
            format!("{} × ({} - {}) / {}", factored, l, h, l),
            format_newtons(c.shear.value()),
        )
        .record(
            "Imposed load deflection",
            Equation::EccentricPointLoadDeflection,
            format!(
                "({} × {} × ({} - {}) × {}² × (3 × {} - 2 × {})) / (6 × {} × {} × 2)",
                n(input.imposed_load_factor * input.imposed_load_kn_per_m),
                n(input.tributary_width_mm),
                l,
                h,
                h,
                l,
                h,
                n(basis.material.elastic_modulus_mpa),
                n(section.effective_inertia_mm4)
            ),
            format_mm(c.deflection.value()),
        );
}

fn record_fixture(
    t: &mut TraceBuilder,
    input: &WallStudInput,
    basis: &DesignBasis,
    load: &PointLoad,
    c: &LoadContribution,
) {
    let n = format_number;
    let h = n(load.position.value());
    let l = n(input.span_mm);
    let p = n(load.load.value());

    if let Some(f) = &input.fixture {
        let share = if f.spacing_mm > 0.0 {
            format!("{} / {}", n(input.tributary_width_mm), n(f.spacing_mm))
        } else {
            "1".to_string()
        };
        t.record(
            "Fixture load",
            Equation::FixturePointLoad,
            format!(
                "{} × {} × {} × {}",
                n(f.load_factor),
                n(basis.constants.gravity_m_per_s2),
                n(f.mass_kg),
                share
            ),
            format_newtons(load.load.value()),
        );
    }
    t.record_as(
        "Fixture load moment",
        Equation::PointLoadMoment,
        "Mf",
        format!("{} × {} × ({} - {}) / {}", p, h, l, h, l),
        format_kn_mm(c.moment.value()),
    )
    .record_as(
        "Fixture load shear",
        Equation::PointLoadReaction,
        "Vf",
        format!("{} × ({} - {}) / {}", p, l, h, l),
        format_newtons(c.shear.value()),
    );
}
