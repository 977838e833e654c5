//! # Equation Registry
//!
//! Central registry of every formula the stud and ceiling checks use.
//! Each equation carries the symbol it produces, its right-hand side in the
//! notation of the hand calculations, a reference and variable definitions.
//!
//! The registry is the single source of formula text: calculation traces
//! print `Equation::formula()` verbatim, and `EQUATIONS.md` is generated from
//! the same metadata.
//!
//! ## Usage
//!
//! ```rust
//! use drywall_core::equations::registry::Equation;
//!
//! let meta = Equation::BendingCapacity.metadata();
//! assert_eq!(meta.symbol, "Mb");
//! assert_eq!(Equation::BendingCapacity.formula(), "Mb = Py × Sxe / Ym");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to the standard or document an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// BS 5950 - Structural use of steelwork in building
    BS5950 {
        part: u8,
        clause: &'static str,
    },
    /// Roark's Formulas for Stress and Strain
    Roarks {
        edition: u8,
        table: &'static str,
        case: &'static str,
    },
    /// Published drywall stud hand calculation (C75x45x0.8t, L = 4100 mm)
    StudReferenceCalculation {
        section: &'static str,
    },
    /// Manufacturer's product data (anchors, rods)
    Manufacturer {
        document: &'static str,
    },
    /// Fundamental mechanics (no specific code reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::BS5950 { part, clause } => {
                format!("BS 5950-{} Clause {}", part, clause)
            }
            CodeReference::Roarks { edition, table, case } => {
                format!("Roark's {}ed, {}, Case {}", edition, table, case)
            }
            CodeReference::StudReferenceCalculation { section } => {
                format!("Stud reference calculation, {}", section)
            }
            CodeReference::Manufacturer { document } => {
                format!("Manufacturer data: {}", document)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::BS5950 { .. } => "BS 5950",
            CodeReference::Roarks { .. } => "Roark's",
            CodeReference::StudReferenceCalculation { .. } => "Ref. calc",
            CodeReference::Manufacturer { .. } => "Manufacturer",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Factored loads from pressures, masses and factors
    Loads,
    /// Moments and shears
    InternalForces,
    /// Deflections
    Deflections,
    /// Empirical coefficients (web crippling)
    Coefficients,
    /// Section and hardware resistances
    Resistances,
    /// Limits and utilization ratios
    DesignChecks,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Loads => "Loads",
            EquationCategory::InternalForces => "Internal Forces",
            EquationCategory::Deflections => "Deflections",
            EquationCategory::Coefficients => "Coefficients",
            EquationCategory::Resistances => "Resistances",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order in the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Loads => 1,
            EquationCategory::InternalForces => 2,
            EquationCategory::Deflections => 3,
            EquationCategory::Coefficients => 4,
            EquationCategory::Resistances => 5,
            EquationCategory::DesignChecks => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the equation calculates
    pub description: &'static str,
    /// Left-hand side symbol (e.g., "Mb")
    pub symbol: &'static str,
    /// Right-hand side in hand-calculation notation (e.g., "Py × Sxe / Ym")
    pub expression: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

impl EquationMetadata {
    /// "symbol = expression"
    pub fn formula(&self) -> String {
        format!("{} = {}", self.symbol, self.expression)
    }
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every equation used by the stud and ceiling checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // Loads
    WindLineLoad,
    DeadLineLoad,
    ImposedPointLoad,
    FixturePointLoad,

    // Internal forces
    UniformLoadMaxMoment,
    UniformLoadReaction,
    ImposedLoadMoment,
    ImposedLoadReaction,
    PointLoadMoment,
    PointLoadReaction,
    TotalMoment,
    TotalShear,

    // Deflections
    UniformLoadMaxDeflection,
    EccentricPointLoadDeflection,
    TotalDeflection,

    // Web crippling coefficients
    WebCripplingKw,
    WebCripplingC3,
    WebCripplingC4,

    // Resistances
    BendingCapacity,
    ShearCapacity,
    WebCripplingCapacity,
    HangerTensionCapacity,
    AnchorTensionCapacity,

    // Ceiling hardware demand
    HangerTensionDemand,
    AnchorTensionDemand,

    // Checks
    DeflectionLimit,
    CombinedActionRatio,
    UtilizationRatio,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // -----------------------------------------------------------------
            // Loads
            // -----------------------------------------------------------------
            Equation::WindLineLoad => EquationMetadata {
                name: "Factored Wind Line Load",
                description: "Wind pressure collected over the tributary width of one member",
                symbol: "ww",
                expression: "γw × pw × Tw / 1000",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("γw", "Wind load factor", "-"),
                    Variable::new("pw", "Wind pressure", "kPa"),
                    Variable::new("Tw", "Tributary width (stud or runner spacing)", "mm"),
                ],
                assumptions: vec!["Pressure uniform over the full span"],
                category: EquationCategory::Loads,
                source_module: "units.rs",
                source_function: "Kilopascals::over_width",
            },

            Equation::DeadLineLoad => EquationMetadata {
                name: "Factored Dead Line Load",
                description: "Self-weight of boards, insulation and frame collected over the tributary width",
                symbol: "wd",
                expression: "γd × g × (n × mb + ti × ρi + mf) × Tw / 10⁶",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("γd", "Dead load factor", "-"),
                    Variable::new("g", "Gravitational acceleration", "m/s²"),
                    Variable::new("n", "Number of board layers", "-"),
                    Variable::new("mb", "Board areal mass", "kg/m²"),
                    Variable::new("ti", "Insulation thickness (0 when absent)", "m"),
                    Variable::new("ρi", "Insulation density", "kg/m³"),
                    Variable::new("mf", "Frame areal mass", "kg/m²"),
                    Variable::new("Tw", "Tributary width", "mm"),
                ],
                assumptions: vec!["Self-weight treated as a uniform line load on the member"],
                category: EquationCategory::Loads,
                source_module: "loads/mod.rs",
                source_function: "DeadLoadInput::pressure",
            },

            Equation::ImposedPointLoad => EquationMetadata {
                name: "Factored Imposed Point Load",
                description: "Imposed line load on the wall collected by one stud and applied at its height",
                symbol: "Pq",
                expression: "Qk × W × Tw",
                reference: CodeReference::StudReferenceCalculation { section: "Design data" },
                variables: vec![
                    Variable::new("Qk", "Imposed load factor", "-"),
                    Variable::new("W", "Imposed line load", "kN/m"),
                    Variable::new("Tw", "Stud spacing", "mm"),
                ],
                assumptions: vec!["Line load along the wall acts as a point load on each stud"],
                category: EquationCategory::Loads,
                source_module: "calculations/wall_stud.rs",
                source_function: "build_loads",
            },

            Equation::FixturePointLoad => EquationMetadata {
                name: "Factored Fixture Point Load",
                description: "Weight of a wall fixture shared by the studs within its spacing",
                symbol: "Pf",
                expression: "γf × g × m × Tw / s",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("γf", "Fixture load factor", "-"),
                    Variable::new("m", "Fixture mass", "kg"),
                    Variable::new("Tw", "Stud spacing", "mm"),
                    Variable::new("s", "Fixture spacing along the wall (Tw / s = 1 when s = 0)", "mm"),
                ],
                assumptions: vec!["Fixture load acts laterally at its installation height"],
                category: EquationCategory::Loads,
                source_module: "calculations/wall_stud.rs",
                source_function: "build_loads",
            },

            // -----------------------------------------------------------------
            // Internal forces
            // -----------------------------------------------------------------
            Equation::UniformLoadMaxMoment => EquationMetadata {
                name: "Maximum Moment for Uniform Load",
                description: "Midspan moment of a simply-supported member under a uniform line load",
                symbol: "M",
                expression: "w × L² / 8",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "2a" },
                variables: vec![
                    Variable::new("w", "Factored line load", "N/mm"),
                    Variable::new("L", "Span", "mm"),
                ],
                assumptions: vec!["Simply-supported (pin-roller)", "Uniform load over full span"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "uniform_load_max_moment",
            },

            Equation::UniformLoadReaction => EquationMetadata {
                name: "Support Reaction for Uniform Load",
                description: "End reaction (maximum shear) under a uniform line load",
                symbol: "V",
                expression: "w × L / 2",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "2a" },
                variables: vec![
                    Variable::new("w", "Factored line load", "N/mm"),
                    Variable::new("L", "Span", "mm"),
                ],
                assumptions: vec!["Simply-supported (pin-roller)"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "uniform_load_reactions",
            },

            Equation::ImposedLoadMoment => EquationMetadata {
                name: "Design Moment for Imposed Load",
                description: "Moment under the imposed point load at height h",
                symbol: "Mq",
                expression: "Qk × W × Tw × h × (L - h) / L",
                reference: CodeReference::StudReferenceCalculation { section: "Check bending" },
                variables: vec![
                    Variable::new("Qk", "Imposed load factor", "-"),
                    Variable::new("W", "Imposed line load", "kN/m"),
                    Variable::new("Tw", "Stud spacing", "mm"),
                    Variable::new("h", "Load height above the floor", "mm"),
                    Variable::new("L", "Span", "mm"),
                ],
                assumptions: vec!["Simply-supported stud", "Moment taken under the load"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "point_load_max_moment",
            },

            Equation::ImposedLoadReaction => EquationMetadata {
                name: "Support Reaction for Imposed Load",
                description: "Floor-track reaction under the imposed point load",
                symbol: "Vq",
                expression: "Qk × W × Tw × (L - h) / L",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "1a" },
                variables: vec![
                    Variable::new("h", "Load height above the floor", "mm"),
                    Variable::new("L", "Span", "mm"),
                ],
                assumptions: vec!["Reaction at the support nearest the load origin"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "point_load_reactions",
            },

            Equation::PointLoadMoment => EquationMetadata {
                name: "Point Load Moment",
                description: "Moment under a point load at distance h from the base support",
                symbol: "M",
                expression: "P × h × (L - h) / L",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "1a" },
                variables: vec![
                    Variable::new("P", "Factored point load", "N"),
                    Variable::new("h", "Load position", "mm"),
                    Variable::new("L", "Span", "mm"),
                ],
                assumptions: vec!["Simply-supported (pin-roller)"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "point_load_max_moment",
            },

            Equation::PointLoadReaction => EquationMetadata {
                name: "Point Load Reaction",
                description: "Base reaction under a point load at distance h",
                symbol: "V",
                expression: "P × (L - h) / L",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "1a" },
                variables: vec![
                    Variable::new("P", "Factored point load", "N"),
                    Variable::new("h", "Load position", "mm"),
                    Variable::new("L", "Span", "mm"),
                ],
                assumptions: vec!["Simply-supported (pin-roller)"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "point_load_reactions",
            },

            Equation::TotalMoment => EquationMetadata {
                name: "Total Design Moment",
                description: "Superposition of the moments from every load source",
                symbol: "Mc",
                expression: "Mw + Mq + Mf + Md",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Mw", "Wind moment", "kN·mm"),
                    Variable::new("Mq", "Imposed load moment", "kN·mm"),
                    Variable::new("Mf", "Fixture moment", "kN·mm"),
                    Variable::new("Md", "Dead load moment", "kN·mm"),
                ],
                assumptions: vec!["Linear elastic superposition"],
                category: EquationCategory::InternalForces,
                source_module: "loads/aggregate.rs",
                source_function: "MemberLoads::summarize",
            },

            Equation::TotalShear => EquationMetadata {
                name: "Total Design Shear",
                description: "Superposition of the support reactions from every load source",
                symbol: "Fv",
                expression: "Vw + Vq + Vf + Vd",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Vw", "Wind reaction", "N"),
                    Variable::new("Vq", "Imposed load reaction", "N"),
                    Variable::new("Vf", "Fixture reaction", "N"),
                    Variable::new("Vd", "Dead load reaction", "N"),
                ],
                assumptions: vec!["Linear elastic superposition"],
                category: EquationCategory::InternalForces,
                source_module: "loads/aggregate.rs",
                source_function: "MemberLoads::summarize",
            },

            // -----------------------------------------------------------------
            // Deflections
            // -----------------------------------------------------------------
            Equation::UniformLoadMaxDeflection => EquationMetadata {
                name: "Maximum Deflection for Uniform Load",
                description: "Midspan deflection of a simply-supported member under a uniform line load",
                symbol: "δ",
                expression: "5 × w × L⁴ / (384 × E × I)",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "2a" },
                variables: vec![
                    Variable::new("w", "Factored line load", "N/mm"),
                    Variable::new("L", "Span", "mm"),
                    Variable::new("E", "Modulus of elasticity", "MPa"),
                    Variable::new("I", "Second moment of area (effective for studs, gross for runners)", "mm⁴"),
                ],
                assumptions: vec!["Linear elastic material", "Small deflections"],
                category: EquationCategory::Deflections,
                source_module: "equations/beam.rs",
                source_function: "uniform_load_max_deflection",
            },

            Equation::EccentricPointLoadDeflection => EquationMetadata {
                name: "Deflection for Eccentric Imposed Load",
                description: "Stud deflection from the imposed line load at height h, as printed in the reference calculation",
                symbol: "δmax",
                expression: "(W × Tw × (L - h) × h² × (3L - 2h)) / (6 × E × Ixe × 2)",
                reference: CodeReference::StudReferenceCalculation { section: "Check deflections" },
                variables: vec![
                    Variable::new("W", "Factored imposed line load (Qk × W)", "kN/m"),
                    Variable::new("Tw", "Stud spacing", "mm"),
                    Variable::new("h", "Load height", "mm"),
                    Variable::new("L", "Span", "mm"),
                    Variable::new("E", "Modulus of elasticity", "MPa"),
                    Variable::new("Ixe", "Effective second moment of area", "mm⁴"),
                ],
                assumptions: vec![
                    "Evaluated exactly as printed, trailing factor 2 included",
                    "Only the imposed load enters the stud deflection check",
                ],
                category: EquationCategory::Deflections,
                source_module: "equations/beam.rs",
                source_function: "eccentric_point_load_deflection",
            },

            Equation::TotalDeflection => EquationMetadata {
                name: "Total Deflection",
                description: "Superposition of the uniform-load deflections of a ceiling runner",
                symbol: "δmax",
                expression: "δw + δd",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("δ", "Deflection per source", "mm")],
                assumptions: vec!["Both maxima occur at midspan"],
                category: EquationCategory::Deflections,
                source_module: "loads/aggregate.rs",
                source_function: "MemberLoads::summarize",
            },

            // -----------------------------------------------------------------
            // Coefficients
            // -----------------------------------------------------------------
            Equation::WebCripplingKw => EquationMetadata {
                name: "Web Crippling Coefficient kw",
                description: "Strength coefficient, capped at 0.73",
                symbol: "kw",
                expression: "min(0.73, Py / 275)",
                reference: CodeReference::BS5950 { part: 5, clause: "6.3" },
                variables: vec![Variable::new("Py", "Design strength", "MPa")],
                assumptions: vec![],
                category: EquationCategory::Coefficients,
                source_module: "equations/capacity.rs",
                source_function: "WebCripplingCoefficients::new",
            },

            Equation::WebCripplingC3 => EquationMetadata {
                name: "Web Crippling Coefficient c3",
                description: "Linear function of kw",
                symbol: "c3",
                expression: "1.33 - 0.33 × kw",
                reference: CodeReference::BS5950 { part: 5, clause: "6.3" },
                variables: vec![Variable::new("kw", "Strength coefficient", "-")],
                assumptions: vec![],
                category: EquationCategory::Coefficients,
                source_module: "equations/capacity.rs",
                source_function: "WebCripplingCoefficients::new",
            },

            Equation::WebCripplingC4 => EquationMetadata {
                name: "Web Crippling Coefficient c4",
                description: "Corner radius coefficient with the tabulated radius of 1.587 mm",
                symbol: "c4",
                expression: "1.15 - 0.15 × (1.587 / t)",
                reference: CodeReference::BS5950 { part: 5, clause: "6.3" },
                variables: vec![Variable::new("t", "Base metal thickness", "mm")],
                assumptions: vec!["c12 = 1"],
                category: EquationCategory::Coefficients,
                source_module: "equations/capacity.rs",
                source_function: "WebCripplingCoefficients::new",
            },

            // -----------------------------------------------------------------
            // Resistances
            // -----------------------------------------------------------------
            Equation::BendingCapacity => EquationMetadata {
                name: "Bending Capacity",
                description: "Moment resistance of the effective section",
                symbol: "Mb",
                expression: "Py × Sxe / Ym",
                reference: CodeReference::BS5950 { part: 5, clause: "5.2.2" },
                variables: vec![
                    Variable::new("Py", "Design strength", "MPa"),
                    Variable::new("Sxe", "Effective section modulus", "mm³"),
                    Variable::new("Ym", "Material factor", "-"),
                ],
                assumptions: vec!["Lateral-torsional buckling restrained by the boards"],
                category: EquationCategory::Resistances,
                source_module: "equations/capacity.rs",
                source_function: "bending_capacity",
            },

            Equation::ShearCapacity => EquationMetadata {
                name: "Shear Capacity",
                description: "Plastic shear resistance of the web",
                symbol: "Vc",
                expression: "0.6 × d × t × Py / Ym",
                reference: CodeReference::BS5950 { part: 5, clause: "5.4" },
                variables: vec![
                    Variable::new("d", "Web height", "mm"),
                    Variable::new("t", "Thickness", "mm"),
                    Variable::new("Py", "Design strength", "MPa"),
                    Variable::new("Ym", "Material factor", "-"),
                ],
                assumptions: vec!["Shear buckling not governing"],
                category: EquationCategory::Resistances,
                source_module: "equations/capacity.rs",
                source_function: "shear_capacity",
            },

            Equation::WebCripplingCapacity => EquationMetadata {
                name: "Web Crippling Capacity",
                description: "Bearing resistance of an unstiffened web at a support",
                symbol: "Pw",
                expression: "1.21 × t² × kw × c3 × c4 × c12 × (1 + 0.01 × (Ny / t)) × (Py / Ym)",
                reference: CodeReference::BS5950 { part: 5, clause: "6.3" },
                variables: vec![
                    Variable::new("t", "Thickness", "mm"),
                    Variable::new("Ny", "Bearing length", "mm"),
                    Variable::new("Py", "Design strength", "MPa"),
                    Variable::new("Ym", "Material factor", "-"),
                ],
                assumptions: vec!["Reduced form without the web slenderness term"],
                category: EquationCategory::Resistances,
                source_module: "equations/capacity.rs",
                source_function: "web_crippling_capacity",
            },

            Equation::HangerTensionCapacity => EquationMetadata {
                name: "Hanger Tension Capacity",
                description: "Tensile resistance of a threaded rod",
                symbol: "Tc",
                expression: "As × fu / Ym",
                reference: CodeReference::Manufacturer { document: "Threaded rod tables" },
                variables: vec![
                    Variable::new("As", "Tensile stress area", "mm²"),
                    Variable::new("fu", "Ultimate tensile strength", "MPa"),
                    Variable::new("Ym", "Material factor", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::Resistances,
                source_module: "equations/capacity.rs",
                source_function: "hanger_tension_capacity",
            },

            Equation::AnchorTensionCapacity => EquationMetadata {
                name: "Anchor Tension Capacity",
                description: "Design tensile resistance of a post-installed anchor",
                symbol: "NRd",
                expression: "NRd,tab × 1000",
                reference: CodeReference::Manufacturer { document: "Anchor technical data" },
                variables: vec![Variable::new("NRd,tab", "Tabulated design tensile resistance", "kN")],
                assumptions: vec!["Uncracked concrete, edge and spacing distances per manufacturer"],
                category: EquationCategory::Resistances,
                source_module: "calculations/ceiling_system.rs",
                source_function: "calculate",
            },

            // -----------------------------------------------------------------
            // Ceiling hardware demand
            // -----------------------------------------------------------------
            Equation::HangerTensionDemand => EquationMetadata {
                name: "Hanger Tension Demand",
                description: "Runner load collected by one hanger, increased by the installation factor",
                symbol: "Th",
                expression: "w × s × γi",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("w", "Factored runner line load", "N/mm"),
                    Variable::new("s", "Hanger spacing", "mm"),
                    Variable::new("γi", "Installation factor", "-"),
                ],
                assumptions: vec!["Each hanger carries one runner span"],
                category: EquationCategory::InternalForces,
                source_module: "calculations/ceiling_system.rs",
                source_function: "calculate",
            },

            Equation::AnchorTensionDemand => EquationMetadata {
                name: "Anchor Tension Demand",
                description: "Anchor carries the hanger tension directly",
                symbol: "NEd",
                expression: "Th",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("Th", "Hanger tension demand", "N")],
                assumptions: vec!["One anchor per hanger"],
                category: EquationCategory::InternalForces,
                source_module: "calculations/ceiling_system.rs",
                source_function: "calculate",
            },

            // -----------------------------------------------------------------
            // Checks
            // -----------------------------------------------------------------
            Equation::DeflectionLimit => EquationMetadata {
                name: "Deflection Limit",
                description: "Allowable deflection as a fraction of span",
                symbol: "δallow",
                expression: "L / n",
                reference: CodeReference::StudReferenceCalculation { section: "Check deflections" },
                variables: vec![
                    Variable::new("L", "Span", "mm"),
                    Variable::new("n", "Deflection divisor (240, 360 or custom)", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::DesignChecks,
                source_module: "loads/mod.rs",
                source_function: "DeflectionCriterion::limit",
            },

            Equation::CombinedActionRatio => EquationMetadata {
                name: "Combined Action Ratio",
                description: "Bending utilization checked against a limit of 1.0",
                symbol: "CA",
                expression: "Mc / Mb",
                reference: CodeReference::StudReferenceCalculation { section: "Combined action" },
                variables: vec![
                    Variable::new("Mc", "Total design moment", "kN·mm"),
                    Variable::new("Mb", "Bending capacity", "kN·mm"),
                ],
                assumptions: vec!["Axial load neglected; not a biaxial interaction check"],
                category: EquationCategory::DesignChecks,
                source_module: "verification.rs",
                source_function: "CheckResult::combined_action",
            },

            Equation::UtilizationRatio => EquationMetadata {
                name: "Utilization Ratio",
                description: "Demand over capacity; the check passes when demand does not exceed capacity",
                symbol: "ratio",
                expression: "demand / capacity",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("demand", "Factored action", "-"),
                    Variable::new("capacity", "Factored resistance", "-"),
                ],
                assumptions: vec!["Pass when demand ≤ capacity"],
                category: EquationCategory::DesignChecks,
                source_module: "verification.rs",
                source_function: "CheckResult::evaluate",
            },
        }
    }

    /// "symbol = expression" as printed in calculation traces
    pub fn formula(&self) -> String {
        self.metadata().formula()
    }

    /// Same expression with a different left-hand side (e.g., "Mw = w × L² / 8")
    pub fn formula_as(&self, symbol: &str) -> String {
        format!("{} = {}", symbol, self.metadata().expression)
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Categories that contain at least one equation, sorted
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Loads, InternalForces, Deflections, Coefficients, Resistances, DesignChecks];
        cats.retain(|c| !Equation::in_category(*c).is_empty());
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::WindLineLoad,
    Equation::DeadLineLoad,
    Equation::ImposedPointLoad,
    Equation::FixturePointLoad,
    Equation::UniformLoadMaxMoment,
    Equation::UniformLoadReaction,
    Equation::ImposedLoadMoment,
    Equation::ImposedLoadReaction,
    Equation::PointLoadMoment,
    Equation::PointLoadReaction,
    Equation::TotalMoment,
    Equation::TotalShear,
    Equation::UniformLoadMaxDeflection,
    Equation::EccentricPointLoadDeflection,
    Equation::TotalDeflection,
    Equation::WebCripplingKw,
    Equation::WebCripplingC3,
    Equation::WebCripplingC4,
    Equation::BendingCapacity,
    Equation::ShearCapacity,
    Equation::WebCripplingCapacity,
    Equation::HangerTensionCapacity,
    Equation::AnchorTensionCapacity,
    Equation::HangerTensionDemand,
    Equation::AnchorTensionDemand,
    Equation::DeflectionLimit,
    Equation::CombinedActionRatio,
    Equation::UtilizationRatio,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the EQUATIONS.md reference from the registry.
///
/// ```rust
/// use drywall_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Drywall Framing Equations Reference"));
/// assert!(markdown.contains("Mb = Py × Sxe / Ym"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(24_000);

    output.push_str(
        r#"# Drywall Framing Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the wall-stud and suspended-ceiling
checks. Calculation traces print these formulas verbatim, so a trace can be
read against this page line by line.

## Units

| Quantity | Unit |
|----------|------|
| Length | mm |
| Force | N |
| Moment | N·mm internally, reported in kN·mm |
| Stress, modulus | MPa |
| Line load | N/mm (= kN/m) |
| Pressure | kPa |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in Equation::in_category(*category) {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula()));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================
