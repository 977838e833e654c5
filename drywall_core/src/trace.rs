//! # Calculation Trace
//!
//! A trace is the printed side of a calculation: one [`CalculationStep`] per
//! intermediate quantity, each holding the symbolic formula, the same formula
//! with numbers substituted, and the formatted result. Traces are compared
//! field by field against hand calculations, so every string here is built
//! deterministically.
//!
//! Formula text always comes from the [`Equation`] registry.
//!
//! ```rust
//! use drywall_core::equations::Equation;
//! use drywall_core::trace::{format_kn_mm, TraceBuilder};
//!
//! let mut trace = TraceBuilder::new();
//! trace.record("Bending capacity", Equation::BendingCapacity, "200 × 2712 / 1.2", format_kn_mm(452_000.0));
//! let trace = trace.finish();
//!
//! let step = trace.find(Equation::BendingCapacity).unwrap();
//! assert_eq!(step.formula, "Mb = Py × Sxe / Ym");
//! assert_eq!(step.substitution, "Mb = 200 × 2712 / 1.2");
//! assert_eq!(step.result, "452.00 kN·mm");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::Equation;

/// One line of a calculation sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// Heading on the calculation sheet (e.g., "Check bending")
    pub label: String,
    pub equation: Equation,
    /// e.g. "Mb = Py × Sxe / Ym"
    pub formula: String,
    /// e.g. "Mb = 200 × 2712 / 1.2"
    pub substitution: String,
    /// e.g. "452.00 kN·mm"
    pub result: String,
}

/// Ordered list of steps for one calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationTrace {
    steps: Vec<CalculationStep>,
}

impl CalculationTrace {
    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// First step recorded for an equation
    pub fn find(&self, equation: Equation) -> Option<&CalculationStep> {
        self.steps.iter().find(|s| s.equation == equation)
    }

    /// First step whose formula starts with the given symbol (e.g., "Mw")
    pub fn find_symbol(&self, symbol: &str) -> Option<&CalculationStep> {
        let prefix = format!("{} = ", symbol);
        self.steps.iter().find(|s| s.formula.starts_with(&prefix))
    }
}

impl fmt::Display for CalculationTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step.label)?;
            writeln!(f, "    {}", step.formula)?;
            writeln!(f, "    {}", step.substitution)?;
            writeln!(f, "    = {}", step.result)?;
        }
        Ok(())
    }
}

/// Collects steps in calculation order.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    steps: Vec<CalculationStep>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step using the equation's own symbol.
    ///
    /// `substituted` is the right-hand side with numbers in place of symbols.
    pub fn record(
        &mut self,
        label: impl Into<String>,
        equation: Equation,
        substituted: impl AsRef<str>,
        result: impl Into<String>,
    ) -> &mut Self {
        let symbol = equation.metadata().symbol;
        self.record_as(label, equation, symbol, substituted, result)
    }

    /// Record a step under a different symbol, e.g. `Mw` for the wind moment.
    pub fn record_as(
        &mut self,
        label: impl Into<String>,
        equation: Equation,
        symbol: &str,
        substituted: impl AsRef<str>,
        result: impl Into<String>,
    ) -> &mut Self {
        self.steps.push(CalculationStep {
            label: label.into(),
            equation,
            formula: equation.formula_as(symbol),
            substitution: format!("{} = {}", symbol, substituted.as_ref()),
            result: result.into(),
        });
        self
    }

    pub fn finish(self) -> CalculationTrace {
        CalculationTrace { steps: self.steps }
    }
}

// ============================================================================
// Number formatting
// ============================================================================

/// An input value as it appears in a substitution: shortest form, at most six
/// decimals ("4100", "0.75", "1.6").
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1.0e6).round() / 1.0e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// N·mm reported in kN·mm, two decimals
pub fn format_kn_mm(newton_mm: f64) -> String {
    format!("{:.2} kN·mm", newton_mm / 1000.0)
}

/// Moment value without unit, in kN·mm (for substitutions)
pub fn format_kn_mm_value(newton_mm: f64) -> String {
    format!("{:.2}", newton_mm / 1000.0)
}

pub fn format_newtons(newtons: f64) -> String {
    format!("{:.2} N", newtons)
}

pub fn format_mm(mm: f64) -> String {
    format!("{:.2} mm", mm)
}

/// N/mm reported as kN/m (numerically equal), four decimals
pub fn format_kn_per_m(n_per_mm: f64) -> String {
    format!("{:.4} kN/m", n_per_mm)
}

/// Utilization ratios, three decimals
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.3}", ratio)
}

/// Empirical coefficients, four decimals
pub fn format_coefficient(value: f64) -> String {
    format!("{:.4}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_shortest_form() {
        assert_eq!(format_number(4100.0), "4100");
        assert_eq!(format_number(0.75), "0.75");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(205_000.0), "205000");
    }

    #[test]
    fn test_fixed_formats() {
        assert_eq!(format_kn_mm(392_136.585), "392.14 kN·mm");
        assert_eq!(format_newtons(356.488), "356.49 N");
        assert_eq!(format_mm(17.083_333), "17.08 mm");
        assert_eq!(format_ratio(0.867_559), "0.868");
        assert_eq!(format_coefficient(200.0 / 275.0), "0.7273");
        assert_eq!(format_kn_per_m(0.2196), "0.2196 kN/m");
    }

    #[test]
    fn test_record_as_uses_symbol() {
        let mut builder = TraceBuilder::new();
        builder.record_as("Wind moment", Equation::UniformLoadMaxMoment, "Mw", "0.2 × 3000² / 8", format_kn_mm(225_000.0));
        let trace = builder.finish();

        let step = trace.find_symbol("Mw").unwrap();
        assert_eq!(step.formula, "Mw = w × L² / 8");
        assert_eq!(step.substitution, "Mw = 0.2 × 3000² / 8");
        assert_eq!(step.result, "225.00 kN·mm");
        assert!(trace.find_symbol("M").is_none());
    }

    #[test]
    fn test_display_lists_every_step() {
        let mut builder = TraceBuilder::new();
        builder
            .record("Shear capacity", Equation::ShearCapacity, "0.6 × 75 × 0.8 × 200 / 1.2", format_newtons(6000.0))
            .record("Deflection limit", Equation::DeflectionLimit, "4100 / 240", format_mm(17.083_333));
        let trace = builder.finish();
        assert_eq!(trace.len(), 2);

        let text = trace.to_string();
        assert!(text.contains("Vc = 0.6 × d × t × Py / Ym"));
        assert!(text.contains("= 17.08 mm"));
    }

    #[test]
    fn test_trace_serializes_as_list() {
        let mut builder = TraceBuilder::new();
        builder.record("Combined action", Equation::CombinedActionRatio, "392.14 / 452.00", format_ratio(0.8676));
        let json = serde_json::to_value(builder.finish()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["formula"], "CA = Mc / Mb");
        assert_eq!(json[0]["equation"], "CombinedActionRatio");
    }
}
