//! # Verification
//!
//! Pairs each demand with its capacity. A member is verified by five checks:
//! bending moment, shear force, web crippling, deflection and combined action.
//!
//! Each check starts pending and is evaluated exactly once. The overall verdict
//! only exists once all five have been evaluated, which [`Verification::finish`]
//! enforces.
//!
//! ```rust
//! use drywall_core::verification::{CheckKind, Verification};
//!
//! let mut v = Verification::new();
//! v.evaluate(CheckKind::BendingMoment, 392.14, 452.0).unwrap();
//! v.evaluate(CheckKind::ShearForce, 356.49, 6000.0).unwrap();
//! v.evaluate(CheckKind::WebCrippling, 356.49, 122.10).unwrap();
//! v.evaluate(CheckKind::Deflection, 9.80, 17.08).unwrap();
//! v.evaluate(CheckKind::CombinedAction, 392.14 / 452.0, 1.0).unwrap();
//!
//! let result = v.finish().unwrap();
//! assert!(!result.overall_result);
//! assert_eq!(result.failed_checks(), vec![CheckKind::WebCrippling]);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, require_non_negative, CalcError, CalcResult};

/// The five member checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    BendingMoment,
    ShearForce,
    WebCrippling,
    Deflection,
    CombinedAction,
}

impl CheckKind {
    pub const ALL: [CheckKind; 5] = [
        CheckKind::BendingMoment,
        CheckKind::ShearForce,
        CheckKind::WebCrippling,
        CheckKind::Deflection,
        CheckKind::CombinedAction,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckKind::BendingMoment => "Bending",
            CheckKind::ShearForce => "Shear",
            CheckKind::WebCrippling => "Web crippling",
            CheckKind::Deflection => "Deflection",
            CheckKind::CombinedAction => "Combined action",
        }
    }

    /// Unit of demand and capacity
    pub fn units(&self) -> &'static str {
        match self {
            CheckKind::BendingMoment => "kN·mm",
            CheckKind::ShearForce | CheckKind::WebCrippling => "N",
            CheckKind::Deflection => "mm",
            CheckKind::CombinedAction => "-",
        }
    }

    fn index(&self) -> usize {
        match self {
            CheckKind::BendingMoment => 0,
            CheckKind::ShearForce => 1,
            CheckKind::WebCrippling => 2,
            CheckKind::Deflection => 3,
            CheckKind::CombinedAction => 4,
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Demand against capacity for one check.
///
/// `ratio = demand / capacity`, `pass = demand <= capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub demand: f64,
    pub capacity: f64,
    pub ratio: f64,
    pub pass: bool,
}

impl CheckResult {
    /// Evaluate a check. The capacity must be strictly positive.
    pub fn evaluate(demand: f64, capacity: f64) -> CalcResult<Self> {
        require_non_negative("demand", demand)?;
        require_finite("capacity", capacity)?;
        if capacity <= 0.0 {
            return Err(CalcError::calculation_failed(
                "verification",
                format!("capacity must be greater than zero, got {}", capacity),
            ));
        }
        Ok(CheckResult {
            demand,
            capacity,
            ratio: demand / capacity,
            pass: demand <= capacity,
        })
    }

    /// Combined action, Mc / Mb against a limit of 1.0.
    pub fn combined_action(design_moment: f64, bending_capacity: f64) -> CalcResult<Self> {
        let bending = CheckResult::evaluate(design_moment, bending_capacity)?;
        CheckResult::evaluate(bending.ratio, 1.0)
    }

    /// Ratio as a percentage
    pub fn utilization_percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// Verdict of the five member checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub bending_moment: CheckResult,
    pub shear_force: CheckResult,
    pub web_crippling: CheckResult,
    pub deflection: CheckResult,
    pub combined_action: CheckResult,
    /// AND of the five `pass` flags
    pub overall_result: bool,
}

impl VerificationResult {
    pub fn check(&self, kind: CheckKind) -> &CheckResult {
        match kind {
            CheckKind::BendingMoment => &self.bending_moment,
            CheckKind::ShearForce => &self.shear_force,
            CheckKind::WebCrippling => &self.web_crippling,
            CheckKind::Deflection => &self.deflection,
            CheckKind::CombinedAction => &self.combined_action,
        }
    }

    /// Checks in fixed order
    pub fn checks(&self) -> impl Iterator<Item = (CheckKind, &CheckResult)> {
        CheckKind::ALL.into_iter().map(move |kind| (kind, self.check(kind)))
    }

    /// Check with the highest ratio; the earlier check wins a tie
    pub fn governing_check(&self) -> CheckKind {
        let mut governing = CheckKind::BendingMoment;
        for (kind, check) in self.checks() {
            if check.ratio > self.check(governing).ratio {
                governing = kind;
            }
        }
        governing
    }

    pub fn max_ratio(&self) -> f64 {
        self.check(self.governing_check()).ratio
    }

    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.checks().filter(|(_, c)| !c.pass).map(|(k, _)| k).collect()
    }
}

/// Checks of one member, pending until evaluated.
#[derive(Debug, Clone, Default)]
pub struct Verification {
    checks: [Option<CheckResult>; 5],
}

impl Verification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a pending check. Evaluating the same check twice is an error.
    pub fn evaluate(&mut self, kind: CheckKind, demand: f64, capacity: f64) -> CalcResult<CheckResult> {
        let result = CheckResult::evaluate(demand, capacity).map_err(|e| match e {
            CalcError::InvalidInput { value, reason, .. } => CalcError::invalid_input(
                format!("{}.demand", kind.display_name().to_lowercase().replace(' ', "_")),
                value,
                reason,
            ),
            other => other,
        })?;
        self.record(kind, result)
    }

    /// Store a check evaluated elsewhere (e.g., [`CheckResult::combined_action`]).
    pub fn record(&mut self, kind: CheckKind, result: CheckResult) -> CalcResult<CheckResult> {
        let slot = &mut self.checks[kind.index()];
        if slot.is_some() {
            return Err(CalcError::Internal {
                message: format!("{} check evaluated twice", kind.display_name()),
            });
        }
        *slot = Some(result);
        tracing::debug!(
            check = kind.display_name(),
            ratio = result.ratio,
            pass = result.pass,
            "check evaluated"
        );
        Ok(result)
    }

    pub fn is_pending(&self, kind: CheckKind) -> bool {
        self.checks[kind.index()].is_none()
    }

    /// Combine the five checks. Fails if any is still pending.
    pub fn finish(self) -> CalcResult<VerificationResult> {
        let take = |kind: CheckKind| {
            self.checks[kind.index()].ok_or_else(|| {
                CalcError::calculation_failed(
                    "verification",
                    format!("{} check was not evaluated", kind.display_name()),
                )
            })
        };
        let bending_moment = take(CheckKind::BendingMoment)?;
        let shear_force = take(CheckKind::ShearForce)?;
        let web_crippling = take(CheckKind::WebCrippling)?;
        let deflection = take(CheckKind::Deflection)?;
        let combined_action = take(CheckKind::CombinedAction)?;

        let overall_result = bending_moment.pass
            && shear_force.pass
            && web_crippling.pass
            && deflection.pass
            && combined_action.pass;

        Ok(VerificationResult {
            bending_moment,
            shear_force,
            web_crippling,
            deflection,
            combined_action,
            overall_result,
        })
    }
}
