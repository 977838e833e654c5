//! # Simply-Supported Member Formulas
//!
//! Studs span floor track to head track and runners span hanger to hanger; both
//! are modelled as simply-supported members. All functions take raw `f64` in a
//! consistent N / mm base and return N, N·mm or mm.
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `a` = Position of a point load, measured from the base support
//! - `P` = Point load
//! - `w` = Uniform line load (N/mm)
//! - `E` = Modulus of elasticity
//! - `I` = Second moment of area
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1

// =============================================================================
// POINT LOAD
// =============================================================================

/// Reactions for point load P at position a on span L
///
/// ```text
///        P
///        →
///    ────┬────────────
///    △   a            △
///   R1  ←───────L────→ R2
/// ```
///
/// # Formulas (Roark's Table 8.1, Case 1a)
/// - R1 = P(L-a)/L
/// - R2 = Pa/L
#[inline]
pub fn point_load_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    let r1 = p * (l - a) / l;
    let r2 = p * a / l;
    (r1, r2)
}

/// Moment under a point load, M = Pa(L-a)/L
#[inline]
pub fn point_load_max_moment(p: f64, a: f64, l: f64) -> f64 {
    p * a * (l - a) / l
}

/// Deflection of an eccentric point load as used by the drywall stud tables.
///
/// ```text
/// δ = P(L-a)a²(3L-2a) / (6·E·I·2)
/// ```
///
/// The published hand-calculation expression, evaluated as printed with
/// `P = W × Tw`. Note the expression carries one length dimension more than
/// a deflection; the result is reported in mm all the same.
#[inline]
pub fn eccentric_point_load_deflection(p: f64, a: f64, l: f64, e: f64, i: f64) -> f64 {
    p * (l - a) * a * a * (3.0 * l - 2.0 * a) / (6.0 * e * i * 2.0)
}

// =============================================================================
// UNIFORM LOAD
// =============================================================================

/// Reactions for uniform load over the full span
///
/// ```text
///    →→→→→→→→→→→→→→→→→ w
///    ═════════════════
///    △                △
///   R1  ←─────L─────→ R2
/// ```
///
/// # Formula
/// R1 = R2 = wL/2
#[inline]
pub fn uniform_load_reactions(w: f64, l: f64) -> (f64, f64) {
    let r = w * l / 2.0;
    (r, r)
}

/// Maximum moment for uniform load
///
/// # Formula
/// M_max = wL²/8
#[inline]
pub fn uniform_load_max_moment(w: f64, l: f64) -> f64 {
    w * l * l / 8.0
}

/// Maximum deflection for uniform load (at midspan)
///
/// # Formula
/// δ_max = 5wL⁴ / (384EI)
#[inline]
pub fn uniform_load_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * e * i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    #[test]
    fn test_point_load_midspan() {
        let (r1, r2) = point_load_reactions(1000.0, 2000.0, 4000.0);
        assert!(approx_eq(r1, 500.0));
        assert!(approx_eq(r2, 500.0));
        // PL/4
        assert!(approx_eq(point_load_max_moment(1000.0, 2000.0, 4000.0), 1_000_000.0));
    }

    #[test]
    fn test_point_load_reference_stud() {
        // 1.6 × 0.75 N/mm × 406 mm at 1100 mm on a 4100 mm stud
        let p = 1.6 * 0.75 * 406.0;
        let (r1, r2) = point_load_reactions(p, 1100.0, 4100.0);
        assert!((r1 - 356.488).abs() < 1e-3, "R1 = {}", r1);
        assert!(approx_eq(r1 + r2, p));

        let m = point_load_max_moment(p, 1100.0, 4100.0);
        assert!((m - 392_136.585).abs() < 1e-2, "M = {}", m);
    }

    #[test]
    fn test_eccentric_deflection_reference_stud() {
        let p = 1.6 * 0.75 * 406.0;
        let d = eccentric_point_load_deflection(p, 1100.0, 4100.0, 205_000.0, 125_552.0);
        // 487.2 × 3000 × 1100² × 10100 / (6 × 205000 × 125552 × 2)
        assert!((d - 57_833.1085).abs() < 1e-3, "δ = {}", d);
    }

    #[test]
    fn test_eccentric_deflection_zero_at_supports() {
        assert_eq!(eccentric_point_load_deflection(500.0, 0.0, 3000.0, 205_000.0, 1.0e5), 0.0);
        assert_eq!(eccentric_point_load_deflection(500.0, 3000.0, 3000.0, 205_000.0, 1.0e5), 0.0);
    }

    #[test]
    fn test_uniform_load() {
        // 0.5 N/mm over 4000 mm
        let (r1, r2) = uniform_load_reactions(0.5, 4000.0);
        assert!(approx_eq(r1, 1000.0));
        assert!(approx_eq(r2, 1000.0));
        assert!(approx_eq(uniform_load_max_moment(0.5, 4000.0), 1_000_000.0));
    }

    #[test]
    fn test_uniform_deflection() {
        // 5 × 0.5 × 4000⁴ / (384 × 205000 × 125552)
        let d = uniform_load_max_deflection(0.5, 4000.0, 205_000.0, 125_552.0);
        let expected = 5.0 * 0.5 * 2.56e14 / (384.0 * 205_000.0 * 125_552.0);
        assert!(approx_eq(d, expected));
        assert!((d - 64.76).abs() < 0.01, "δ = {}", d);
    }
}
