//! # Section Capacity Formulas
//!
//! Factored resistances of a cold-formed channel and of the ceiling hardware.
//! Inputs are N / mm / MPa; outputs are N, N·mm or mm.
//!
//! The web-crippling coefficients follow BS 5950-5 clause 6.3 in the reduced
//! form used by the drywall stud tables. They must be reproduced exactly,
//! including the `min` on `kw` and the fixed 1.587 in `c4`.

use serde::{Deserialize, Serialize};

/// Bending capacity, Mb = Py × Sxe / γm (N·mm)
#[inline]
pub fn bending_capacity(effective_modulus_mm3: f64, py: f64, gamma_m: f64) -> f64 {
    effective_modulus_mm3 * py / gamma_m
}

/// Shear capacity, Vc = 0.6 × D × t × Py / γm (N)
#[inline]
pub fn shear_capacity(web_height_mm: f64, thickness_mm: f64, py: f64, gamma_m: f64) -> f64 {
    0.6 * web_height_mm * thickness_mm * py / gamma_m
}

/// Coefficients of the web-crippling expression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WebCripplingCoefficients {
    /// kw = min(0.73, Py / 275)
    pub kw: f64,
    /// c3 = 1.33 - 0.33 kw
    pub c3: f64,
    /// c4 = 1.15 - 0.15 (1.587 / t)
    pub c4: f64,
    /// c12, fixed at 1
    pub c12: f64,
}

/// Corner-radius constant of the c4 coefficient (mm)
pub const WEB_CRIPPLING_RADIUS_MM: f64 = 1.587;

impl WebCripplingCoefficients {
    pub fn new(py: f64, thickness_mm: f64) -> Self {
        let kw = (py / 275.0).min(0.73);
        WebCripplingCoefficients {
            kw,
            c3: 1.33 - 0.33 * kw,
            c4: 1.15 - 0.15 * (WEB_CRIPPLING_RADIUS_MM / thickness_mm),
            c12: 1.0,
        }
    }

    /// kw × c3 × c4 × c12
    pub fn product(&self) -> f64 {
        self.kw * self.c3 * self.c4 * self.c12
    }
}

/// Web-crippling capacity (N)
///
/// ```text
/// Pw = 1.21 × t² × kw × c3 × c4 × c12 × (1 + 0.01 × N / t) × (Py / γm)
/// ```
///
/// where N is the bearing length.
#[inline]
pub fn web_crippling_capacity(
    thickness_mm: f64,
    coefficients: &WebCripplingCoefficients,
    bearing_length_mm: f64,
    py: f64,
    gamma_m: f64,
) -> f64 {
    1.21 * thickness_mm.powi(2)
        * coefficients.product()
        * (1.0 + 0.01 * (bearing_length_mm / thickness_mm))
        * (py / gamma_m)
}

/// Tensile capacity of a threaded hanger rod, Tc = A × fu / γm (N)
#[inline]
pub fn hanger_tension_capacity(area_mm2: f64, tensile_strength_mpa: f64, gamma_m: f64) -> f64 {
    area_mm2 * tensile_strength_mpa / gamma_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bending_capacity_reference() {
        // 2712 × 200 / 1.2 = 452 000 N·mm
        let mb = bending_capacity(2712.0, 200.0, 1.2);
        assert!((mb - 452_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_shear_capacity_reference() {
        // 0.6 × 75 × 0.8 × 200 / 1.2
        let vc = shear_capacity(75.0, 0.8, 200.0, 1.2);
        assert!((vc - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn test_coefficients_at_py_200() {
        let c = WebCripplingCoefficients::new(200.0, 0.8);
        // 200/275 is below the 0.73 cap
        assert!((c.kw - 200.0 / 275.0).abs() < 1e-12);
        assert!((c.c3 - 1.09).abs() < 1e-12);
        assert!((c.c4 - 0.8524375).abs() < 1e-12);
        assert_eq!(c.c12, 1.0);
    }

    #[test]
    fn test_kw_capped() {
        let c = WebCripplingCoefficients::new(275.0, 1.0);
        assert_eq!(c.kw, 0.73);
        assert!((c.c3 - 1.0891).abs() < 1e-12);
        assert!((c.c4 - (1.15 - 0.15 * 1.587)).abs() < 1e-12);
    }

    #[test]
    fn test_web_crippling_capacity_reference() {
        let c = WebCripplingCoefficients::new(200.0, 0.8);
        let pw = web_crippling_capacity(0.8, &c, 32.0, 200.0, 1.2);
        assert!((pw - 122.1036).abs() < 1e-3, "Pw = {}", pw);
    }

    #[test]
    fn test_web_crippling_grows_with_bearing() {
        let c = WebCripplingCoefficients::new(200.0, 1.0);
        let short = web_crippling_capacity(1.0, &c, 20.0, 200.0, 1.2);
        let long = web_crippling_capacity(1.0, &c, 50.0, 200.0, 1.2);
        assert!(long > short);
    }

    #[test]
    fn test_hanger_capacity() {
        // M10: 58 × 400 / 1.4
        let tc = hanger_tension_capacity(58.0, 400.0, 1.4);
        assert!((tc - 16_571.428_571).abs() < 1e-3);
    }
}
