//! # Unit Types
//!
//! Type-safe wrappers for the units used by drywall framing calculations.
//! They are plain `f64` newtypes: no runtime cost, and they serialize as bare
//! numbers so JSON stays readable.
//!
//! ## Internal Base
//!
//! Every formula in the kernel works in newtons and millimetres:
//! - Length: millimetres (mm)
//! - Force: newtons (N)
//! - Moment: newton-millimetres (N·mm)
//! - Stress / modulus: megapascals (MPa = N/mm²)
//! - Line load: newtons per millimetre (N/mm, numerically equal to kN/m)
//!
//! User-facing quantities (m, kN, kN·mm, kPa, kg, kg/m²) convert into this
//! base through `From` impls at the start of a calculation, and back out when
//! a result is reported.
//!
//! ## Example
//!
//! ```rust
//! use drywall_core::units::{Meters, Millimeters, NewtonMillimeters, KiloNewtonMillimeters};
//!
//! let height: Millimeters = Meters(1.1).into();
//! assert!((height.0 - 1100.0).abs() < 1e-9);
//!
//! let moment = NewtonMillimeters(392_136.6);
//! let reported: KiloNewtonMillimeters = moment.into();
//! assert!((reported.0 - 392.1366).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard gravity used to turn kilogram-force into newtons (m/s²)
pub const GRAVITY: f64 = 9.81;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-millimetres (the unit the reference calculations report)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMillimeters(pub f64);

impl From<NewtonMillimeters> for KiloNewtonMillimeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMillimeters(nmm.0 / 1000.0)
    }
}

impl From<KiloNewtonMillimeters> for NewtonMillimeters {
    fn from(knmm: KiloNewtonMillimeters) -> Self {
        NewtonMillimeters(knmm.0 * 1000.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

// ============================================================================
// Distributed Load Units
// ============================================================================

/// Line load in newtons per millimetre (numerically equal to kN/m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMillimeter(pub f64);

/// Line load in kilonewtons per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonsPerMeter(pub f64);

impl From<KiloNewtonsPerMeter> for NewtonsPerMillimeter {
    fn from(knm: KiloNewtonsPerMeter) -> Self {
        NewtonsPerMillimeter(knm.0)
    }
}

impl From<NewtonsPerMillimeter> for KiloNewtonsPerMeter {
    fn from(npmm: NewtonsPerMillimeter) -> Self {
        KiloNewtonsPerMeter(npmm.0)
    }
}

impl Kilopascals {
    /// Pressure acting over a tributary width gives a line load.
    ///
    /// kPa = 1e-3 N/mm², so `w [N/mm] = p [kPa] × 1e-3 × width [mm]`.
    pub fn over_width(self, width: Millimeters) -> NewtonsPerMillimeter {
        NewtonsPerMillimeter(self.0 * 1.0e-3 * width.0)
    }
}

impl NewtonsPerMillimeter {
    /// Resultant of a line load over a length
    pub fn over_length(self, length: Millimeters) -> Newtons {
        Newtons(self.0 * length.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms (treated as kilogram-force when converted to weight)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Areal mass in kg/m² (board and framing self-weights)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilogramsPerSquareMeter(pub f64);

impl From<Kilograms> for Newtons {
    fn from(kg: Kilograms) -> Self {
        Newtons(kg.0 * GRAVITY)
    }
}

impl From<KilogramsPerSquareMeter> for Kilopascals {
    fn from(kgm2: KilogramsPerSquareMeter) -> Self {
        // kg/m² × g = N/m² = 1e-3 kPa
        Kilopascals(kgm2.0 * GRAVITY / 1000.0)
    }
}

// ============================================================================
// Section Properties
// ============================================================================

/// Area in mm²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

/// Section modulus in mm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMillimeters(pub f64);

/// Second moment of area in mm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuarticMillimeters(pub f64);

impl CubicMillimeters {
    /// Convert from cm³ (the unit manufacturer tables usually print)
    pub fn from_cm3(cm3: f64) -> Self {
        CubicMillimeters(cm3 * 1.0e3)
    }
}

impl QuarticMillimeters {
    /// Convert from cm⁴
    pub fn from_cm4(cm4: f64) -> Self {
        QuarticMillimeters(cm4 * 1.0e4)
    }
}

impl SquareMillimeters {
    /// Convert from cm²
    pub fn from_cm2(cm2: f64) -> Self {
        SquareMillimeters(cm2 * 1.0e2)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(KiloNewtonMillimeters);
impl_arithmetic!(Kilopascals);
impl_arithmetic!(NewtonsPerMillimeter);
impl_arithmetic!(KiloNewtonsPerMeter);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KilogramsPerSquareMeter);
impl_arithmetic!(SquareMillimeters);
impl_arithmetic!(CubicMillimeters);
impl_arithmetic!(QuarticMillimeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let h: Millimeters = Meters(1.1).into();
        assert!((h.0 - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_moment_conversions() {
        let m: KiloNewtonMillimeters = NewtonMillimeters(452_000.0).into();
        assert_eq!(m.0, 452.0);

        let back: NewtonMillimeters = KiloNewtonMillimeters(392.14).into();
        assert!((back.0 - 392_140.0).abs() < 1e-6);
    }

    #[test]
    fn test_force_conversions() {
        let anchor: Newtons = KiloNewtons(11.2).into();
        assert!((anchor.0 - 11_200.0).abs() < 1e-9);
        let reported: KiloNewtons = Newtons(356.49).into();
        assert!((reported.0 - 0.35649).abs() < 1e-12);
    }

    #[test]
    fn test_pressure_over_width() {
        // 0.5 kPa on 406 mm -> 0.203 kN/m
        let w = Kilopascals(0.5).over_width(Millimeters(406.0));
        assert!((w.0 - 0.203).abs() < 1e-12);
    }

    #[test]
    fn test_mass_to_weight() {
        let n: Newtons = Kilograms(8.0).into();
        assert!((n.0 - 78.48).abs() < 1e-9);

        let p: Kilopascals = KilogramsPerSquareMeter(13.0).into();
        assert!((p.0 - 0.12753).abs() < 1e-9);
    }

    #[test]
    fn test_table_unit_conversions() {
        assert_eq!(CubicMillimeters::from_cm3(2.712).0, 2712.0);
        assert!((QuarticMillimeters::from_cm4(12.5552).0 - 125_552.0).abs() < 1e-6);
        assert!((SquareMillimeters::from_cm2(1.95).0 - 195.0).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Newtons(10.0);
        let b = Newtons(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
        let total: Newtons = vec![a, b, Newtons(1.0)].into_iter().sum();
        assert_eq!(total.0, 16.0);
    }

    #[test]
    fn test_serialization() {
        let span = Millimeters(4100.0);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, "4100.0");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(span, roundtrip);
    }
}
