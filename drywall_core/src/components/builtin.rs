//! Built-in component tables.
//!
//! Manufacturer tables print section properties in cm², cm³ and cm⁴; they are
//! converted to mm units here, once. The C75x45x0.8t stud carries the values of
//! the published reference calculation (Ixe = 125 552 mm⁴, Sxe = 2712 mm³).

use super::{Anchor, Hanger, Section, SectionKind};
use crate::units::{CubicMillimeters, QuarticMillimeters, SquareMillimeters};

/// (id, kind, D, B, t, r, A cm², I cm⁴, S cm³, Ae cm², Ie cm⁴, Se cm³)
type SectionRow = (&'static str, SectionKind, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64);

const SECTION_TABLE: [SectionRow; 5] = [
    // Studs
    ("C75x45x0.8t", SectionKind::Stud, 75.0, 45.0, 0.8, 1.587, 1.368, 13.1785, 3.5143, 1.368, 12.5552, 2.712),
    ("C75x45x1.0t", SectionKind::Stud, 75.0, 45.0, 1.0, 1.5, 1.95, 18.1, 4.83, 1.85, 17.2, 4.59),
    ("C100x45x0.8t", SectionKind::Stud, 100.0, 45.0, 0.8, 1.5, 1.81, 28.3, 5.66, 1.68, 26.9, 5.38),
    // Ceiling runners
    ("FRC38x12x0.8t", SectionKind::Runner, 38.0, 12.0, 0.8, 1.5, 0.86, 1.95, 1.03, 0.82, 1.85, 0.98),
    ("RRC19x40x0.6t", SectionKind::Runner, 19.0, 40.0, 0.6, 1.5, 0.72, 0.43, 0.45, 0.68, 0.41, 0.43),
];

/// Stud and runner sections
pub fn builtin_sections() -> Vec<Section> {
    SECTION_TABLE
        .iter()
        .map(|&(id, kind, d, b, t, r, a, i, s, ae, ie, se)| Section {
            id: id.to_string(),
            kind,
            web_height_mm: d,
            flange_width_mm: b,
            thickness_mm: t,
            corner_radius_mm: r,
            area_mm2: round_table(SquareMillimeters::from_cm2(a).value()),
            inertia_mm4: round_table(QuarticMillimeters::from_cm4(i).value()),
            modulus_mm3: round_table(CubicMillimeters::from_cm3(s).value()),
            effective_area_mm2: round_table(SquareMillimeters::from_cm2(ae).value()),
            effective_inertia_mm4: round_table(QuarticMillimeters::from_cm4(ie).value()),
            effective_modulus_mm3: round_table(CubicMillimeters::from_cm3(se).value()),
        })
        .collect()
}

/// Threaded-rod hangers, fu = 400 MPa
pub fn builtin_hangers() -> Vec<Hanger> {
    [("M8", 8.0, 36.6), ("M10", 10.0, 58.0), ("M12", 12.0, 84.3)]
        .into_iter()
        .map(|(id, diameter_mm, area_mm2)| Hanger {
            id: id.to_string(),
            diameter_mm,
            area_mm2,
            tensile_strength_mpa: 400.0,
        })
        .collect()
}

/// Wedge anchors (characteristic / design / recommended tension, kN)
pub fn builtin_anchors() -> Vec<Anchor> {
    [
        ("HST3-M8", 8.0, 9.3, 6.2, 4.4),
        ("HST3-M10", 10.0, 16.8, 11.2, 8.0),
        ("HST3-M12", 12.0, 24.7, 16.5, 11.8),
    ]
    .into_iter()
    .map(|(id, diameter_mm, ck, design, recommended)| Anchor {
        id: id.to_string(),
        diameter_mm,
        characteristic_resistance_kn: ck,
        design_resistance_kn: design,
        recommended_load_kn: recommended,
    })
    .collect()
}

/// Strip float noise from the cm → mm conversion (2.712 × 1000 = 2712.0000000000005).
fn round_table(value: f64) -> f64 {
    (value * 1.0e4).round() / 1.0e4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_stud_properties() {
        let sections = builtin_sections();
        let stud = sections.iter().find(|s| s.id == "C75x45x0.8t").unwrap();
        assert_eq!(stud.area_mm2, 136.8);
        assert_eq!(stud.inertia_mm4, 131_785.0);
        assert_eq!(stud.modulus_mm3, 3514.3);
        assert_eq!(stud.effective_inertia_mm4, 125_552.0);
        assert_eq!(stud.effective_modulus_mm3, 2712.0);
        assert_eq!(stud.corner_radius_mm, 1.587);
    }

    #[test]
    fn test_runner_conversion() {
        let sections = builtin_sections();
        let runner = sections.iter().find(|s| s.id == "FRC38x12x0.8t").unwrap();
        assert_eq!(runner.kind, SectionKind::Runner);
        assert_eq!(runner.area_mm2, 86.0);
        assert_eq!(runner.inertia_mm4, 19_500.0);
        assert_eq!(runner.effective_modulus_mm3, 980.0);
    }

    #[test]
    fn test_effective_not_above_gross() {
        for s in builtin_sections() {
            assert!(s.effective_modulus_mm3 <= s.modulus_mm3, "{}", s.id);
            assert!(s.effective_inertia_mm4 <= s.inertia_mm4, "{}", s.id);
            assert!(s.effective_area_mm2 <= s.area_mm2, "{}", s.id);
        }
    }

    #[test]
    fn test_hanger_and_anchor_tables() {
        let hangers = builtin_hangers();
        assert_eq!(hangers.len(), 3);
        assert!(hangers.iter().all(|h| h.tensile_strength_mpa == 400.0));

        let anchors = builtin_anchors();
        let m12 = anchors.iter().find(|a| a.id == "HST3-M12").unwrap();
        assert_eq!(m12.design_resistance_kn, 16.5);
    }
}
