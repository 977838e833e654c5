//! # Component Catalog
//!
//! Reference data for the members a drywall partition or suspended ceiling is
//! built from: cold-formed stud and runner channels, threaded-rod hangers and
//! post-installed anchors.
//!
//! Calculations never read the tables directly. They receive records from a
//! [`ComponentRepository`], so the built-in tables can be replaced by a
//! project-specific JSON catalog without touching any formula.
//!
//! ## Example
//!
//! ```rust
//! use drywall_core::components::{Catalog, ComponentRepository, SectionKind};
//!
//! let catalog = Catalog::builtin();
//! let stud = catalog.find_section("C75x45x0.8t").unwrap();
//! assert_eq!(stud.kind, SectionKind::Stud);
//! assert_eq!(stud.effective_modulus_mm3, 2712.0);
//!
//! assert!(catalog.find_hanger("M6").is_err());
//! ```

mod builtin;

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};

pub use builtin::{builtin_anchors, builtin_hangers, builtin_sections};

// ============================================================================
// Records
// ============================================================================

/// Role a channel section plays in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Vertical wall stud
    Stud,
    /// Ceiling runner (furring or main channel)
    Runner,
}

impl SectionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKind::Stud => "Stud",
            SectionKind::Runner => "Runner",
        }
    }
}

/// Cold-formed channel section (stud or runner).
///
/// Effective properties are the post-buckling values from the manufacturer's
/// tables; the gross values are kept for reference and for ceiling deflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Catalog id (e.g., "C75x45x0.8t")
    pub id: String,

    pub kind: SectionKind,

    /// Web height D (mm)
    pub web_height_mm: f64,

    /// Flange width B (mm)
    pub flange_width_mm: f64,

    /// Base metal thickness t (mm)
    pub thickness_mm: f64,

    /// Inside corner radius r (mm)
    pub corner_radius_mm: f64,

    /// Gross area A (mm²)
    pub area_mm2: f64,

    /// Gross second moment of area Ix (mm⁴)
    pub inertia_mm4: f64,

    /// Gross elastic section modulus Sx (mm³)
    pub modulus_mm3: f64,

    /// Effective area Ae (mm²)
    pub effective_area_mm2: f64,

    /// Effective second moment of area Ixe (mm⁴)
    pub effective_inertia_mm4: f64,

    /// Effective section modulus Sxe (mm³)
    pub effective_modulus_mm3: f64,
}

impl Section {
    /// Reject records that would put a zero or negative value into a capacity
    /// formula.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("web_height_mm", self.web_height_mm),
            ("flange_width_mm", self.flange_width_mm),
            ("thickness_mm", self.thickness_mm),
            ("area_mm2", self.area_mm2),
            ("inertia_mm4", self.inertia_mm4),
            ("modulus_mm3", self.modulus_mm3),
            ("effective_area_mm2", self.effective_area_mm2),
            ("effective_inertia_mm4", self.effective_inertia_mm4),
            ("effective_modulus_mm3", self.effective_modulus_mm3),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("{}.{}", self.id, field),
                    value.to_string(),
                    "Section property must be a positive number",
                ));
            }
        }
        if !self.corner_radius_mm.is_finite() || self.corner_radius_mm < 0.0 {
            return Err(CalcError::invalid_input(
                format!("{}.corner_radius_mm", self.id),
                self.corner_radius_mm.to_string(),
                "Corner radius cannot be negative",
            ));
        }
        Ok(())
    }

    /// Depth-to-thickness ratio D/t
    pub fn web_slenderness(&self) -> f64 {
        self.web_height_mm / self.thickness_mm
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, Ae={:.1} mm², Ixe={:.0} mm⁴, Sxe={:.1} mm³)",
            self.id,
            self.kind.display_name(),
            self.effective_area_mm2,
            self.effective_inertia_mm4,
            self.effective_modulus_mm3
        )
    }
}

/// Threaded-rod ceiling hanger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hanger {
    /// Catalog id (e.g., "M10")
    pub id: String,

    /// Nominal diameter (mm)
    pub diameter_mm: f64,

    /// Tensile stress area (mm²)
    pub area_mm2: f64,

    /// Ultimate tensile strength fu (MPa)
    pub tensile_strength_mpa: f64,
}

impl Hanger {
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("diameter_mm", self.diameter_mm),
            ("area_mm2", self.area_mm2),
            ("tensile_strength_mpa", self.tensile_strength_mpa),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("{}.{}", self.id, field),
                    value.to_string(),
                    "Hanger property must be a positive number",
                ));
            }
        }
        Ok(())
    }
}

/// Post-installed concrete anchor holding a hanger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Catalog id (e.g., "HST3-M10")
    pub id: String,

    /// Nominal diameter (mm)
    pub diameter_mm: f64,

    /// Characteristic tensile resistance (kN)
    pub characteristic_resistance_kn: f64,

    /// Design tensile resistance (kN)
    pub design_resistance_kn: f64,

    /// Manufacturer's recommended working load (kN)
    pub recommended_load_kn: f64,
}

impl Anchor {
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("diameter_mm", self.diameter_mm),
            ("characteristic_resistance_kn", self.characteristic_resistance_kn),
            ("design_resistance_kn", self.design_resistance_kn),
            ("recommended_load_kn", self.recommended_load_kn),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("{}.{}", self.id, field),
                    value.to_string(),
                    "Anchor property must be a positive number",
                ));
            }
        }
        if self.design_resistance_kn > self.characteristic_resistance_kn {
            return Err(CalcError::invalid_input(
                format!("{}.design_resistance_kn", self.id),
                self.design_resistance_kn.to_string(),
                "Design resistance cannot exceed characteristic resistance",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Source of component records.
///
/// Lookups are exact id matches. An unknown id is an error, never a silent
/// default.
pub trait ComponentRepository {
    fn find_section(&self, id: &str) -> CalcResult<&Section>;
    fn find_hanger(&self, id: &str) -> CalcResult<&Hanger>;
    fn find_anchor(&self, id: &str) -> CalcResult<&Anchor>;

    /// Section ids, sorted
    fn section_ids(&self) -> Vec<&str>;
    fn hanger_ids(&self) -> Vec<&str>;
    fn anchor_ids(&self) -> Vec<&str>;

    /// Look up a section and check it plays the expected role.
    fn find_section_of_kind(&self, id: &str, kind: SectionKind) -> CalcResult<&Section> {
        let section = self.find_section(id)?;
        if section.kind != kind {
            return Err(CalcError::invalid_input(
                "section_id",
                id,
                format!("'{}' is a {}, expected a {}", id, section.kind.display_name(), kind.display_name()),
            ));
        }
        Ok(section)
    }
}

/// JSON layout of a substitute catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub hangers: Vec<Hanger>,
    #[serde(default)]
    pub anchors: Vec<Anchor>,
}

/// In-memory component catalog keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sections: HashMap<String, Section>,
    hangers: HashMap<String, Hanger>,
    anchors: HashMap<String, Anchor>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let mut catalog = Catalog::new();
    for section in builtin_sections() {
        catalog.insert_section(section);
    }
    for hanger in builtin_hangers() {
        catalog.insert_hanger(hanger);
    }
    for anchor in builtin_anchors() {
        catalog.insert_anchor(anchor);
    }
    catalog
});

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in reference tables, shared for the life of the process
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a catalog from a [`CatalogFile`], validating every record.
    ///
    /// `source_name` is only used in error messages.
    pub fn from_file_contents(source_name: &str, contents: CatalogFile) -> CalcResult<Self> {
        let mut catalog = Catalog::new();

        for section in contents.sections {
            section
                .validate()
                .map_err(|e| CalcError::catalog_error(source_name, e.to_string()))?;
            if catalog.sections.contains_key(&section.id) {
                return Err(CalcError::catalog_error(
                    source_name,
                    format!("Duplicate section id '{}'", section.id),
                ));
            }
            catalog.insert_section(section);
        }
        for hanger in contents.hangers {
            hanger
                .validate()
                .map_err(|e| CalcError::catalog_error(source_name, e.to_string()))?;
            if catalog.hangers.contains_key(&hanger.id) {
                return Err(CalcError::catalog_error(
                    source_name,
                    format!("Duplicate hanger id '{}'", hanger.id),
                ));
            }
            catalog.insert_hanger(hanger);
        }
        for anchor in contents.anchors {
            anchor
                .validate()
                .map_err(|e| CalcError::catalog_error(source_name, e.to_string()))?;
            if catalog.anchors.contains_key(&anchor.id) {
                return Err(CalcError::catalog_error(
                    source_name,
                    format!("Duplicate anchor id '{}'", anchor.id),
                ));
            }
            catalog.insert_anchor(anchor);
        }

        debug!(
            source = source_name,
            sections = catalog.sections.len(),
            hangers = catalog.hangers.len(),
            anchors = catalog.anchors.len(),
            "Loaded component catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use drywall_core::components::{Catalog, ComponentRepository};
    ///
    /// let json = r#"{
    ///   "hangers": [
    ///     { "id": "M6", "diameter_mm": 6.0, "area_mm2": 20.1, "tensile_strength_mpa": 400.0 }
    ///   ]
    /// }"#;
    /// let catalog = Catalog::from_json_str("inline", json).unwrap();
    /// assert_eq!(catalog.find_hanger("M6").unwrap().area_mm2, 20.1);
    /// assert!(catalog.find_section("C75x45x0.8t").is_err());
    /// ```
    pub fn from_json_str(source_name: &str, json: &str) -> CalcResult<Self> {
        let contents: CatalogFile = serde_json::from_str(json)
            .map_err(|e| CalcError::catalog_error(source_name, format!("Invalid JSON: {}", e)))?;
        Self::from_file_contents(source_name, contents)
    }

    /// Read and parse a JSON catalog file
    pub fn from_json_file(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::catalog_error(&source_name, format!("Failed to read file: {}", e)))?;
        Self::from_json_str(&source_name, &json)
    }

    pub fn insert_section(&mut self, section: Section) {
        self.sections.insert(section.id.clone(), section);
    }

    pub fn insert_hanger(&mut self, hanger: Hanger) {
        self.hangers.insert(hanger.id.clone(), hanger);
    }

    pub fn insert_anchor(&mut self, anchor: Anchor) {
        self.anchors.insert(anchor.id.clone(), anchor);
    }

    /// Sections of one kind, sorted by id
    pub fn sections_of_kind(&self, kind: SectionKind) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.values().filter(|s| s.kind == kind).collect();
        sections.sort_by(|a, b| a.id.cmp(&b.id));
        sections
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.sections.len() + self.hangers.len() + self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();
    keys
}

impl ComponentRepository for Catalog {
    fn find_section(&self, id: &str) -> CalcResult<&Section> {
        self.sections.get(id).ok_or_else(|| {
            warn!(id, "Unknown section id");
            CalcError::section_not_found(id)
        })
    }

    fn find_hanger(&self, id: &str) -> CalcResult<&Hanger> {
        self.hangers.get(id).ok_or_else(|| {
            warn!(id, "Unknown hanger id");
            CalcError::hanger_not_found(id)
        })
    }

    fn find_anchor(&self, id: &str) -> CalcResult<&Anchor> {
        self.anchors.get(id).ok_or_else(|| {
            warn!(id, "Unknown anchor id");
            CalcError::anchor_not_found(id)
        })
    }

    fn section_ids(&self) -> Vec<&str> {
        sorted_keys(&self.sections)
    }

    fn hanger_ids(&self) -> Vec<&str> {
        sorted_keys(&self.hangers)
    }

    fn anchor_ids(&self) -> Vec<&str> {
        sorted_keys(&self.anchors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contents() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.section_ids(),
            vec!["C100x45x0.8t", "C75x45x0.8t", "C75x45x1.0t", "FRC38x12x0.8t", "RRC19x40x0.6t"]
        );
        assert_eq!(catalog.hanger_ids(), vec!["M10", "M12", "M8"]);
        assert_eq!(catalog.anchor_ids(), vec!["HST3-M10", "HST3-M12", "HST3-M8"]);
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.sections_of_kind(SectionKind::Runner).len(), 2);
    }

    #[test]
    fn test_builtin_records_validate() {
        let catalog = Catalog::builtin();
        for id in catalog.section_ids() {
            catalog.find_section(id).unwrap().validate().unwrap();
        }
        for id in catalog.hanger_ids() {
            catalog.find_hanger(id).unwrap().validate().unwrap();
        }
        for id in catalog.anchor_ids() {
            catalog.find_anchor(id).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn test_unknown_ids_fail_explicitly() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.find_section("C200x50x1.2t").unwrap_err(),
            CalcError::section_not_found("C200x50x1.2t")
        );
        assert_eq!(catalog.find_hanger("M6").unwrap_err().error_code(), "HANGER_NOT_FOUND");
        assert_eq!(catalog.find_anchor("HST3-M6").unwrap_err().error_code(), "ANCHOR_NOT_FOUND");
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_section("c75x45x0.8t").is_err());
        assert!(catalog.find_section(" C75x45x0.8t").is_err());
    }

    #[test]
    fn test_section_kind_check() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_section_of_kind("C75x45x0.8t", SectionKind::Stud).is_ok());
        let err = catalog
            .find_section_of_kind("FRC38x12x0.8t", SectionKind::Stud)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_json_catalog_rejects_bad_record() {
        let json = r#"{
          "sections": [{
            "id": "BAD", "kind": "Stud",
            "web_height_mm": 75.0, "flange_width_mm": 45.0, "thickness_mm": 0.0,
            "corner_radius_mm": 1.5, "area_mm2": 100.0, "inertia_mm4": 1.0e5,
            "modulus_mm3": 3000.0, "effective_area_mm2": 100.0,
            "effective_inertia_mm4": 1.0e5, "effective_modulus_mm3": 2500.0
          }]
        }"#;
        let err = Catalog::from_json_str("test.json", json).unwrap_err();
        match err {
            CalcError::CatalogError { source_name, reason } => {
                assert_eq!(source_name, "test.json");
                assert!(reason.contains("BAD.thickness_mm"), "{}", reason);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_json_catalog_rejects_duplicates() {
        let json = r#"{
          "hangers": [
            { "id": "M8", "diameter_mm": 8.0, "area_mm2": 36.6, "tensile_strength_mpa": 400.0 },
            { "id": "M8", "diameter_mm": 8.0, "area_mm2": 36.6, "tensile_strength_mpa": 400.0 }
          ]
        }"#;
        assert!(Catalog::from_json_str("dup.json", json).is_err());
    }

    #[test]
    fn test_json_catalog_malformed() {
        let err = Catalog::from_json_str("broken.json", "{ not json").unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_ERROR");
    }

    #[test]
    fn test_json_catalog_file_roundtrip() {
        let builtin = Catalog::builtin();
        let contents = CatalogFile {
            sections: builtin.sections_of_kind(SectionKind::Runner).into_iter().cloned().collect(),
            hangers: vec![builtin.find_hanger("M10").unwrap().clone()],
            anchors: vec![builtin.find_anchor("HST3-M10").unwrap().clone()],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string_pretty(&contents).unwrap()).unwrap();

        let loaded = Catalog::from_json_file(&path).unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(
            loaded.find_section("RRC19x40x0.6t").unwrap(),
            builtin.find_section("RRC19x40x0.6t").unwrap()
        );
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = Catalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_ERROR");
    }

    #[test]
    fn test_anchor_design_not_above_characteristic() {
        let mut anchor = Catalog::builtin().find_anchor("HST3-M8").unwrap().clone();
        anchor.design_resistance_kn = anchor.characteristic_resistance_kn + 1.0;
        assert!(anchor.validate().is_err());
    }
}
