//! # Project Data Structures
//!
//! The `Project` struct is the root container of a job file: metadata, global
//! settings and every stud or ceiling calculation of one job. Projects
//! serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, project name/detail, author, dates)
//! ├── settings: GlobalSettings (defaults for fields an item leaves out)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use drywall_core::project::Project;
//!
//! let project = Project::new("Level 3 fit-out", "Partitions and ceilings", "A. Designer");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Level 3 fit-out"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculations::ceiling_system::DEFAULT_CEILING_MATERIAL_FACTOR;
use crate::calculations::{CalculationItem, CalculationOutput, DEFAULT_BEARING_LENGTH_MM};
use crate::components::ComponentRepository;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::validate_version;
use crate::loads::{DeflectionCriterion, DesignConstants};
use crate::materials::MaterialProperties;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, name, author, dates)
    pub meta: ProjectMetadata,

    /// Defaults for the material, bearing, deflection limit and constants of
    /// items that omit them
    #[serde(default)]
    pub settings: GlobalSettings,

    /// All calculation items, keyed by UUID
    #[serde(default)]
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project dated today.
    ///
    /// # Example
    ///
    /// ```rust
    /// use drywall_core::project::Project;
    ///
    /// let project = Project::new("Office refurbishment", "Ground floor", "J. Smith");
    /// assert_eq!(project.meta.author, "J. Smith");
    /// assert_eq!(project.item_count(), 0);
    /// ```
    pub fn new(
        project_name: impl Into<String>,
        project_detail: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                project_name: project_name.into(),
                project_detail: project_detail.into(),
                author: author.into(),
                calculation_date: now.date_naive(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Run every item against a component repository.
    ///
    /// Fields an item leaves out are taken from [`Project::settings`]. A
    /// failing item is reported in its own entry and does not stop the
    /// others. Entries are sorted by label, then by id.
    pub fn run(&self, repo: &dyn ComponentRepository) -> ProjectReport {
        let mut entries: Vec<ItemReport> = self
            .items
            .iter()
            .map(|(id, item)| {
                let outcome = item.run(repo, &self.settings);
                if let Err(e) = &outcome {
                    warn!(item = item.label(), error = %e, "calculation item failed");
                }
                ItemReport {
                    id: *id,
                    label: item.label().to_string(),
                    calc_type: item.calc_type().to_string(),
                    outcome: outcome.into(),
                }
            })
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));

        debug!(project = %self.meta.project_name, items = entries.len(), "project evaluated");
        ProjectReport {
            project_name: self.meta.project_name.clone(),
            entries,
        }
    }

    /// Parse a project from JSON and check its schema version.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let project: Project = serde_json::from_str(json)?;
        validate_version(&project.meta.version)?;
        Ok(project)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub project_name: String,

    /// Free-text scope (building, level, area)
    #[serde(default)]
    pub project_detail: String,

    /// Person responsible for the calculation
    pub author: String,

    /// Date printed on the calculation sheets
    pub calculation_date: NaiveDate,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
///
/// Every item input may leave its material, bearing length, deflection
/// criterion and constants out; [`Project::run`] fills them from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Stud steel
    pub default_material: MaterialProperties,

    /// γm for ceiling runners and hangers, on the stud steel's Py and E
    pub ceiling_material_factor: f64,

    pub default_deflection: DeflectionCriterion,

    /// Bearing length at tracks and hanger clips (mm)
    pub default_bearing_length_mm: f64,

    /// Gravity and insulation density
    pub constants: DesignConstants,
}

impl GlobalSettings {
    /// Runner steel for ceilings that give none
    pub fn ceiling_material(&self) -> MaterialProperties {
        MaterialProperties {
            material_factor: self.ceiling_material_factor,
            ..self.default_material
        }
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            default_material: MaterialProperties::default(),
            ceiling_material_factor: DEFAULT_CEILING_MATERIAL_FACTOR,
            default_deflection: DeflectionCriterion::L240,
            default_bearing_length_mm: DEFAULT_BEARING_LENGTH_MM,
            constants: DesignConstants::default(),
        }
    }
}

/// Outcome of one item: its result or the error that stopped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value")]
pub enum ItemOutcome {
    Completed(CalculationOutput),
    Failed(CalcError),
}

impl From<CalcResult<CalculationOutput>> for ItemOutcome {
    fn from(result: CalcResult<CalculationOutput>) -> Self {
        match result {
            Ok(output) => ItemOutcome::Completed(output),
            Err(e) => ItemOutcome::Failed(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: Uuid,
    pub label: String,
    pub calc_type: String,
    pub outcome: ItemOutcome,
}

impl ItemReport {
    /// Completed and every check passed
    pub fn passes(&self) -> bool {
        matches!(&self.outcome, ItemOutcome::Completed(output) if output.passes())
    }
}

/// Results of [`Project::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project_name: String,
    pub entries: Vec<ItemReport>,
}

impl ProjectReport {
    pub fn all_pass(&self) -> bool {
        self.entries.iter().all(|e| e.passes())
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, ItemOutcome::Failed(_)))
            .count()
    }
}
