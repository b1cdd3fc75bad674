//! # Project Data Structures
//!
//! The `Project` struct groups the walls of a building by floor together with
//! the purchasing settings used to estimate them. Projects are stored as
//! pretty-printed JSON; where the file lives is up to the caller.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, estimator, job info, timestamps)
//! ├── settings: EstimateSettings (stock lengths, precut rule)
//! ├── floors: Vec<Floor>
//! └── walls: Vec<Wall> (each optionally on a floor)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use frame_core::project::Project;
//! use frame_core::wall::WallSpec;
//!
//! let mut project = Project::new("Jane Estimator", "25-042", "ACME Homes");
//! let floor = project.add_floor("Level 1");
//! project.add_wall("North", Some(floor), WallSpec::new(192.0, 97.125));
//!
//! let report = project.calculate();
//! assert_eq!(report.by_floor.len(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FrameError, FrameResult};
use crate::materials::{calculate_materials, MaterialReport};
use crate::settings::EstimateSettings;
use crate::wall::WallSpec;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A building level that walls belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: Uuid,
    pub name: String,
}

/// A wall with its identity and floor assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: Uuid,

    /// User label (e.g., "North Exterior", "W-3")
    pub label: String,

    /// Floor this wall belongs to, if any
    #[serde(default)]
    pub floor: Option<Uuid>,

    pub spec: WallSpec,
}

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: EstimateSettings,

    #[serde(default)]
    pub floors: Vec<Floor>,

    #[serde(default)]
    pub walls: Vec<Wall>,
}

impl Project {
    /// Create a new empty project.
    pub fn new(estimator: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: EstimateSettings::default(),
            floors: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// Add a floor and return its id.
    pub fn add_floor(&mut self, name: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.floors.push(Floor {
            id,
            name: name.into(),
        });
        self.touch();
        id
    }

    /// Add a wall and return its id.
    pub fn add_wall(&mut self, label: impl Into<String>, floor: Option<Uuid>, spec: WallSpec) -> Uuid {
        let id = Uuid::new_v4();
        self.walls.push(Wall {
            id,
            label: label.into(),
            floor,
            spec,
        });
        self.touch();
        id
    }

    /// Remove a wall by id, returning it if it existed.
    pub fn remove_wall(&mut self, id: &Uuid) -> Option<Wall> {
        let index = self.walls.iter().position(|w| &w.id == id)?;
        self.touch();
        Some(self.walls.remove(index))
    }

    pub fn get_wall(&self, id: &Uuid) -> Option<&Wall> {
        self.walls.iter().find(|w| &w.id == id)
    }

    /// Find a wall by its label
    pub fn find_wall(&self, label: &str) -> Option<&Wall> {
        self.walls.iter().find(|w| w.label == label)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Check every wall and floor reference.
    pub fn validate(&self) -> FrameResult<()> {
        for wall in &self.walls {
            wall.spec.validate().map_err(|err| match err {
                FrameError::InvalidInput { field, value, reason } => FrameError::InvalidInput {
                    field: format!("{}.{}", wall.label, field),
                    value,
                    reason,
                },
                other => other,
            })?;
            if let Some(floor) = wall.floor {
                if !self.floors.iter().any(|f| f.id == floor) {
                    return Err(FrameError::unknown_reference("floor", floor.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Parse a project from its JSON form.
    pub fn from_json(json: &str) -> FrameResult<Project> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON form of the project.
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Bill of materials for the whole project.
    pub fn calculate(&self) -> MaterialReport {
        calculate_materials(&self.walls, &self.floors, &self.settings)
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

    pub estimator: String,

    /// Job/project number
    pub job_id: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}
