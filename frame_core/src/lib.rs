//! # frame_core - Wall Framing Layout & Cut-Optimization Engine
//!
//! `frame_core` is the computational heart of Studlist. It turns wall
//! parameters (length, height, stud spacing, openings) into positioned framing
//! members, and turns those same members into a stock-length purchase list.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a wall and return fresh output
//! - **One layout**: Member generation and cut extraction share [`layout`],
//!   so the 3D view and the bill of materials agree member-for-member
//! - **Graceful**: Odd input yields odd geometry, never a panic; validation
//!   is a separate step for callers
//!
//! ## Quick Start
//!
//! ```rust
//! use frame_core::{generate_members, wall_materials, EstimateSettings, Opening, WallSpec};
//!
//! let wall = WallSpec::new(192.0, 97.125).with_opening(Opening::window(36.0, 48.0));
//!
//! let members = generate_members(&wall);
//! let materials = wall_materials(&wall, &EstimateSettings::default());
//! assert!(!members.is_empty() && !materials.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`wall`] - Wall and opening input types
//! - [`layout`] - Opening placement, stud positions, opening framing
//! - [`members`] - 3D framing member generation
//! - [`cuts`] - Raw cut extraction
//! - [`optimizer`] - Greedy stock bin-packing
//! - [`materials`] - Per-wall, per-floor and project purchase lists
//! - [`project`] - Project container
//! - [`settings`] - Stock lengths and precut rules
//! - [`lumber`] - Lumber sizes and option sets
//! - [`units`] - Length wrappers, rounding and fraction formatting
//! - [`errors`] - Structured error types

pub mod cuts;
pub mod errors;
pub mod layout;
pub mod lumber;
pub mod materials;
pub mod members;
pub mod optimizer;
pub mod project;
pub mod settings;
pub mod units;
pub mod wall;

// Re-export commonly used types at crate root for convenience
pub use cuts::{extract_cuts, extract_cuts_with, CutCategory, RawCut, RawCutSet};
pub use errors::{FrameError, FrameResult};
pub use layout::{resolve_openings, PlacedOpening, WallLayout};
pub use materials::{calculate_materials, wall_materials, MaterialItem, MaterialLength, MaterialReport};
pub use members::{generate_members, FramingMember, MemberKind};
pub use optimizer::{optimize, StockBin, StockTally};
pub use project::{Floor, Project, Wall};
pub use settings::EstimateSettings;
pub use wall::{Opening, OpeningKind, WallSpec};
