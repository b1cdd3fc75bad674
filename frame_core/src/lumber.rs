//! Standard Lumber Sizes
//!
//! Nominal-to-actual lookups for the dimension lumber used in wall framing,
//! plus the small fixed option sets a wall is built from: on-center stud
//! spacing, header ply count and sheathing material.
//!
//! ## Nominal vs Actual Dimensions
//!
//! - 2x nominal = 1.5" actual thickness
//! - 2x4 = 3.5" deep, 2x6 = 5.5", 2x8 = 7.25", 2x10 = 9.25", 2x12 = 11.25"
//!
//! A stud's depth sets the wall thickness; a header's depth sets how far it
//! hangs below the top plate.

use serde::{Deserialize, Serialize};

/// Actual thickness of any 2x member (stud, plate, sill, block, header ply).
pub const STUD_THICKNESS: f64 = 1.5;

/// Standard lumber size designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum LumberSize {
    /// 2x4 (1.5" x 3.5")
    #[default]
    #[serde(rename = "2x4")]
    L2x4,
    /// 2x6 (1.5" x 5.5")
    #[serde(rename = "2x6")]
    L2x6,
    /// 2x8 (1.5" x 7.25")
    #[serde(rename = "2x8")]
    L2x8,
    /// 2x10 (1.5" x 9.25")
    #[serde(rename = "2x10")]
    L2x10,
    /// 2x12 (1.5" x 11.25")
    #[serde(rename = "2x12")]
    L2x12,
}

impl LumberSize {
    /// Get the actual dimensions (thickness, depth) in inches
    pub fn actual_dimensions(&self) -> (f64, f64) {
        match self {
            LumberSize::L2x4 => (1.5, 3.5),
            LumberSize::L2x6 => (1.5, 5.5),
            LumberSize::L2x8 => (1.5, 7.25),
            LumberSize::L2x10 => (1.5, 9.25),
            LumberSize::L2x12 => (1.5, 11.25),
        }
    }

    /// Get display name (e.g., "2x10")
    pub fn display_name(&self) -> &'static str {
        match self {
            LumberSize::L2x4 => "2x4",
            LumberSize::L2x6 => "2x6",
            LumberSize::L2x8 => "2x8",
            LumberSize::L2x10 => "2x10",
            LumberSize::L2x12 => "2x12",
        }
    }

    /// Actual thickness in inches
    pub fn thickness_in(&self) -> f64 {
        self.actual_dimensions().0
    }

    /// Actual depth in inches
    pub fn depth_in(&self) -> f64 {
        self.actual_dimensions().1
    }
}

impl std::fmt::Display for LumberSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// STUD SPACING
// ============================================================================

/// On-center stud spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StudSpacing {
    #[serde(rename = "12")]
    Oc12,
    #[default]
    #[serde(rename = "16")]
    Oc16,
    #[serde(rename = "19.2")]
    Oc19_2,
    #[serde(rename = "24")]
    Oc24,
}

impl StudSpacing {
    /// On-center distance in inches
    pub fn inches(&self) -> f64 {
        match self {
            StudSpacing::Oc12 => 12.0,
            StudSpacing::Oc16 => 16.0,
            StudSpacing::Oc19_2 => 19.2,
            StudSpacing::Oc24 => 24.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StudSpacing::Oc12 => "12\" O.C.",
            StudSpacing::Oc16 => "16\" O.C.",
            StudSpacing::Oc19_2 => "19.2\" O.C.",
            StudSpacing::Oc24 => "24\" O.C.",
        }
    }
}

impl std::fmt::Display for StudSpacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// HEADER PLY COUNT
// ============================================================================

/// Number of plies in a built-up header.
///
/// Plies are separated by a nominal 0.5" spacer so a 2-ply header fills a
/// 2x4 wall (3.5") and a 3-ply header fills a 2x6 wall (5.5").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HeaderPly {
    #[default]
    #[serde(rename = "2")]
    Double,
    #[serde(rename = "3")]
    Triple,
}

impl HeaderPly {
    /// Spacer between adjacent plies
    pub const SPACER_IN: f64 = 0.5;

    pub fn count(&self) -> u32 {
        match self {
            HeaderPly::Double => 2,
            HeaderPly::Triple => 3,
        }
    }

    /// Depth-axis offset of ply `index` (0-based)
    pub fn ply_offset_in(index: u32) -> f64 {
        index as f64 * (STUD_THICKNESS + Self::SPACER_IN)
    }
}

// ============================================================================
// SHEATHING
// ============================================================================

/// Structural sheathing panel material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum SheathingMaterial {
    /// 7/16" OSB
    #[default]
    Osb7_16,
    /// 1/2" CDX plywood
    Plywood1_2,
    /// 5/8" CDX plywood
    Plywood5_8,
    /// 7/16" ZIP System panel
    Zip7_16,
}

impl SheathingMaterial {
    /// Panel width (horizontal) in inches
    pub const PANEL_WIDTH_IN: f64 = 48.0;
    /// Panel height (vertical) in inches
    pub const PANEL_HEIGHT_IN: f64 = 96.0;

    pub fn thickness_in(&self) -> f64 {
        match self {
            SheathingMaterial::Osb7_16 => 0.4375,
            SheathingMaterial::Plywood1_2 => 0.5,
            SheathingMaterial::Plywood5_8 => 0.625,
            SheathingMaterial::Zip7_16 => 0.4375,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SheathingMaterial::Osb7_16 => "7/16\" OSB",
            SheathingMaterial::Plywood1_2 => "1/2\" Plywood",
            SheathingMaterial::Plywood5_8 => "5/8\" Plywood",
            SheathingMaterial::Zip7_16 => "7/16\" ZIP",
        }
    }

    /// Compact tag used in member names
    pub fn tag(&self) -> &'static str {
        match self {
            SheathingMaterial::Osb7_16 => "OSB",
            SheathingMaterial::Plywood1_2 | SheathingMaterial::Plywood5_8 => "PLY",
            SheathingMaterial::Zip7_16 => "ZIP",
        }
    }
}

impl std::fmt::Display for SheathingMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
