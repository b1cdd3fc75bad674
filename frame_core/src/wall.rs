//! # Wall Input
//!
//! `WallSpec` is the immutable description of one wood-framed wall. Every
//! engine function takes a wall by reference and returns fresh output, so
//! the same spec can be fed through member generation and cut extraction
//! independently.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "length_in": 192.0,
//!   "height_in": 97.125,
//!   "stud_size": "2x4",
//!   "stud_spacing": "16",
//!   "openings": [
//!     { "kind": "Window", "width_in": 36.0, "height_in": 48.0 }
//!   ]
//! }
//! ```
//!
//! Everything except length and height has a default, see [`WallSpec::default`].

use serde::{Deserialize, Serialize};

use crate::errors::{FrameError, FrameResult};
use crate::lumber::{HeaderPly, LumberSize, SheathingMaterial, StudSpacing};

/// Window or door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OpeningKind {
    #[default]
    Window,
    Door,
}

/// A rough opening framed into a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opening {
    pub kind: OpeningKind,

    /// Number of identical openings; more than one is always auto-flowed
    pub quantity: u32,

    /// Rough opening width in inches
    pub width_in: f64,

    /// Rough opening height in inches
    pub height_in: f64,

    /// Nominal header lumber
    pub header_size: LumberSize,

    pub header_ply: HeaderPly,

    pub king_studs_per_side: u32,

    pub jack_studs_per_side: u32,

    /// Manual placement: center of the opening measured from the wall's
    /// left end. Only honored when `quantity == 1`.
    pub center_offset_in: Option<f64>,

    /// Window header drop below the top plate, in inches
    pub header_drop_in: Option<f64>,
}

impl Default for Opening {
    fn default() -> Self {
        Opening {
            kind: OpeningKind::Window,
            quantity: 1,
            width_in: 36.0,
            height_in: 48.0,
            header_size: LumberSize::L2x10,
            header_ply: HeaderPly::Double,
            king_studs_per_side: 1,
            jack_studs_per_side: 1,
            center_offset_in: None,
            header_drop_in: None,
        }
    }
}

impl Opening {
    /// A single auto-flowed window
    pub fn window(width_in: f64, height_in: f64) -> Self {
        Opening {
            kind: OpeningKind::Window,
            width_in,
            height_in,
            ..Default::default()
        }
    }

    /// A single auto-flowed door
    pub fn door(width_in: f64, height_in: f64) -> Self {
        Opening {
            kind: OpeningKind::Door,
            width_in,
            height_in,
            ..Default::default()
        }
    }

    /// Place this opening manually at `center_in` from the wall's left end
    pub fn centered_at(mut self, center_in: f64) -> Self {
        self.center_offset_in = Some(center_in);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_header(mut self, size: LumberSize, ply: HeaderPly) -> Self {
        self.header_size = size;
        self.header_ply = ply;
        self
    }

    pub fn with_studs(mut self, kings_per_side: u32, jacks_per_side: u32) -> Self {
        self.king_studs_per_side = kings_per_side;
        self.jack_studs_per_side = jacks_per_side;
        self
    }

    pub fn with_drop(mut self, drop_in: f64) -> Self {
        self.header_drop_in = Some(drop_in);
        self
    }

    /// True when this opening is positioned by its explicit center offset.
    pub fn is_manual(&self) -> bool {
        self.quantity == 1 && self.center_offset_in.is_some()
    }

    /// Header drop actually applied; doors never drop.
    pub fn effective_drop_in(&self) -> f64 {
        match self.kind {
            OpeningKind::Window => self.header_drop_in.unwrap_or(0.0).max(0.0),
            OpeningKind::Door => 0.0,
        }
    }

    /// Validate opening parameters.
    pub fn validate(&self, field: &str) -> FrameResult<()> {
        if self.quantity == 0 {
            return Err(FrameError::invalid_input(
                format!("{}.quantity", field),
                "0",
                "Quantity must be at least 1",
            ));
        }
        if !self.width_in.is_finite() || self.width_in <= 0.0 {
            return Err(FrameError::invalid_input(
                format!("{}.width_in", field),
                self.width_in.to_string(),
                "Opening width must be a positive number",
            ));
        }
        if !self.height_in.is_finite() || self.height_in <= 0.0 {
            return Err(FrameError::invalid_input(
                format!("{}.height_in", field),
                self.height_in.to_string(),
                "Opening height must be a positive number",
            ));
        }
        if self.quantity > 1 && self.center_offset_in.is_some() {
            return Err(FrameError::invalid_input(
                format!("{}.center_offset_in", field),
                format!("{:?}", self.center_offset_in),
                "Center offset is only valid for a single opening",
            ));
        }
        if let Some(center) = self.center_offset_in {
            if !center.is_finite() {
                return Err(FrameError::invalid_input(
                    format!("{}.center_offset_in", field),
                    center.to_string(),
                    "Center offset must be a finite number",
                ));
            }
        }
        if let Some(drop) = self.header_drop_in {
            if self.kind == OpeningKind::Door {
                return Err(FrameError::invalid_input(
                    format!("{}.header_drop_in", field),
                    drop.to_string(),
                    "Header drop applies to windows only",
                ));
            }
            if !drop.is_finite() || drop < 0.0 {
                return Err(FrameError::invalid_input(
                    format!("{}.header_drop_in", field),
                    drop.to_string(),
                    "Header drop must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

/// Input parameters for one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSpec {
    /// Wall length in inches
    pub length_in: f64,

    /// Overall wall height (bottom of bottom plate to top of top plate)
    pub height_in: f64,

    pub stud_size: LumberSize,

    pub stud_spacing: StudSpacing,

    /// Studs per on-center position (1-4)
    pub stud_multiplicity: u32,

    pub double_top_plate: bool,

    pub pt_bottom_plate: bool,

    pub blocking_rows: u32,

    pub start_stud_count: u32,

    pub end_stud_count: u32,

    pub sheathing: bool,

    pub sheathing_material: SheathingMaterial,

    pub openings: Vec<Opening>,
}

impl Default for WallSpec {
    fn default() -> Self {
        WallSpec {
            length_in: 96.0,
            height_in: 97.125,
            stud_size: LumberSize::L2x4,
            stud_spacing: StudSpacing::Oc16,
            stud_multiplicity: 1,
            double_top_plate: true,
            pt_bottom_plate: false,
            blocking_rows: 0,
            start_stud_count: 1,
            end_stud_count: 1,
            sheathing: false,
            sheathing_material: SheathingMaterial::Osb7_16,
            openings: Vec::new(),
        }
    }
}

impl WallSpec {
    /// A default-configured wall of the given size
    pub fn new(length_in: f64, height_in: f64) -> Self {
        WallSpec {
            length_in,
            height_in,
            ..Default::default()
        }
    }

    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.openings.push(opening);
        self
    }

    /// Validate wall parameters.
    ///
    /// The engine itself never rejects a wall; callers use this to flag
    /// input before computing.
    pub fn validate(&self) -> FrameResult<()> {
        if !self.length_in.is_finite() || self.length_in <= 0.0 {
            return Err(FrameError::invalid_input(
                "length_in",
                self.length_in.to_string(),
                "Wall length must be a positive number",
            ));
        }
        if !self.height_in.is_finite() || self.height_in <= 0.0 {
            return Err(FrameError::invalid_input(
                "height_in",
                self.height_in.to_string(),
                "Wall height must be a positive number",
            ));
        }
        if !(1..=4).contains(&self.stud_multiplicity) {
            return Err(FrameError::invalid_input(
                "stud_multiplicity",
                self.stud_multiplicity.to_string(),
                "Stud multiplicity must be between 1 and 4",
            ));
        }
        if self.start_stud_count == 0 {
            return Err(FrameError::invalid_input(
                "start_stud_count",
                "0",
                "At least one start stud is required",
            ));
        }
        if self.end_stud_count == 0 {
            return Err(FrameError::invalid_input(
                "end_stud_count",
                "0",
                "At least one end stud is required",
            ));
        }
        for (i, opening) in self.openings.iter().enumerate() {
            opening.validate(&format!("openings[{}]", i))?;
        }
        Ok(())
    }
}
