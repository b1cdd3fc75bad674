//! # Cut Extractor
//!
//! Walks a wall through the same [`WallLayout`] the member generator uses and
//! emits 1D cut lengths per material category instead of boxes. Studs that
//! land on a standard precut length are tallied as precut units; everything
//! else goes to the stock optimizer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::WallLayout;
use crate::lumber::{LumberSize, SheathingMaterial};
use crate::members::sheathing_panels;
use crate::settings::EstimateSettings;
use crate::units::{position_key, POSITION_EPSILON};
use crate::wall::WallSpec;

/// Material category of a cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutCategory {
    Plate,
    PtPlate,
    Stud,
    Blocking,
    Header,
    Sheet,
}

impl CutCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            CutCategory::Plate => "Plate",
            CutCategory::PtPlate => "PT Plate",
            CutCategory::Stud => "Stud",
            CutCategory::Blocking => "Blocking",
            CutCategory::Header => "Header",
            CutCategory::Sheet => "Sheathing",
        }
    }
}

/// One length of lumber to cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCut {
    pub category: CutCategory,
    pub size: LumberSize,
    pub length: f64,
}

/// Studs bought as a standard precut SKU
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecutCount {
    pub size: LumberSize,
    pub length: f64,
    pub count: u32,
}

/// Whole sheathing panels needed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetCount {
    pub material: SheathingMaterial,
    pub count: u32,
}

/// All raw cuts for one or more walls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCutSet {
    /// Custom-length lumber cuts for the optimizer
    pub cuts: Vec<RawCut>,
    pub precuts: Vec<PrecutCount>,
    pub sheets: Vec<SheetCount>,
}

impl RawCutSet {
    fn add_precut(&mut self, size: LumberSize, length: f64, count: u32) {
        match self
            .precuts
            .iter_mut()
            .find(|p| p.size == size && position_key(p.length) == position_key(length))
        {
            Some(existing) => existing.count += count,
            None => self.precuts.push(PrecutCount { size, length, count }),
        }
    }

    fn add_sheets(&mut self, material: SheathingMaterial, count: u32) {
        match self.sheets.iter_mut().find(|s| s.material == material) {
            Some(existing) => existing.count += count,
            None => self.sheets.push(SheetCount { material, count }),
        }
    }

    /// Fold another cut set into this one.
    pub fn merge(&mut self, other: &RawCutSet) {
        self.cuts.extend_from_slice(&other.cuts);
        for precut in &other.precuts {
            self.add_precut(precut.size, precut.length, precut.count);
        }
        for sheet in &other.sheets {
            self.add_sheets(sheet.material, sheet.count);
        }
    }

    /// Cut lengths grouped by (category, nominal size), in input order.
    pub fn groups(&self) -> BTreeMap<(CutCategory, LumberSize), Vec<f64>> {
        let mut groups: BTreeMap<(CutCategory, LumberSize), Vec<f64>> = BTreeMap::new();
        for cut in &self.cuts {
            groups.entry((cut.category, cut.size)).or_default().push(cut.length);
        }
        groups
    }

    /// Total precut studs
    pub fn precut_total(&self) -> u32 {
        self.precuts.iter().map(|p| p.count).sum()
    }
}

/// Collects cuts for one wall, diverting precut studs.
struct CutSink<'a> {
    settings: &'a EstimateSettings,
    set: RawCutSet,
}

impl CutSink<'_> {
    fn push(&mut self, category: CutCategory, size: LumberSize, length: f64) {
        if length <= POSITION_EPSILON {
            return;
        }
        if category == CutCategory::Stud {
            if let Some(precut) = self.settings.matching_precut(length) {
                self.set.add_precut(size, precut, 1);
                return;
            }
        }
        self.set.cuts.push(RawCut { category, size, length });
    }
}

/// Extract raw cuts for a wall with the default precut rule.
pub fn extract_cuts(wall: &WallSpec) -> RawCutSet {
    extract_cuts_with(wall, &EstimateSettings::default())
}

/// Extract raw cuts for a wall.
///
/// Emits exactly one cut per framing member the generator would produce
/// (one per header ply), and one sheet per sheathing panel, clipped or not.
pub fn extract_cuts_with(wall: &WallSpec, settings: &EstimateSettings) -> RawCutSet {
    let layout = WallLayout::new(wall);
    let frame = &layout.frame;
    let stud = wall.stud_size;
    let mut sink = CutSink {
        settings,
        set: RawCutSet::default(),
    };

    let bottom = if wall.pt_bottom_plate {
        CutCategory::PtPlate
    } else {
        CutCategory::Plate
    };
    sink.push(bottom, stud, wall.length_in);
    let top_plates = if wall.double_top_plate { 2 } else { 1 };
    for _ in 0..top_plates {
        sink.push(CutCategory::Plate, stud, wall.length_in);
    }

    for _ in &layout.studs {
        sink.push(CutCategory::Stud, stud, frame.stud_length);
    }

    for block in &layout.blocking {
        sink.push(CutCategory::Blocking, stud, block.length);
    }

    for (placed, opening_frame) in layout.openings.iter().zip(&layout.opening_frames) {
        for _ in &opening_frame.king_xs {
            sink.push(CutCategory::Stud, stud, opening_frame.king_length);
        }
        for _ in &opening_frame.jack_xs {
            sink.push(CutCategory::Stud, stud, opening_frame.jack_length);
        }
        for _ in 0..opening_frame.header_plies {
            sink.push(CutCategory::Header, placed.opening.header_size, opening_frame.header_length);
        }
        if let Some(sill) = opening_frame.sill {
            sink.push(CutCategory::Plate, stud, sill.length);
        }
        for cripple in &opening_frame.cripples {
            sink.push(CutCategory::Stud, stud, cripple.length);
        }
    }

    if wall.sheathing {
        let panels = sheathing_panels(wall.length_in, wall.height_in).len() as u32;
        if panels > 0 {
            sink.set.add_sheets(wall.sheathing_material, panels);
        }
    }

    sink.set
}
