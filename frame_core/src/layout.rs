//! # Framing Layout
//!
//! Every placement decision for a wall lives here: where each opening sits
//! along the wall, which stud positions survive, where blocking goes and how
//! each opening is framed (kings, jacks, header, sill, cripples).
//!
//! Both the member generator ([`crate::members`]) and the cut extractor
//! ([`crate::cuts`]) consume these functions, so the 3D layout and the bill
//! of materials always agree member-for-member.
//!
//! ## Coordinates
//!
//! - `x` runs along the wall from its left end; stud positions are the
//!   stud's left edge.
//! - `y` is measured *down* from the top of the wall.
//! - `z` is the depth offset from the inner face.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::lumber::STUD_THICKNESS;
use crate::units::{position_key, round_hundredths, POSITION_EPSILON};
use crate::wall::{Opening, OpeningKind, WallSpec};

/// Thickness of the top-plate zone: two 1.5" plates or one 3" member.
pub const TOP_PLATE_ZONE: f64 = 2.0 * STUD_THICKNESS;

/// Minimum clear gap between studs that receives blocking.
pub const MIN_BLOCKING_GAP: f64 = 3.0;

/// Vertical stagger applied to alternating blocking bays.
pub const BLOCKING_STAGGER: f64 = 1.5;

// ============================================================================
// OPENING LAYOUT RESOLVER
// ============================================================================

/// One framed opening instance with its horizontal placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOpening {
    /// The opening this instance was expanded from
    pub opening: Opening,

    /// Index of the source opening in the wall's opening list
    pub source_index: usize,

    /// Left edge of the outermost king stud
    pub x_start: f64,

    /// Right edge of the outermost king stud
    pub x_end: f64,

    pub center: f64,

    /// Rough width plus all king and jack studs on both sides
    pub frame_width: f64,

    /// Positioned by an explicit center offset rather than auto-flow
    pub manual: bool,
}

impl PlacedOpening {
    /// True when `x` falls within this opening's framed span.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_start - POSITION_EPSILON && x <= self.x_end + POSITION_EPSILON
    }
}

/// Overall framed width of an opening.
pub fn frame_width(opening: &Opening) -> f64 {
    let side_studs = opening.king_studs_per_side + opening.jack_studs_per_side;
    opening.width_in + 2.0 * side_studs as f64 * STUD_THICKNESS
}

/// Resolve the horizontal placement of every opening instance on a wall.
///
/// Auto-flow instances (everything without a usable center offset) are
/// expanded by quantity and spaced evenly with equal gaps at both ends and
/// between instances. Manual openings are centered on their offset. The
/// result lists auto-flow instances first in declaration order, then manual
/// instances sorted by `x_start`. Manual and auto-flow openings are not
/// checked against each other for overlap.
pub fn resolve_openings(wall_length: f64, openings: &[Opening]) -> Vec<PlacedOpening> {
    let mut auto = Vec::new();
    let mut manual = Vec::new();

    for (index, opening) in openings.iter().enumerate() {
        if opening.quantity == 0 {
            continue;
        }
        if opening.is_manual() {
            manual.push((index, opening));
        } else {
            for _ in 0..opening.quantity {
                auto.push((index, opening));
            }
        }
    }

    let mut placed = Vec::with_capacity(auto.len() + manual.len());

    if !auto.is_empty() {
        let total_auto_width: f64 = auto.iter().map(|(_, o)| frame_width(o)).sum();
        let raw_spacing = (wall_length - total_auto_width) / (auto.len() + 1) as f64;
        if raw_spacing < 0.0 {
            warn!(
                wall_length,
                total_auto_width, "openings exceed wall length, spacing clamped to zero"
            );
        }
        let spacing = raw_spacing.max(0.0);

        let mut cursor = spacing;
        for (index, opening) in auto {
            let width = frame_width(opening);
            placed.push(PlacedOpening {
                opening: opening.clone(),
                source_index: index,
                x_start: cursor,
                x_end: cursor + width,
                center: cursor + width / 2.0,
                frame_width: width,
                manual: false,
            });
            cursor += width + spacing;
        }
    }

    let mut manual_placed: Vec<PlacedOpening> = manual
        .into_iter()
        .filter_map(|(index, opening)| {
            let center = opening.center_offset_in?;
            let width = frame_width(opening);
            Some(PlacedOpening {
                opening: opening.clone(),
                source_index: index,
                x_start: center - width / 2.0,
                x_end: center + width / 2.0,
                center,
                frame_width: width,
                manual: true,
            })
        })
        .collect();
    manual_placed.sort_by(|a, b| a.x_start.total_cmp(&b.x_start));
    placed.extend(manual_placed);

    placed
}

// ============================================================================
// WALL FRAME DIMENSIONS
// ============================================================================

/// Vertical and depth dimensions derived from a wall spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallFrame {
    pub length: f64,
    pub height: f64,
    pub spacing: f64,
    /// Stud depth (wall thickness)
    pub stud_depth: f64,
    /// Length of a full-height stud between plates
    pub stud_length: f64,
    /// y of the bottom plate's upper face
    pub bottom_plate_top: f64,
}

impl WallFrame {
    pub fn new(wall: &WallSpec) -> Self {
        let bottom_plate_top = wall.height_in - STUD_THICKNESS;
        WallFrame {
            length: wall.length_in,
            height: wall.height_in,
            spacing: wall.stud_spacing.inches(),
            stud_depth: wall.stud_size.depth_in(),
            stud_length: bottom_plate_top - TOP_PLATE_ZONE,
            bottom_plate_top,
        }
    }

    /// Centers of the on-center grid: every multiple of the spacing below the wall length.
    pub fn on_center_points(&self) -> Vec<f64> {
        let mut points = Vec::new();
        if !self.length.is_finite() || self.spacing <= 0.0 {
            return points;
        }
        let limit = (self.length / self.spacing).ceil() as u32;
        for i in 1..=limit {
            let center = i as f64 * self.spacing;
            if center >= self.length - POSITION_EPSILON {
                break;
            }
            points.push(center);
        }
        points
    }
}

// ============================================================================
// STUD POSITIONS
// ============================================================================

/// Every common-stud position before opening suppression: start block,
/// end block and on-center studs, rounded, deduplicated and sorted.
pub fn candidate_stud_positions(wall: &WallSpec) -> Vec<f64> {
    let frame = WallFrame::new(wall);
    let start_edge = wall.start_stud_count as f64 * STUD_THICKNESS;
    let end_edge = wall.length_in - wall.end_stud_count as f64 * STUD_THICKNESS;

    let mut positions = Vec::new();
    for i in 0..wall.start_stud_count {
        positions.push(i as f64 * STUD_THICKNESS);
    }
    for i in 0..wall.end_stud_count {
        positions.push(wall.length_in - (i + 1) as f64 * STUD_THICKNESS);
    }

    let multiplicity = wall.stud_multiplicity.max(1);
    let half_bundle = multiplicity as f64 * STUD_THICKNESS / 2.0;
    for center in frame.on_center_points() {
        for k in 0..multiplicity {
            let x = center - half_bundle + k as f64 * STUD_THICKNESS;
            if x >= start_edge - POSITION_EPSILON && x + STUD_THICKNESS <= end_edge + POSITION_EPSILON {
                positions.push(x);
            }
        }
    }

    let mut keys: Vec<i64> = positions.into_iter().map(position_key).collect();
    keys.sort_unstable();
    keys.dedup();
    keys.into_iter().map(|k| k as f64 / 100.0).collect()
}

/// Common-stud positions that survive opening suppression.
///
/// A stud is dropped when its center lies within any placed opening.
pub fn stud_positions(wall: &WallSpec, placed: &[PlacedOpening]) -> Vec<f64> {
    candidate_stud_positions(wall)
        .into_iter()
        .filter(|x| {
            let center = x + STUD_THICKNESS / 2.0;
            !placed.iter().any(|p| p.contains(center))
        })
        .collect()
}

// ============================================================================
// BLOCKING
// ============================================================================

/// One block between two adjacent studs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockPlacement {
    /// Left end (the right face of the left stud)
    pub x: f64,
    /// y of the block's top face
    pub y: f64,
    /// Clear distance between the studs
    pub length: f64,
    /// Index of the stud pair the block sits in
    pub gap_index: usize,
    pub row: u32,
}

/// Blocking for every bay wider than 3" whose midpoint is outside all openings.
///
/// Rows are spread evenly over the stud height; even bays are raised and odd
/// bays lowered by [`BLOCKING_STAGGER`] so blocks can be end-nailed.
pub fn blocking_layout(wall: &WallSpec, studs: &[f64], placed: &[PlacedOpening]) -> Vec<BlockPlacement> {
    let rows = wall.blocking_rows;
    if rows == 0 {
        return Vec::new();
    }
    let frame = WallFrame::new(wall);
    let mut blocks = Vec::new();

    for (gap_index, pair) in studs.windows(2).enumerate() {
        let left = pair[0] + STUD_THICKNESS;
        let gap = round_hundredths(pair[1] - left);
        if gap <= MIN_BLOCKING_GAP {
            continue;
        }
        let midpoint = left + gap / 2.0;
        if placed.iter().any(|p| p.contains(midpoint)) {
            continue;
        }
        let stagger = if gap_index % 2 == 0 {
            -BLOCKING_STAGGER
        } else {
            BLOCKING_STAGGER
        };
        for row in 0..rows {
            let fraction = (row + 1) as f64 / (rows + 1) as f64;
            let base = TOP_PLATE_ZONE + frame.stud_length * fraction - STUD_THICKNESS / 2.0;
            blocks.push(BlockPlacement {
                x: left,
                y: round_hundredths(base + stagger),
                length: gap,
                gap_index,
                row,
            });
        }
    }
    blocks
}

// ============================================================================
// OPENING FRAMING
// ============================================================================

/// A short stud above a header or below a sill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CripplePlacement {
    pub x: f64,
    pub y: f64,
    pub length: f64,
}

/// Horizontal sill under a window's rough opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SillPlacement {
    pub x: f64,
    pub y: f64,
    pub length: f64,
}

/// Full framing of one placed opening.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningFrame {
    pub king_xs: Vec<f64>,
    pub king_length: f64,
    pub jack_xs: Vec<f64>,
    /// y of the jacks' top (the header's underside)
    pub jack_top: f64,
    pub jack_length: f64,
    pub header_x: f64,
    pub header_length: f64,
    pub header_top: f64,
    pub header_depth: f64,
    pub header_plies: u32,
    pub sill: Option<SillPlacement>,
    pub cripples: Vec<CripplePlacement>,
}

/// Cripples at the wall's on-center points that fit inside `[left, right]`.
fn cripple_run(frame: &WallFrame, left: f64, right: f64, y: f64, length: f64) -> Vec<CripplePlacement> {
    if length <= POSITION_EPSILON {
        return Vec::new();
    }
    frame
        .on_center_points()
        .into_iter()
        .map(|center| round_hundredths(center - STUD_THICKNESS / 2.0))
        .filter(|x| *x >= left - POSITION_EPSILON && x + STUD_THICKNESS <= right + POSITION_EPSILON)
        .map(|x| CripplePlacement {
            x,
            y: round_hundredths(y),
            length: round_hundredths(length),
        })
        .collect()
}

/// Lay out kings, jacks, header, sill and cripples for one opening.
///
/// Doors hang the header from the door height (never above the top plate)
/// and fill any space above it with cripples. Windows hang the header from
/// the top plate, lowered by the optional drop, set a sill at the bottom of
/// the rough opening, and fill above the header and below the sill.
pub fn frame_opening(frame: &WallFrame, placed: &PlacedOpening) -> OpeningFrame {
    let opening = &placed.opening;
    let kings = opening.king_studs_per_side;
    let jacks = opening.jack_studs_per_side;
    let header_depth = opening.header_size.depth_in();

    let mut king_xs = Vec::new();
    for i in 0..kings {
        king_xs.push(round_hundredths(placed.x_start + i as f64 * STUD_THICKNESS));
        king_xs.push(round_hundredths(placed.x_end - (i + 1) as f64 * STUD_THICKNESS));
    }

    let king_block = kings as f64 * STUD_THICKNESS;
    let mut jack_xs = Vec::new();
    for i in 0..jacks {
        jack_xs.push(round_hundredths(placed.x_start + king_block + i as f64 * STUD_THICKNESS));
        jack_xs.push(round_hundredths(placed.x_end - king_block - (i + 1) as f64 * STUD_THICKNESS));
    }

    let header_top = match opening.kind {
        OpeningKind::Door => {
            let hung = frame.bottom_plate_top - opening.height_in - header_depth;
            hung.max(TOP_PLATE_ZONE)
        }
        OpeningKind::Window => TOP_PLATE_ZONE + opening.effective_drop_in(),
    };
    let header_bottom = header_top + header_depth;
    let jack_length = round_hundredths(frame.bottom_plate_top - header_bottom);
    if jack_length <= POSITION_EPSILON {
        jack_xs.clear();
    }

    let between_kings = (placed.x_start + king_block, placed.x_end - king_block);
    let rough = (
        between_kings.0 + jacks as f64 * STUD_THICKNESS,
        between_kings.1 - jacks as f64 * STUD_THICKNESS,
    );

    let mut cripples = cripple_run(
        frame,
        between_kings.0,
        between_kings.1,
        TOP_PLATE_ZONE,
        header_top - TOP_PLATE_ZONE,
    );

    let sill = match opening.kind {
        OpeningKind::Door => None,
        OpeningKind::Window => {
            let sill_y = header_bottom + opening.height_in;
            let below_top = sill_y + STUD_THICKNESS;
            cripples.extend(cripple_run(
                frame,
                rough.0,
                rough.1,
                below_top,
                frame.bottom_plate_top - below_top,
            ));
            Some(SillPlacement {
                x: round_hundredths(rough.0),
                y: round_hundredths(sill_y),
                length: opening.width_in,
            })
        }
    };

    OpeningFrame {
        king_xs,
        king_length: frame.stud_length,
        jack_xs,
        jack_top: round_hundredths(header_bottom),
        jack_length,
        header_x: round_hundredths(between_kings.0),
        header_length: round_hundredths(between_kings.1 - between_kings.0),
        header_top: round_hundredths(header_top),
        header_depth,
        header_plies: opening.header_ply.count(),
        sill,
        cripples,
    }
}

/// Complete horizontal layout for a wall: placed openings, surviving studs
/// and blocking. Computed once and shared by both output paths.
#[derive(Debug, Clone, PartialEq)]
pub struct WallLayout {
    pub frame: WallFrame,
    pub openings: Vec<PlacedOpening>,
    pub opening_frames: Vec<OpeningFrame>,
    pub studs: Vec<f64>,
    pub blocking: Vec<BlockPlacement>,
}

impl WallLayout {
    pub fn new(wall: &WallSpec) -> Self {
        let frame = WallFrame::new(wall);
        let openings = resolve_openings(wall.length_in, &wall.openings);
        let studs = stud_positions(wall, &openings);
        let blocking = blocking_layout(wall, &studs, &openings);
        let opening_frames = openings.iter().map(|p| frame_opening(&frame, p)).collect();
        WallLayout {
            frame,
            openings,
            opening_frames,
            studs,
            blocking,
        }
    }
}
