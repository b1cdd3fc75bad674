//! # Member Generator
//!
//! Turns a [`WallSpec`] into positioned 3D framing members for the wall
//! preview, the 3D viewer and geometry exporters. All placement comes from
//! [`WallLayout`]; this module only shapes each placement into a box and
//! names it.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::members::{generate_members, MemberKind};
//! use frame_core::wall::WallSpec;
//!
//! let members = generate_members(&WallSpec::new(96.0, 97.125));
//! let studs = members.iter().filter(|m| m.kind == MemberKind::Stud).count();
//! assert_eq!(studs, 7);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::layout::{WallLayout, TOP_PLATE_ZONE};
use crate::lumber::{HeaderPly, LumberSize, SheathingMaterial, STUD_THICKNESS};
use crate::units::{format_fraction, POSITION_EPSILON};
use crate::wall::WallSpec;

/// What a framing member is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    Plate,
    PtPlate,
    Stud,
    KingJack,
    Header,
    Sill,
    Cripple,
    Blocking,
    Sheathing,
}

impl MemberKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            MemberKind::Plate => "Plate",
            MemberKind::PtPlate => "PT Plate",
            MemberKind::Stud => "Stud",
            MemberKind::KingJack => "King/Jack",
            MemberKind::Header => "Header",
            MemberKind::Sill => "Sill",
            MemberKind::Cripple => "Cripple",
            MemberKind::Blocking => "Blocking",
            MemberKind::Sheathing => "Sheathing",
        }
    }
}

/// Local position of a member's corner: x along the wall, y down from the
/// top of the wall, z into the wall depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Box size along x (width), y (height) and z (depth).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extents {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// One physical framing member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingMember {
    /// Unique within one generation call (`name#n`)
    pub id: String,
    /// Grouping name: nominal size plus rounded length
    pub name: String,
    pub kind: MemberKind,
    pub position: Point3,
    pub size: Extents,
}

impl FramingMember {
    /// Length along the member's long axis
    pub fn length(&self) -> f64 {
        if self.is_vertical() {
            self.size.height
        } else {
            self.size.width
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self.kind, MemberKind::Stud | MemberKind::KingJack | MemberKind::Cripple)
    }
}

/// Per-call naming state: counts how many members share each name.
#[derive(Debug, Default)]
pub struct MemberNamer {
    counts: HashMap<String, u32>,
}

impl MemberNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for a lumber member, e.g. `2x4-92-5/8`
    pub fn lumber_name(size: LumberSize, length: f64) -> String {
        format!("{}-{}", size.display_name(), format_fraction(length))
    }

    /// Name for a sheathing panel, e.g. `OSB-48x96`
    pub fn panel_name(material: SheathingMaterial, width: f64, height: f64) -> String {
        format!("{}-{}x{}", material.tag(), format_fraction(width), format_fraction(height))
    }

    /// Next unique id for `name`
    pub fn next_id(&mut self, name: &str) -> String {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        format!("{}#{}", name, count)
    }
}

/// Accumulates members for one wall.
struct MemberSink {
    namer: MemberNamer,
    members: Vec<FramingMember>,
}

impl MemberSink {
    fn push(&mut self, kind: MemberKind, name: String, position: Point3, size: Extents) {
        if size.width <= POSITION_EPSILON || size.height <= POSITION_EPSILON {
            return;
        }
        let id = self.namer.next_id(&name);
        self.members.push(FramingMember {
            id,
            name,
            kind,
            position,
            size,
        });
    }

    fn vertical(&mut self, kind: MemberKind, size: LumberSize, x: f64, y: f64, length: f64) {
        let name = MemberNamer::lumber_name(size, length);
        self.push(
            kind,
            name,
            Point3 { x, y, z: 0.0 },
            Extents {
                width: STUD_THICKNESS,
                height: length,
                depth: size.depth_in(),
            },
        );
    }

    fn horizontal(&mut self, kind: MemberKind, size: LumberSize, x: f64, y: f64, length: f64, thickness: f64) {
        let name = MemberNamer::lumber_name(size, length);
        self.push(
            kind,
            name,
            Point3 { x, y, z: 0.0 },
            Extents {
                width: length,
                height: thickness,
                depth: size.depth_in(),
            },
        );
    }
}

/// Generate every framing member of a wall.
///
/// Output order: bottom plate, top plate(s), common studs, blocking, then
/// per opening kings, jacks, header plies, sill and cripples, and finally
/// sheathing panels. Naming counters are local to the call, so equal input
/// always yields equal output.
pub fn generate_members(wall: &WallSpec) -> Vec<FramingMember> {
    let layout = WallLayout::new(wall);
    let frame = &layout.frame;
    let stud = wall.stud_size;
    let mut sink = MemberSink {
        namer: MemberNamer::new(),
        members: Vec::new(),
    };

    let bottom_kind = if wall.pt_bottom_plate {
        MemberKind::PtPlate
    } else {
        MemberKind::Plate
    };
    sink.horizontal(bottom_kind, stud, 0.0, frame.bottom_plate_top, wall.length_in, STUD_THICKNESS);

    if wall.double_top_plate {
        sink.horizontal(MemberKind::Plate, stud, 0.0, 0.0, wall.length_in, STUD_THICKNESS);
        sink.horizontal(MemberKind::Plate, stud, 0.0, STUD_THICKNESS, wall.length_in, STUD_THICKNESS);
    } else {
        sink.horizontal(MemberKind::Plate, stud, 0.0, 0.0, wall.length_in, TOP_PLATE_ZONE);
    }

    for x in &layout.studs {
        sink.vertical(MemberKind::Stud, stud, *x, TOP_PLATE_ZONE, frame.stud_length);
    }

    for block in &layout.blocking {
        sink.horizontal(MemberKind::Blocking, stud, block.x, block.y, block.length, STUD_THICKNESS);
    }

    for (placed, opening_frame) in layout.openings.iter().zip(&layout.opening_frames) {
        for x in &opening_frame.king_xs {
            sink.vertical(MemberKind::KingJack, stud, *x, TOP_PLATE_ZONE, opening_frame.king_length);
        }
        for x in &opening_frame.jack_xs {
            sink.vertical(MemberKind::KingJack, stud, *x, opening_frame.jack_top, opening_frame.jack_length);
        }

        let header_size = placed.opening.header_size;
        for ply in 0..opening_frame.header_plies {
            let name = MemberNamer::lumber_name(header_size, opening_frame.header_length);
            sink.push(
                MemberKind::Header,
                name,
                Point3 {
                    x: opening_frame.header_x,
                    y: opening_frame.header_top,
                    z: HeaderPly::ply_offset_in(ply),
                },
                Extents {
                    width: opening_frame.header_length,
                    height: opening_frame.header_depth,
                    depth: STUD_THICKNESS,
                },
            );
        }

        if let Some(sill) = opening_frame.sill {
            sink.horizontal(MemberKind::Sill, stud, sill.x, sill.y, sill.length, STUD_THICKNESS);
        }

        for cripple in &opening_frame.cripples {
            sink.vertical(MemberKind::Cripple, stud, cripple.x, cripple.y, cripple.length);
        }
    }

    if wall.sheathing {
        for panel in sheathing_panels(wall.length_in, wall.height_in) {
            let material = wall.sheathing_material;
            let name = MemberNamer::panel_name(material, panel.size.width, panel.size.height);
            sink.push(
                MemberKind::Sheathing,
                name,
                Point3 {
                    x: panel.position.x,
                    y: panel.position.y,
                    z: frame.stud_depth,
                },
                Extents {
                    depth: material.thickness_in(),
                    ..panel.size
                },
            );
        }
    }

    sink.members
}

/// A sheathing panel's face rectangle (depth filled in by the caller).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    pub position: Point3,
    pub size: Extents,
}

/// Tile a wall face with 48"x96" panels, clipping the last row and column.
pub fn sheathing_panels(length: f64, height: f64) -> Vec<PanelPlacement> {
    let mut panels = Vec::new();
    if !length.is_finite() || !height.is_finite() {
        return panels;
    }
    let mut y = 0.0;
    while y < height - POSITION_EPSILON {
        let panel_height = SheathingMaterial::PANEL_HEIGHT_IN.min(height - y);
        let mut x = 0.0;
        while x < length - POSITION_EPSILON {
            let panel_width = SheathingMaterial::PANEL_WIDTH_IN.min(length - x);
            panels.push(PanelPlacement {
                position: Point3 { x, y, z: 0.0 },
                size: Extents {
                    width: panel_width,
                    height: panel_height,
                    depth: 0.0,
                },
            });
            x += SheathingMaterial::PANEL_WIDTH_IN;
        }
        y += SheathingMaterial::PANEL_HEIGHT_IN;
    }
    panels
}

/// Count members by kind.
pub fn member_counts(members: &[FramingMember]) -> BTreeMap<MemberKind, usize> {
    let mut counts = BTreeMap::new();
    for member in members {
        *counts.entry(member.kind).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::candidate_stud_positions;
    use crate::lumber::StudSpacing;
    use crate::wall::Opening;

    fn count(members: &[FramingMember], kind: MemberKind) -> usize {
        members.iter().filter(|m| m.kind == kind).count()
    }

    #[test]
    fn test_plain_wall_is_plates_and_studs() {
        let mut wall = WallSpec::new(150.0, 97.125);
        wall.stud_spacing = StudSpacing::Oc24;
        wall.stud_multiplicity = 2;
        wall.start_stud_count = 3;
        let members = generate_members(&wall);
        let plates = count(&members, MemberKind::Plate) + count(&members, MemberKind::PtPlate);
        let studs = count(&members, MemberKind::Stud);
        assert_eq!(plates, 3);
        assert_eq!(studs, candidate_stud_positions(&wall).len());
        assert_eq!(members.len(), plates + studs);
    }

    #[test]
    fn test_plates() {
        let mut wall = WallSpec::new(120.0, 97.125);
        wall.pt_bottom_plate = true;
        let members = generate_members(&wall);
        let bottom = &members[0];
        assert_eq!(bottom.kind, MemberKind::PtPlate);
        assert_eq!(bottom.position.y, 95.625);
        assert_eq!(bottom.size.width, 120.0);

        wall.double_top_plate = false;
        let members = generate_members(&wall);
        let tops: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Plate).collect();
        assert_eq!(tops.len(), 1);
        assert_eq!(tops[0].size.height, 3.0);
    }

    #[test]
    fn test_window_scenario_counts() {
        let wall = WallSpec::new(192.0, 97.125).with_opening(Opening::window(36.0, 48.0));
        let members = generate_members(&wall);
        let counts = member_counts(&members);

        assert_eq!(counts[&MemberKind::Plate], 3);
        assert_eq!(counts[&MemberKind::Stud], 10);
        assert_eq!(counts[&MemberKind::KingJack], 4);
        // one 2-ply header: two plies at the same spot
        assert_eq!(counts[&MemberKind::Header], 2);
        assert_eq!(counts[&MemberKind::Sill], 1);
        assert_eq!(counts[&MemberKind::Cripple], 3);

        let plies: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Header).collect();
        assert_eq!(plies[0].position.x, plies[1].position.x);
        assert_eq!(plies[0].position.z, 0.0);
        assert_eq!(plies[1].position.z, 2.0);
        assert_eq!(plies[0].name, "2x10-39");
    }

    #[test]
    fn test_triple_ply_header_offsets() {
        let window = Opening::window(48.0, 36.0).with_header(LumberSize::L2x12, HeaderPly::Triple);
        let wall = WallSpec::new(192.0, 97.125).with_opening(window);
        let members = generate_members(&wall);
        let plies: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Header).collect();

        assert_eq!(plies.len(), 3);
        let offsets: Vec<f64> = plies.iter().map(|p| p.position.z).collect();
        assert_eq!(offsets, vec![0.0, 2.0, 4.0]);
        assert!(plies.iter().all(|p| p.position.x == plies[0].position.x));
        assert!(plies.iter().all(|p| p.size.height == 11.25 && !p.is_vertical()));
        assert_eq!(plies[0].name, "2x12-51");
        assert_eq!(plies[2].id, "2x12-51#3");
    }

    #[test]
    fn test_unvalidated_non_finite_wall_terminates() {
        for length in [f64::NAN, f64::INFINITY] {
            let mut wall = WallSpec::new(length, 97.125).with_opening(Opening::window(36.0, 48.0));
            wall.sheathing = true;
            let members = generate_members(&wall);
            assert_eq!(count(&members, MemberKind::Sheathing), 0);
        }
    }

    #[test]
    fn test_length_follows_orientation() {
        let wall = WallSpec::new(48.0, 97.125);
        let members = generate_members(&wall);
        let stud = members.iter().find(|m| m.kind == MemberKind::Stud).unwrap();
        assert!(stud.is_vertical());
        assert_eq!(stud.length(), 92.625);
        assert!(!members[0].is_vertical());
        assert_eq!(members[0].length(), 48.0);
    }

    #[test]
    fn test_studs_skip_opening_span() {
        let wall = WallSpec::new(192.0, 97.125).with_opening(Opening::window(36.0, 48.0));
        let members = generate_members(&wall);
        assert!(members
            .iter()
            .filter(|m| m.kind == MemberKind::Stud)
            .all(|m| m.position.x + 0.75 < 75.0 || m.position.x + 0.75 > 117.0));
    }

    #[test]
    fn test_names_and_ids() {
        let wall = WallSpec::new(48.0, 97.125);
        let members = generate_members(&wall);
        let studs: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Stud).collect();
        assert_eq!(studs[0].name, "2x4-92-5/8");
        assert_eq!(studs[0].id, "2x4-92-5/8#1");
        assert_eq!(studs[3].id, "2x4-92-5/8#4");
        assert_eq!(members[1].id, "2x4-48#2");
    }

    #[test]
    fn test_generation_is_idempotent() {
        let mut wall = WallSpec::new(240.0, 109.125)
            .with_opening(Opening::window(48.0, 36.0).with_drop(4.0))
            .with_opening(Opening::door(36.0, 80.0).centered_at(200.0));
        wall.blocking_rows = 2;
        wall.sheathing = true;
        assert_eq!(generate_members(&wall), generate_members(&wall));
    }

    #[test]
    fn test_sheathing_tiles_and_clips() {
        let mut wall = WallSpec::new(100.0, 109.125);
        wall.sheathing = true;
        let members = generate_members(&wall);
        let panels: Vec<_> = members.iter().filter(|m| m.kind == MemberKind::Sheathing).collect();
        // 3 columns (48, 48, 4) x 2 rows (96, 13.125)
        assert_eq!(panels.len(), 6);
        assert!(panels.iter().all(|p| p.position.z == 3.5));
        let last = panels.last().unwrap();
        assert_eq!(last.size.width, 4.0);
        assert_eq!(last.size.height, 13.125);
        assert_eq!(last.size.depth, 0.4375);
        assert_eq!(panels[0].name, "OSB-48x96");
    }

    #[test]
    fn test_serialization_kind_tags() {
        let json = serde_json::to_string(&MemberKind::KingJack).unwrap();
        assert_eq!(json, "\"king-jack\"");
        let json = serde_json::to_string(&MemberKind::PtPlate).unwrap();
        assert_eq!(json, "\"pt-plate\"");
    }
}
