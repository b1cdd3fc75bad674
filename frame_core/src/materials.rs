//! # Material Aggregator
//!
//! Runs the cut extractor over a set of walls and drives the stock optimizer
//! to produce purchase lists per wall, per floor and for the whole project.
//!
//! Floor and project lists are optimized over the *merged* raw cuts of their
//! walls, so offcuts from one wall can serve another. They are not the sum of
//! the per-wall lists.
//!
//! ## JSON Example
//!
//! ```json
//! [
//!   { "quantity": 12, "description": "2x4 Precut Stud", "length": "92-5/8\"" },
//!   { "quantity": 2, "description": "2x4 Stud", "length": 96.0 },
//!   { "quantity": 6, "description": "7/16\" OSB Sheathing", "length": "4x8" }
//! ]
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cuts::{extract_cuts_with, CutCategory, RawCutSet};
use crate::lumber::LumberSize;
use crate::optimizer::{pack, summarize_bins, StockBin};
use crate::project::{Floor, Wall};
use crate::settings::EstimateSettings;
use crate::units::{format_inches, position_key};
use crate::wall::WallSpec;

/// Length of a purchasable item: numeric inches for stock lumber, or a
/// label for precut studs and sheet goods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialLength {
    Inches(f64),
    Label(String),
}

impl MaterialLength {
    fn cmp_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (MaterialLength::Inches(a), MaterialLength::Inches(b)) => position_key(*a).cmp(&position_key(*b)),
            (MaterialLength::Inches(_), MaterialLength::Label(_)) => Ordering::Less,
            (MaterialLength::Label(_), MaterialLength::Inches(_)) => Ordering::Greater,
            (MaterialLength::Label(a), MaterialLength::Label(b)) => a.cmp(b),
        }
    }
}

impl std::fmt::Display for MaterialLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialLength::Inches(inches) => write!(f, "{}' ({})", inches / 12.0, format_inches(*inches)),
            MaterialLength::Label(label) => write!(f, "{}", label),
        }
    }
}

/// One line of a purchase list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub quantity: u32,
    pub description: String,
    pub length: MaterialLength,
}

/// Purchase lists at every level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialReport {
    pub project_list: Vec<MaterialItem>,
    pub by_wall: BTreeMap<Uuid, Vec<MaterialItem>>,
    pub by_floor: BTreeMap<Uuid, Vec<MaterialItem>>,
}

/// Packed stock for one (category, size) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutGroup {
    pub category: CutCategory,
    pub size: LumberSize,
    pub bins: Vec<StockBin>,
}

impl CutGroup {
    pub fn description(&self) -> String {
        format!("{} {}", self.size, self.category.display_name())
    }
}

/// Pack every lumber group of a cut set into its category's stock lengths.
pub fn pack_groups(cuts: &RawCutSet, settings: &EstimateSettings) -> Vec<CutGroup> {
    cuts.groups()
        .into_iter()
        .map(|((category, size), lengths)| {
            let bins = pack(&lengths, settings.stock_for(category));
            debug!(
                category = category.display_name(),
                size = size.display_name(),
                cuts = lengths.len(),
                bins = bins.len(),
                "packed cut group"
            );
            CutGroup { category, size, bins }
        })
        .collect()
}

/// Merge identical (description, length) lines and sort by description,
/// then length (numeric lengths before labels).
pub fn merge_items(items: Vec<MaterialItem>) -> Vec<MaterialItem> {
    let mut merged: Vec<MaterialItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            continue;
        }
        match merged
            .iter_mut()
            .find(|m| m.description == item.description && m.length.cmp_key(&item.length) == Ordering::Equal)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => merged.push(item),
        }
    }
    merged.sort_by(|a, b| {
        a.description
            .cmp(&b.description)
            .then_with(|| a.length.cmp_key(&b.length))
    });
    merged
}

/// Purchase list for a set of raw cuts.
pub fn materials_from_cuts(cuts: &RawCutSet, settings: &EstimateSettings) -> Vec<MaterialItem> {
    let mut items = Vec::new();

    for precut in &cuts.precuts {
        items.push(MaterialItem {
            quantity: precut.count,
            description: format!("{} Precut Stud", precut.size),
            length: MaterialLength::Label(format_inches(precut.length)),
        });
    }

    for group in pack_groups(cuts, settings) {
        let description = group.description();
        for tally in summarize_bins(&group.bins) {
            items.push(MaterialItem {
                quantity: tally.count,
                description: description.clone(),
                length: MaterialLength::Inches(tally.length),
            });
        }
    }

    for sheet in &cuts.sheets {
        items.push(MaterialItem {
            quantity: sheet.count,
            description: format!("{} Sheathing", sheet.material),
            length: MaterialLength::Label("4x8".to_string()),
        });
    }

    merge_items(items)
}

/// Purchase list for a single wall.
pub fn wall_materials(wall: &WallSpec, settings: &EstimateSettings) -> Vec<MaterialItem> {
    materials_from_cuts(&extract_cuts_with(wall, settings), settings)
}

/// Purchase lists for every wall, every floor and the whole project.
///
/// `by_floor` has an entry for each floor given, empty when no wall is on
/// it. Walls whose floor is not in `floors` count toward the project list
/// only.
pub fn calculate_materials(walls: &[Wall], floors: &[Floor], settings: &EstimateSettings) -> MaterialReport {
    let mut report = MaterialReport::default();
    let mut project_cuts = RawCutSet::default();
    let mut floor_cuts: BTreeMap<Uuid, RawCutSet> = floors.iter().map(|f| (f.id, RawCutSet::default())).collect();

    for wall in walls {
        let cuts = extract_cuts_with(&wall.spec, settings);
        debug!(
            wall = %wall.label,
            cuts = cuts.cuts.len(),
            precuts = cuts.precut_total(),
            "extracted wall cuts"
        );
        report.by_wall.insert(wall.id, materials_from_cuts(&cuts, settings));

        match wall.floor.and_then(|id| floor_cuts.get_mut(&id)) {
            Some(floor_set) => floor_set.merge(&cuts),
            None if wall.floor.is_some() => {
                debug!(wall = %wall.label, "wall references unknown floor");
            }
            None => {}
        }
        project_cuts.merge(&cuts);
    }

    for (floor_id, cuts) in floor_cuts {
        report.by_floor.insert(floor_id, materials_from_cuts(&cuts, settings));
    }
    report.project_list = materials_from_cuts(&project_cuts, settings);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall::Opening;

    fn find<'a>(items: &'a [MaterialItem], description: &str) -> Vec<&'a MaterialItem> {
        items.iter().filter(|i| i.description == description).collect()
    }

    fn wall(label: &str, floor: Option<Uuid>, spec: WallSpec) -> Wall {
        Wall {
            id: Uuid::new_v4(),
            label: label.to_string(),
            floor,
            spec,
        }
    }

    #[test]
    fn test_plain_wall_list() {
        let items = wall_materials(&WallSpec::new(96.0, 97.125), &EstimateSettings::default());
        let precut = find(&items, "2x4 Precut Stud");
        assert_eq!(precut.len(), 1);
        assert_eq!(precut[0].quantity, 7);
        assert_eq!(precut[0].length, MaterialLength::Label("92-5/8\"".to_string()));

        // three 96" plates: two share one 192", the third opens another
        let plates = find(&items, "2x4 Plate");
        assert_eq!(plates.len(), 1);
        assert_eq!(plates[0].quantity, 2);
        assert_eq!(plates[0].length, MaterialLength::Inches(192.0));
    }

    #[test]
    fn test_window_wall_list() {
        let spec = WallSpec::new(192.0, 97.125).with_opening(Opening::window(36.0, 48.0));
        let items = wall_materials(&spec, &EstimateSettings::default());

        assert_eq!(find(&items, "2x4 Precut Stud")[0].quantity, 12);
        // 192 x3 plates, 36" sill rides in a fourth 192
        assert_eq!(find(&items, "2x4 Plate")[0].quantity, 4);
        // two 39" header plies fit in one 192
        let headers = find(&items, "2x10 Header");
        assert_eq!(headers[0].quantity, 1);
        // jacks 83-3/8 each take a 96; cripples 33-7/8: two share a 96, the third opens another
        let studs = find(&items, "2x4 Stud");
        assert_eq!(studs.len(), 1);
        assert_eq!(studs[0].quantity, 4);
        assert_eq!(studs[0].length, MaterialLength::Inches(96.0));
    }

    #[test]
    fn test_merge_and_sort() {
        let items = vec![
            MaterialItem {
                quantity: 2,
                description: "2x4 Stud".to_string(),
                length: MaterialLength::Inches(120.0),
            },
            MaterialItem {
                quantity: 1,
                description: "2x4 Plate".to_string(),
                length: MaterialLength::Inches(192.0),
            },
            MaterialItem {
                quantity: 3,
                description: "2x4 Stud".to_string(),
                length: MaterialLength::Inches(96.0),
            },
            MaterialItem {
                quantity: 4,
                description: "2x4 Stud".to_string(),
                length: MaterialLength::Inches(120.0),
            },
        ];
        let merged = merge_items(items);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].description, "2x4 Plate");
        assert_eq!(merged[1].length, MaterialLength::Inches(96.0));
        assert_eq!(merged[2].quantity, 6);
    }

    #[test]
    fn test_report_levels() {
        let floors = vec![
            Floor {
                id: Uuid::new_v4(),
                name: "Level 1".to_string(),
            },
            Floor {
                id: Uuid::new_v4(),
                name: "Level 2".to_string(),
            },
        ];
        let walls = vec![
            wall("A", Some(floors[0].id), WallSpec::new(96.0, 97.125)),
            wall("B", Some(floors[0].id), WallSpec::new(96.0, 97.125)),
            wall("C", None, WallSpec::new(96.0, 97.125)),
        ];
        let report = calculate_materials(&walls, &floors, &EstimateSettings::default());

        assert_eq!(report.by_wall.len(), 3);
        assert_eq!(report.by_floor.len(), 2);
        assert!(report.by_floor[&floors[1].id].is_empty());

        let level1 = &report.by_floor[&floors[0].id];
        assert_eq!(find(level1, "2x4 Precut Stud")[0].quantity, 14);
        // six 96" plates pack into three 192s across both walls
        assert_eq!(find(level1, "2x4 Plate")[0].quantity, 3);

        let project = &report.project_list;
        assert_eq!(find(project, "2x4 Precut Stud")[0].quantity, 21);
        // nine 96" plates -> five 192s
        assert_eq!(find(project, "2x4 Plate")[0].quantity, 5);
    }

    #[test]
    fn test_sheathing_items() {
        let mut spec = WallSpec::new(192.0, 97.125);
        spec.sheathing = true;
        spec.sheathing_material = crate::lumber::SheathingMaterial::Plywood1_2;
        let items = wall_materials(&spec, &EstimateSettings::default());
        let sheets = find(&items, "1/2\" Plywood Sheathing");
        // 4 columns x 2 rows (96 + 1.125)
        assert_eq!(sheets[0].quantity, 8);
        assert_eq!(sheets[0].length, MaterialLength::Label("4x8".to_string()));
    }

    #[test]
    fn test_material_item_json() {
        let item = MaterialItem {
            quantity: 2,
            description: "2x4 Stud".to_string(),
            length: MaterialLength::Inches(96.0),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"quantity":2,"description":"2x4 Stud","length":96.0}"#);
        let label: MaterialLength = serde_json::from_str("\"4x8\"").unwrap();
        assert_eq!(label, MaterialLength::Label("4x8".to_string()));
    }
}
