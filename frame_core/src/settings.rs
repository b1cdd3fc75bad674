//! # Estimate Settings
//!
//! Purchasing knobs for the bill of materials: which stock lengths each
//! material category may be bought in, and which stud lengths are sold as
//! precut SKUs.

use serde::{Deserialize, Serialize};

use crate::cuts::CutCategory;

/// Stock lengths and precut rules used when building a purchase list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateSettings {
    /// Stock lengths for studs, kings, jacks and cripples (inches)
    pub stud_stock_in: Vec<f64>,

    pub blocking_stock_in: Vec<f64>,

    /// Plates (including sills) are bought in the longest length only
    pub plate_stock_in: Vec<f64>,

    pub header_stock_in: Vec<f64>,

    /// Standard precut stud lengths bought as their own SKU
    pub precut_lengths_in: Vec<f64>,

    /// How close a stud must be to a precut length to count as one
    pub precut_tolerance_in: f64,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        EstimateSettings {
            stud_stock_in: vec![96.0, 120.0, 144.0, 168.0, 192.0],
            blocking_stock_in: vec![96.0, 120.0, 144.0, 168.0, 192.0],
            plate_stock_in: vec![192.0],
            header_stock_in: vec![192.0],
            precut_lengths_in: vec![92.625, 104.625, 116.625],
            precut_tolerance_in: 0.0625,
        }
    }
}

impl EstimateSettings {
    /// Candidate stock lengths for a cut category
    pub fn stock_for(&self, category: CutCategory) -> &[f64] {
        match category {
            CutCategory::Plate | CutCategory::PtPlate => self.plate_stock_in.as_slice(),
            CutCategory::Stud => self.stud_stock_in.as_slice(),
            CutCategory::Blocking => self.blocking_stock_in.as_slice(),
            CutCategory::Header => self.header_stock_in.as_slice(),
            CutCategory::Sheet => &[],
        }
    }

    /// The precut length a stud cut matches, if any
    pub fn matching_precut(&self, length: f64) -> Option<f64> {
        self.precut_lengths_in
            .iter()
            .copied()
            .find(|precut| (precut - length).abs() <= self.precut_tolerance_in)
    }
}
