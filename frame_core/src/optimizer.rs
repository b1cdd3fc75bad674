//! # Stock Optimizer
//!
//! Assigns required cut lengths to purchasable stock lengths with a greedy
//! first-fit heuristic:
//!
//! 1. Cuts longer than the longest stock are split into full-length pieces
//!    plus a remainder.
//! 2. Cuts are sorted longest first.
//! 3. Each cut goes into the earliest-opened bin with room for it.
//! 4. Otherwise a new bin is opened with the shortest stock that holds the
//!    cut (or the longest stock when none does).
//!
//! The result is deterministic but not optimal. Purchase lists downstream
//! are calibrated to exactly this behavior.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::optimizer::{optimize, StockTally};
//!
//! let tally = optimize(&[96.0, 96.0, 48.0], &[192.0]);
//! assert_eq!(tally, vec![StockTally { length: 192.0, count: 2 }]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::units::{position_key, POSITION_EPSILON};

/// One stock piece and the cuts assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBin {
    pub stock_length: f64,
    pub cuts: Vec<f64>,
    pub remaining: f64,
}

impl StockBin {
    fn open(stock_length: f64) -> Self {
        StockBin {
            stock_length,
            cuts: Vec::new(),
            remaining: stock_length,
        }
    }

    fn fits(&self, cut: f64) -> bool {
        self.remaining + POSITION_EPSILON >= cut
    }

    /// Cuts within tolerance of the remaining length use it up exactly.
    fn place(&mut self, cut: f64) {
        self.cuts.push(cut);
        self.remaining = (self.remaining - cut).max(0.0);
    }

    /// Offcut left after all assigned cuts
    pub fn waste(&self) -> f64 {
        self.remaining
    }
}

/// Number of pieces to buy at one stock length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockTally {
    pub length: f64,
    pub count: u32,
}

/// Split every cut longer than `max_stock` into full pieces plus a remainder.
pub fn split_oversize(cuts: &[f64], max_stock: f64) -> Vec<f64> {
    let mut pieces = Vec::with_capacity(cuts.len());
    for &cut in cuts {
        if cut <= POSITION_EPSILON {
            continue;
        }
        if !cut.is_finite() {
            warn!(cut, "non-finite cut length dropped");
            continue;
        }
        if max_stock <= 0.0 || cut <= max_stock + POSITION_EPSILON {
            pieces.push(cut);
            continue;
        }
        warn!(cut, max_stock, "cut longer than longest stock, splitting");
        let mut rest = cut;
        while rest > max_stock + POSITION_EPSILON {
            pieces.push(max_stock);
            rest -= max_stock;
        }
        if rest > POSITION_EPSILON {
            pieces.push(rest);
        }
    }
    pieces
}

/// Pack cuts into stock bins. Bins are returned in the order they were opened.
pub fn pack(cuts: &[f64], stock: &[f64]) -> Vec<StockBin> {
    let mut lengths: Vec<f64> = stock.iter().copied().filter(|l| *l > 0.0).collect();
    lengths.sort_by(|a, b| a.total_cmp(b));
    lengths.dedup_by(|a, b| position_key(*a) == position_key(*b));
    let Some(&longest) = lengths.last() else {
        if !cuts.is_empty() {
            warn!(cuts = cuts.len(), "no stock lengths available, cuts left unpacked");
        }
        return Vec::new();
    };

    let mut pieces = split_oversize(cuts, longest);
    pieces.sort_by(|a, b| b.total_cmp(a));

    let mut bins: Vec<StockBin> = Vec::new();
    for cut in pieces {
        if let Some(bin) = bins.iter_mut().find(|bin| bin.fits(cut)) {
            bin.place(cut);
            continue;
        }
        let stock_length = lengths
            .iter()
            .copied()
            .find(|l| *l + POSITION_EPSILON >= cut)
            .unwrap_or(longest);
        trace!(cut, stock_length, "opening stock bin");
        let mut bin = StockBin::open(stock_length);
        bin.place(cut);
        bins.push(bin);
    }
    bins
}

/// Count bins per stock length, shortest first.
pub fn summarize_bins(bins: &[StockBin]) -> Vec<StockTally> {
    let mut tallies: Vec<StockTally> = Vec::new();
    for bin in bins {
        match tallies
            .iter_mut()
            .find(|t| position_key(t.length) == position_key(bin.stock_length))
        {
            Some(tally) => tally.count += 1,
            None => tallies.push(StockTally {
                length: bin.stock_length,
                count: 1,
            }),
        }
    }
    tallies.sort_by(|a, b| a.length.total_cmp(&b.length));
    tallies
}

/// Pack cuts and return `(stock length, count)` pairs.
pub fn optimize(cuts: &[f64], stock: &[f64]) -> Vec<StockTally> {
    summarize_bins(&pack(cuts, stock))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greedy_first_fit() {
        // 96 + 96 fill the first 192, 48 opens a second
        let bins = pack(&[96.0, 96.0, 48.0], &[192.0]);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].cuts, vec![96.0, 96.0]);
        assert_eq!(bins[0].remaining, 0.0);
        assert_eq!(bins[1].cuts, vec![48.0]);
        assert_eq!(bins[1].waste(), 144.0);
        assert_eq!(
            optimize(&[96.0, 96.0, 48.0], &[192.0]),
            vec![StockTally { length: 192.0, count: 2 }]
        );
    }

    #[test]
    fn test_sorted_descending_before_packing() {
        let bins = pack(&[30.0, 100.0, 60.0], &[192.0]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].cuts, vec![100.0, 60.0, 30.0]);
    }

    #[test]
    fn test_smallest_fitting_stock_for_new_bin() {
        let stock = [96.0, 120.0, 144.0];
        let bins = pack(&[100.0, 50.0], &stock);
        // 100 opens a 120; 50 does not fit the 20 left and opens a 96
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].stock_length, 120.0);
        assert_eq!(bins[1].stock_length, 96.0);
        assert_eq!(
            summarize_bins(&bins),
            vec![
                StockTally { length: 96.0, count: 1 },
                StockTally { length: 120.0, count: 1 },
            ]
        );
    }

    #[test]
    fn test_ties_favor_earliest_bin() {
        let bins = pack(&[60.0, 60.0, 30.0], &[96.0]);
        // 60 | 60 | 30 goes into the first bin (36 left there)
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].cuts, vec![60.0, 30.0]);
        assert_eq!(bins[1].cuts, vec![60.0]);
    }

    #[test]
    fn test_oversize_cut_split() {
        assert_eq!(split_oversize(&[400.0], 192.0), vec![192.0, 192.0, 16.0]);
        assert_eq!(split_oversize(&[384.0], 192.0), vec![192.0, 192.0]);
        let tally = optimize(&[240.0], &[192.0]);
        // 192 + remainder 48 in a second 192
        assert_eq!(tally, vec![StockTally { length: 192.0, count: 2 }]);
    }

    #[test]
    fn test_cut_within_tolerance_of_stock() {
        assert_eq!(split_oversize(&[192.005], 192.0), vec![192.005]);
        let bins = pack(&[192.005], &[96.0, 192.0]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].stock_length, 192.0);
        assert_eq!(bins[0].remaining, 0.0);

        // 96.004 uses up a 96 and still takes the shorter stock
        let bins = pack(&[96.004, 95.996], &[96.0, 192.0]);
        assert_eq!(bins[0].stock_length, 96.0);
        assert_eq!(bins[0].cuts, vec![96.004]);
        assert_eq!(bins[0].waste(), 0.0);
        assert!(bins.iter().all(|b| b.remaining >= 0.0));
    }

    #[test]
    fn test_non_finite_cuts_dropped() {
        assert_eq!(split_oversize(&[f64::INFINITY, f64::NAN, 48.0], 192.0), vec![48.0]);
        assert_eq!(optimize(&[f64::INFINITY], &[192.0]), Vec::new());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(optimize(&[], &[96.0]).is_empty());
        assert!(optimize(&[50.0], &[]).is_empty());
        assert!(optimize(&[0.0, -1.0], &[96.0]).is_empty());
    }

    #[test]
    fn test_unsorted_duplicate_stock() {
        let tally = optimize(&[90.0, 90.0], &[192.0, 96.0, 96.0]);
        assert_eq!(tally, vec![StockTally { length: 96.0, count: 2 }]);
    }
}
