use crate::pearson::{self, complete_pairs};
use crate::rank::rank_data;

/// Spearman correlation: Pearson on fractional ranks of the complete pairs.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let (x, y) = complete_pairs(x, y);
    pearson::correlation(&rank_data(&x), &rank_data(&y))
}
