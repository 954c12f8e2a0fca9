use crate::pearson::complete_pairs;
use crate::rank::rank_data;

/// Pair counts collected over every `i < j`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairCounts {
    pub concordant: u64,
    pub discordant: u64,
    pub tied_x: u64,
    pub tied_y: u64,
}

impl PairCounts {
    /// Tau-b from the counts; a zero denominator scores `0.0`.
    pub fn tau_b(&self) -> f64 {
        let directed = (self.concordant + self.discordant) as f64;
        let denom = ((directed + self.tied_x as f64) * (directed + self.tied_y as f64)).sqrt();
        if denom == 0.0 {
            return 0.0;
        }
        (self.concordant as f64 - self.discordant as f64) / denom
    }
}

/// Count concordant, discordant and tied pairs on two rank sequences of equal length.
pub fn pair_counts(rank_x: &[f64], rank_y: &[f64]) -> PairCounts {
    let n = rank_x.len();
    let mut counts = PairCounts::default();
    for i in 0..n {
        for j in i + 1..n {
            if rank_x[i] == rank_x[j] {
                counts.tied_x += 1;
            }
            if rank_y[i] == rank_y[j] {
                counts.tied_y += 1;
            }
            let dx = rank_x[i] - rank_x[j];
            let dy = rank_y[i] - rank_y[j];
            if (dx < 0.0 && dy < 0.0) || (dx > 0.0 && dy > 0.0) {
                counts.concordant += 1;
            } else if (dx < 0.0 && dy > 0.0) || (dx > 0.0 && dy < 0.0) {
                counts.discordant += 1;
            }
        }
    }
    counts
}

/// Kendall tau-b on the complete pairs of `x` and `y`.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let (x, y) = complete_pairs(x, y);
    pair_counts(&rank_data(&x), &rank_data(&y)).tau_b()
}
