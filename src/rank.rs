/// Fractional ranking: 0-based positions in ascending order, tied values share the mean
/// of the positions they jointly occupy.
pub fn rank_data(data: &[f64]) -> Vec<f64> {
    let mut indexed_data: Vec<(usize, f64)> = data.iter().copied().enumerate().collect();
    // stable, so equal values keep input order inside their run
    indexed_data.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; data.len()];
    let mut i = 0;
    while i < indexed_data.len() {
        let mut j = i;
        while j + 1 < indexed_data.len() && indexed_data[j].1 == indexed_data[j + 1].1 {
            j += 1;
        }
        // mean of i..=j
        let rank = (i + j) as f64 / 2.0;
        for &(idx, _) in &indexed_data[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}
