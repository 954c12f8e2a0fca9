/// Keep only the positions where both sequences hold a number.
///
/// Filtering is joint so the surviving entries stay index-aligned.
pub(crate) fn complete_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(
        x.len(),
        y.len(),
        "correlation requires equal sample count in both sequences"
    );

    let mut filtered_x = Vec::with_capacity(x.len());
    let mut filtered_y = Vec::with_capacity(y.len());
    for (&a, &b) in x.iter().zip(y) {
        if !a.is_nan() && !b.is_nan() {
            filtered_x.push(a);
            filtered_y.push(b);
        }
    }
    (filtered_x, filtered_y)
}

/// Pearson correlation with population moments.
///
/// Constant or empty input scores `0.0`.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let (x, y) = complete_pairs(x, y);
    let n = x.len();
    if n == 0 {
        return 0.0;
    }
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut ss_x = 0.0;
    let mut ss_y = 0.0;
    for k in 0..n {
        let dx = x[k] - mean_x;
        let dy = y[k] - mean_y;
        cov += dx * dy;
        ss_x += dx * dx;
        ss_y += dy * dy;
    }

    // population moments; the 1/n factors cancel in the ratio
    if ss_x == 0.0 || ss_y == 0.0 {
        return 0.0;
    }

    (cov / (ss_x * ss_y).sqrt()).clamp(-1.0, 1.0)
}
