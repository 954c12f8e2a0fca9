//! Shapiro-Wilk normality screen (Royston's AS R94 approximation).

use std::collections::BTreeMap;
use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, warn};

use crate::data::DataSource;
use crate::error::{CorrError, Result};

const SMALL: f64 = 1e-19;
const MAX_ACCURATE_N: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub w: f64,
    pub p_value: f64,
}

fn standard_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("Normal(0,1) should always be constructible")
}

// c[0] + c[1] x + c[2] x^2 + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &coef| acc * x + coef)
}

/// Half of the antisymmetric weight vector, largest weight first.
fn half_weights(n: usize, normal: &Normal) -> Vec<f64> {
    let nn2 = n / 2;
    if n == 3 {
        return vec![0.5_f64.sqrt()];
    }

    let an25 = n as f64 + 0.25;
    // expected normal order statistics of the lower half, most negative first
    let m: Vec<f64> = (1..=nn2)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let mut a = vec![0.0; nn2];
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    a[0] = a1;

    let (first_free, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    for i in first_free..nn2 {
        a[i] = -m[i] / fac;
    }
    a
}

/// Test `values` for normality. `NaN` entries are ignored.
pub fn shapiro_wilk(label: &str, values: &[f64]) -> Result<ShapiroWilk> {
    let mut x: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let n = x.len();
    if n < 3 {
        return Err(CorrError::TooFewSamples {
            label: label.to_string(),
            found: n,
        });
    }
    if n > MAX_ACCURATE_N {
        warn!(label, n, "Shapiro-Wilk p-value may be inaccurate above 5000 samples");
    }
    x.sort_by(f64::total_cmp);

    let range = x[n - 1] - x[0];
    if range < SMALL {
        return Err(CorrError::ZeroRange {
            label: label.to_string(),
        });
    }

    let normal = standard_normal();
    let a = half_weights(n, &normal);

    // scale by the range for stability; W is scale invariant
    let scaled: Vec<f64> = x.iter().map(|v| v / range).collect();
    let mean = scaled.iter().sum::<f64>() / n as f64;
    let ssq: f64 = scaled.iter().map(|v| (v - mean) * (v - mean)).sum();
    let sa: f64 = a
        .iter()
        .enumerate()
        .map(|(i, &ai)| ai * (scaled[n - 1 - i] - scaled[i]))
        .sum();
    let w = (sa * sa / ssq).min(1.0);

    let p_value = if n == 3 {
        (6.0 / PI * (w.sqrt().asin() - (0.75_f64).sqrt().asin())).max(0.0)
    } else {
        let an = n as f64;
        let mut y = (1.0 - w).ln();
        let (mean, sd) = if n <= 11 {
            let gamma = poly(&G, an);
            if y >= gamma {
                return Ok(ShapiroWilk { w, p_value: 1e-99 });
            }
            y = -(gamma - y).ln();
            (poly(&C3, an), poly(&C4, an).exp())
        } else {
            let ln_n = an.ln();
            (poly(&C5, ln_n), poly(&C6, ln_n).exp())
        };
        normal.cdf(-(y - mean) / sd)
    };

    debug!(label, n, w, p_value, "Shapiro-Wilk");
    Ok(ShapiroWilk {
        w,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

/// Labels whose Shapiro-Wilk p-value falls below `alpha`, with that p-value.
///
/// Rows or columns the test cannot handle are skipped.
pub fn not_normal<D>(source: &D, alpha: f64, by_rows: bool) -> BTreeMap<String, f64>
where
    D: DataSource + ?Sized,
{
    let data = if by_rows { source.rows() } else { source.columns() };
    let mut rejected = BTreeMap::new();
    for (label, values) in &data {
        match shapiro_wilk(label, values) {
            Ok(test) if test.p_value < alpha => {
                rejected.insert(label.clone(), test.p_value);
            }
            Ok(_) => {}
            Err(err) => warn!(%err, "skipping normality test"),
        }
    }
    rejected
}
