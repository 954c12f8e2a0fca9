// Cross-check tau-b against the `kendalls` crate on inputs where no pair is tied in both
// sequences at once; there the tie-corrected denominators coincide.

use coexnet::kendall;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn reference(x: &[i32], y: &[i32]) -> f64 {
    let (tau, _) = kendalls::tau_b(x, y).expect("reference tau-b");
    tau
}

fn as_f64(v: &[i32]) -> Vec<f64> {
    v.iter().map(|&x| x as f64).collect()
}

#[test]
fn matches_reference_without_ties() {
    let x = [3, 1, 4, 15, 9, 2, 6, 5];
    let y = [2, 7, 1, 8, 28, 18, 4, 5];
    let ours = kendall::correlation(&as_f64(&x), &as_f64(&y));
    assert!(approx_eq(ours, reference(&x, &y), 1e-12));
}

#[test]
fn matches_reference_with_ties_on_one_side() {
    let x = [1, 2, 2, 3, 4, 5];
    let y = [3, 1, 4, 5, 2, 6];
    let ours = kendall::correlation(&as_f64(&x), &as_f64(&y));
    assert!(approx_eq(ours, reference(&x, &y), 1e-12));

    let x = [1, 2, 3, 4, 5, 6];
    let y = [2, 2, 1, 3, 3, 4];
    let ours = kendall::correlation(&as_f64(&x), &as_f64(&y));
    assert!(approx_eq(ours, reference(&x, &y), 1e-12));
}

#[test]
fn matches_reference_with_disjoint_ties() {
    let x = [1, 1, 2, 3, 4];
    let y = [1, 2, 2, 3, 3];
    let ours = kendall::correlation(&as_f64(&x), &as_f64(&y));
    assert!(approx_eq(ours, reference(&x, &y), 1e-12));
}
