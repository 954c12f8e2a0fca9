use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::data::DataSource;
use crate::error::Result;
use crate::method::CorrelationMethod;

/// Symmetric pairwise correlation scores over a set of labels.
///
/// Each unordered pair is stored once under its lexicographically ordered key, so
/// `get(a, b)` and `get(b, a)` read the same entry. Labels are never paired with themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    method: CorrelationMethod,
    names: Vec<String>,
    scores: BTreeMap<(String, String), f64>,
}

impl CorrelationMatrix {
    /// Correlate every pair of rows (`by_rows`) or columns of `source`.
    pub fn build<D>(source: &D, method: CorrelationMethod, by_rows: bool) -> Self
    where
        D: DataSource + ?Sized,
    {
        let data = if by_rows { source.rows() } else { source.columns() };
        let names: Vec<String> = data.keys().cloned().collect();
        let estimate = method.estimator();
        let axis = if by_rows { "rows" } else { "columns" };

        info!(
            %method,
            labels = names.len(),
            axis,
            "computing pairwise correlations"
        );

        let mut matrix = Self {
            method,
            names: Vec::new(),
            scores: BTreeMap::new(),
        };
        for (i, name_1) in names.iter().enumerate() {
            for name_2 in &names[i + 1..] {
                let score = estimate(&data[name_1], &data[name_2]);
                matrix.insert(name_1, name_2, score);
            }
        }
        matrix.names = names;

        debug!(pairs = matrix.scores.len(), "correlation matrix built");
        matrix
    }

    /// Like [`build`](Self::build), with the method given by name.
    pub fn build_named<D>(source: &D, method: &str, by_rows: bool) -> Result<Self>
    where
        D: DataSource + ?Sized,
    {
        let method = CorrelationMethod::parse(method)?;
        Ok(Self::build(source, method, by_rows))
    }

    // single write path for both orderings of a pair
    fn insert(&mut self, a: &str, b: &str, score: f64) {
        self.scores.insert(pair_key(a, b), score);
    }

    pub fn method(&self) -> CorrelationMethod {
        self.method
    }

    /// Sorted participating labels.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Score for the pair in either order; `None` for `a == a` or unknown labels.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return None;
        }
        self.scores.get(&pair_key(a, b)).copied()
    }

    /// Number of unordered pairs.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Each unordered pair once, as `(a, b, score)` with `a < b`, in sorted order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.scores
            .iter()
            .map(|((a, b), &score)| (a.as_str(), b.as_str(), score))
    }

    /// Both orderings of every pair, as a symmetric lookup table would list them.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.pairs()
            .flat_map(|(a, b, score)| [(a, b, score), (b, a, score)])
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
