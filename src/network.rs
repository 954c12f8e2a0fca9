use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::matrix::CorrelationMatrix;

pub const DEFAULT_RELATION: &str = "co-expression";

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub score: f64,
}

/// Edges between labels whose absolute correlation reaches a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    relation: String,
    edges: Vec<Edge>,
}

impl Network {
    /// Keep every pair with `|score| >= threshold`, one edge per unordered pair.
    ///
    /// Only the `source < target` ordering of each pair is visited, so mirrored duplicates
    /// never arise. `NaN` scores never pass.
    pub fn build(matrix: &CorrelationMatrix, threshold: f64) -> Self {
        let edges: Vec<Edge> = matrix
            .pairs()
            .filter(|&(a, b, score)| a != b && score.abs() >= threshold)
            .map(|(a, b, score)| Edge {
                source: a.to_string(),
                target: b.to_string(),
                score,
            })
            .collect();

        info!(
            threshold,
            edges = edges.len(),
            candidate_pairs = matrix.len(),
            "network built"
        );

        Self {
            relation: DEFAULT_RELATION.to_string(),
            edges,
        }
    }

    /// Replace the relation tag written in the middle SIF column.
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = relation.into();
        self
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Simple interaction format: `source<TAB>relation<TAB>target`, one edge per line.
    pub fn write_sif<W: Write>(&self, mut writer: W) -> Result<()> {
        for edge in &self.edges {
            writeln!(writer, "{}\t{}\t{}", edge.source, self.relation, edge.target)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_sif<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_sif(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::CorrelationMethod;
    use std::collections::BTreeMap;

    fn matrix() -> CorrelationMatrix {
        let mut rows = BTreeMap::new();
        rows.insert("a".to_string(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        rows.insert("b".to_string(), vec![2.0, 1.0, 4.0, 3.0, 5.0]);
        rows.insert("c".to_string(), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        rows.insert("d".to_string(), vec![3.0, 3.0, 3.0, 3.0, 3.0]);
        CorrelationMatrix::build(&rows, CorrelationMethod::Pearson, true)
    }

    #[test]
    fn threshold_keeps_signed_scores() {
        let network = Network::build(&matrix(), 0.9);
        let pairs: Vec<(&str, &str)> = network
            .edges()
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, [("a", "c")]);
        assert!((network.edges()[0].score + 1.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_is_inclusive() {
        // pearson(a, b) == 0.8
        let network = Network::build(&matrix(), 0.8);
        assert_eq!(network.len(), 3);
    }

    #[test]
    fn zero_threshold_keeps_every_pair_once() {
        let matrix = matrix();
        let network = Network::build(&matrix, 0.0);
        assert_eq!(network.len(), 6);
        assert_eq!(network.len(), matrix.len());
        assert!(network.edges().iter().all(|e| e.source < e.target));
    }

    #[test]
    fn above_one_is_empty() {
        assert!(Network::build(&matrix(), 1.1).is_empty());
    }

    #[test]
    fn sif_lines() {
        let network = Network::build(&matrix(), 0.9);
        let mut out = Vec::new();
        network.write_sif(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\tco-expression\tc\n");

        let mut out = Vec::new();
        network.with_relation("co-methylation").write_sif(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\tco-methylation\tc\n");
    }
}
