use thiserror::Error;

/// Errors raised while loading a matrix, building correlations or screening for normality.
///
/// Degenerate inputs (constant sequences, fewer than two complete pairs) are not errors:
/// the estimators score them as `0.0`.
#[derive(Debug, Error)]
pub enum CorrError {
    #[error("unsupported correlation method '{0}', must be one of Pearson, Spearman or Kendall")]
    UnsupportedMethod(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("input matrix has no header line")]
    MissingHeader,

    #[error("empty row label on line {line}")]
    EmptyRowLabel { line: usize },

    #[error("line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("no readable file found in tar archive")]
    NoArchiveEntry,

    /// Shapiro-Wilk needs at least three observations.
    #[error("'{label}' has {found} values, at least 3 are required")]
    TooFewSamples { label: String, found: usize },

    #[error("'{label}' has all values identical")]
    ZeroRange { label: String },
}

pub type Result<T> = std::result::Result<T, CorrError>;
