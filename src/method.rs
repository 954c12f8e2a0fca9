use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::CorrError;
use crate::{kendall, pearson, spearman};

/// Estimator signature shared by every correlation method.
pub type Estimator = fn(&[f64], &[f64]) -> f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum CorrelationMethod {
    #[strum(serialize = "Pearson")]
    Pearson,
    #[strum(serialize = "Spearman")]
    Spearman,
    #[strum(serialize = "Kendall")]
    Kendall,
}

impl CorrelationMethod {
    pub fn estimator(self) -> Estimator {
        match self {
            CorrelationMethod::Pearson => pearson::correlation,
            CorrelationMethod::Spearman => spearman::correlation,
            CorrelationMethod::Kendall => kendall::correlation,
        }
    }

    /// Parse a method name, surfacing unknown names as [`CorrError::UnsupportedMethod`].
    pub fn parse(name: &str) -> Result<Self, CorrError> {
        Self::from_str(name.trim()).map_err(|_| CorrError::UnsupportedMethod(name.to_string()))
    }
}
