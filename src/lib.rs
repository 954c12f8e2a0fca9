pub mod data;
pub mod error;
pub mod kendall;
pub mod matrix;
pub mod method;
pub mod network;
pub mod normality;
pub mod pearson;
pub mod rank;
pub mod spearman;

pub use data::{DataMatrix, DataSource};
pub use error::{CorrError, Result};
pub use matrix::CorrelationMatrix;
pub use method::CorrelationMethod;
pub use network::{Edge, Network};
pub use rank::rank_data;
