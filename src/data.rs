//! Tab-delimited expression matrices: loading, cleaning and writing back out.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use flate2::{
    Compression,
    read::{GzDecoder, MultiGzDecoder},
    write::GzEncoder,
};
use ndarray::{Array1, Array2, ArrayView2};
use tar::Archive;
use tracing::{debug, info};

use crate::error::{CorrError, Result};

/// Anything that can hand out labelled rows and columns of equal-length numeric sequences.
pub trait DataSource {
    fn rows(&self) -> BTreeMap<String, Vec<f64>>;
    fn columns(&self) -> BTreeMap<String, Vec<f64>>;
}

/// In-memory rows; columns are labelled by their 0-based position.
impl DataSource for BTreeMap<String, Vec<f64>> {
    fn rows(&self) -> BTreeMap<String, Vec<f64>> {
        self.clone()
    }

    fn columns(&self) -> BTreeMap<String, Vec<f64>> {
        let n_cols = self.values().map(Vec::len).min().unwrap_or(0);
        (0..n_cols)
            .map(|j| (j.to_string(), self.values().map(|row| row[j]).collect()))
            .collect()
    }
}

/// Dense numeric matrix with sorted, unique row labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMatrix {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    values: Array2<f64>,
}

impl DataMatrix {
    /// Read a matrix whose header names the columns and whose first field names the row.
    ///
    /// Rows with an empty or non-numeric cell are dropped; rows sharing a label are
    /// merged into their element-wise mean.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = rdr.headers()?.clone();
        if header.is_empty() {
            return Err(CorrError::MissingHeader);
        }
        let column_labels: Vec<String> = header
            .iter()
            .skip(1)
            .map(|s| s.trim().to_string())
            .collect();
        let n_cols = column_labels.len();

        let mut merged: BTreeMap<String, (Array1<f64>, usize)> = BTreeMap::new();
        let mut dropped = 0usize;

        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            let line = idx + 2; // header offset

            let label = record.get(0).unwrap_or("").trim();
            if label.is_empty() {
                return Err(CorrError::EmptyRowLabel { line });
            }
            if record.len() != header.len() {
                return Err(CorrError::RaggedRow {
                    line,
                    expected: header.len(),
                    found: record.len(),
                });
            }

            let parsed: Option<Vec<f64>> = record
                .iter()
                .skip(1)
                .map(|cell| cell.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
                .collect();
            let Some(values) = parsed else {
                debug!(label, line, "dropping row with empty or non-numeric values");
                dropped += 1;
                continue;
            };

            let entry = merged
                .entry(label.to_string())
                .or_insert_with(|| (Array1::zeros(n_cols), 0));
            entry.0 += &Array1::from(values);
            entry.1 += 1;
        }

        let mut row_labels = Vec::with_capacity(merged.len());
        let mut matrix = Array2::<f64>::zeros((merged.len(), n_cols));
        for (i, (label, (sum, count))) in merged.into_iter().enumerate() {
            if count > 1 {
                debug!(label = %label, count, "merging duplicate rows");
            }
            matrix.row_mut(i).assign(&(sum / count as f64));
            row_labels.push(label);
        }

        info!(
            rows = row_labels.len(),
            columns = n_cols,
            dropped,
            "loaded data matrix"
        );

        Ok(Self {
            row_labels,
            column_labels,
            values: matrix,
        })
    }

    /// Open a plain, gzip (`.gz`) or gzipped tar (`.tar.gz`) matrix file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.to_string_lossy();
        let file = File::open(path)?;

        if name.ends_with(".tar.gz") {
            let mut archive = Archive::new(GzDecoder::new(file));
            for entry in archive.entries()? {
                let entry = entry?;
                if entry.header().entry_type().is_file() {
                    return Self::from_reader(entry);
                }
            }
            Err(CorrError::NoArchiveEntry)
        } else if name.ends_with(".gz") {
            Self::from_reader(MultiGzDecoder::new(file))
        } else {
            Self::from_reader(file)
        }
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Write the matrix tab-delimited, rows in lexicographic order.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

        wtr.write_record(std::iter::once("").chain(self.column_labels.iter().map(String::as_str)))?;
        for (i, label) in self.row_labels.iter().enumerate() {
            let row_vals: Vec<String> = self.values.row(i).iter().map(|v| v.to_string()).collect();
            wtr.write_record(
                std::iter::once(label.as_str()).chain(row_vals.iter().map(String::as_str)),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write to `path`, gzip-compressed when it ends in `.gz`.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        if path.to_string_lossy().ends_with(".gz") {
            let mut enc = GzEncoder::new(file, Compression::default());
            self.to_writer(&mut enc)?;
            enc.finish()?;
        } else {
            self.to_writer(file)?;
        }
        Ok(())
    }
}

impl DataSource for DataMatrix {
    fn rows(&self) -> BTreeMap<String, Vec<f64>> {
        self.row_labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), self.values.row(i).to_vec()))
            .collect()
    }

    fn columns(&self) -> BTreeMap<String, Vec<f64>> {
        self.column_labels
            .iter()
            .enumerate()
            .map(|(j, label)| (label.clone(), self.values.column(j).to_vec()))
            .collect()
    }
}
