use std::fs::{self, File};
use std::io::Write;

use flate2::{Compression, write::GzEncoder};

use coexnet::{CorrelationMatrix, CorrelationMethod, DataMatrix, Network, normality};

const RAW: &str = "gene\ts1\ts2\ts3\ts4\ts5\n\
                   g2\t2\t4\t6\t8\t10\n\
                   g1\t1\t2\t3\t4\t5\n\
                   g3\t5\t4\t3\t2\t1\n\
                   g4\t1\tNA\t3\t4\t5\n\
                   g3\t5\t4\t3\t2\t1\n\
                   g5\t2\t1\t4\t3\t5\n";

#[test]
fn plain_file_to_sif() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("expression.tsv");
    fs::write(&input, RAW).unwrap();

    let data = DataMatrix::open(&input).unwrap();
    assert_eq!(data.row_labels(), ["g1", "g2", "g3", "g5"]);

    let matrix = CorrelationMatrix::build(&data, CorrelationMethod::Pearson, true);
    let network = Network::build(&matrix, 0.9);
    let output = dir.path().join("network.sif");
    network.to_sif(&output).unwrap();

    let sif = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = sif.lines().collect();
    assert_eq!(
        lines,
        [
            "g1\tco-expression\tg2",
            "g1\tco-expression\tg3",
            "g2\tco-expression\tg3",
        ]
    );
}

#[test]
fn gzip_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("expression.tsv.gz");
    let mut enc = GzEncoder::new(File::create(&input).unwrap(), Compression::default());
    enc.write_all(RAW.as_bytes()).unwrap();
    enc.finish().unwrap();

    let data = DataMatrix::open(&input).unwrap();
    assert_eq!(data.dim(), (4, 5));

    let cleaned = dir.path().join("cleaned.tsv.gz");
    data.to_tsv(&cleaned).unwrap();
    assert_eq!(DataMatrix::open(&cleaned).unwrap(), data);
}

#[test]
fn tar_gz_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("expression.tar.gz");
    let enc = GzEncoder::new(File::create(&input).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(enc);
    let mut header = tar::Header::new_gnu();
    header.set_size(RAW.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "expression.tsv", RAW.as_bytes())
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap();

    let data = DataMatrix::open(&input).unwrap();
    assert_eq!(data.row_labels(), ["g1", "g2", "g3", "g5"]);
}

#[test]
fn cleaned_tsv_is_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("expression.tsv");
    fs::write(&input, RAW).unwrap();
    let output = dir.path().join("cleaned.tsv");
    DataMatrix::open(&input).unwrap().to_tsv(&output).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let labels: Vec<&str> = text
        .lines()
        .skip(1)
        .filter_map(|line| line.split('\t').next())
        .collect();
    assert_eq!(labels, ["g1", "g2", "g3", "g5"]);
    assert!(text.starts_with("\ts1\ts2\ts3\ts4\ts5\n"));
}

#[test]
fn normality_screen_on_loaded_matrix() {
    let data = DataMatrix::from_reader(RAW.as_bytes()).unwrap();
    // evenly spaced rows look normal
    let rejected = normality::not_normal(&data, 0.05, true);
    assert!(rejected.is_empty());
}
