// Build Pearson, Spearman or Kendall correlation matrices over the rows (or columns) of an
// expression matrix and write the thresholded co-association network as SIF.

use std::{
    error::Error,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use coexnet::{CorrelationMatrix, CorrelationMethod, DataMatrix, Network, normality};

#[derive(Parser)]
#[command(name = "coexnet", version, about = "Correlation matrices and co-association networks")]
struct Cli {
    /// Print load / compute / write timings
    #[arg(long, global = true)]
    time: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drop incomplete rows, merge duplicates and write the cleaned matrix
    Clean { input: PathBuf, output: PathBuf },

    /// Count rows and columns failing the Shapiro-Wilk test
    Normality {
        input: PathBuf,
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,
        /// List the failing labels
        #[arg(long)]
        list: bool,
    },

    /// Correlate every pair of rows (or columns) and write the network as SIF
    Network {
        input: PathBuf,
        output: PathBuf,
        /// pearson, spearman or kendall
        #[arg(short, long, default_value = "pearson", value_parser = parse_method)]
        method: CorrelationMethod,
        #[arg(short, long, default_value_t = 0.75)]
        threshold: f64,
        /// Correlate columns instead of rows
        #[arg(long)]
        columns: bool,
        #[arg(long, default_value = coexnet::network::DEFAULT_RELATION)]
        relation: String,
    },
}

fn parse_method(name: &str) -> Result<CorrelationMethod, String> {
    CorrelationMethod::parse(name).map_err(|e| e.to_string())
}

struct Timings {
    enabled: bool,
    laps: Vec<(&'static str, f64)>,
}

impl Timings {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            laps: Vec::new(),
        }
    }

    fn start(&self) -> Option<Instant> {
        if self.enabled { Some(Instant::now()) } else { None }
    }

    fn lap(&mut self, name: &'static str, start: Option<Instant>) {
        if let Some(start) = start {
            let secs = start.elapsed().as_secs_f64();
            println!("{} in {:.3} seconds.", name, secs);
            self.laps.push((name, secs));
        }
    }

    fn report(&self) {
        if !self.enabled {
            return;
        }
        for (name, secs) in &self.laps {
            println!("{:<24}{:8.3} seconds", name, secs);
        }
        let total: f64 = self.laps.iter().map(|(_, secs)| secs).sum();
        println!("{:<24}{:8.3} seconds", "Total time", total);
    }
}

fn load(path: &Path, timings: &mut Timings) -> Result<DataMatrix, Box<dyn Error>> {
    let start = timings.start();
    let data = DataMatrix::open(path)?;
    timings.lap("Data loading", start);

    let (n_rows, n_cols) = data.dim();
    println!("Matrix dimensions: {} rows x {} columns", n_rows, n_cols);
    Ok(data)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut timings = Timings::new(cli.time);

    match cli.command {
        Command::Clean { input, output } => {
            let data = load(&input, &mut timings)?;
            let start = timings.start();
            data.to_tsv(&output)?;
            timings.lap("Output writing", start);
            info!(path = %output.display(), "cleaned matrix written");
        }
        Command::Normality { input, alpha, list } => {
            let data = load(&input, &mut timings)?;
            let start = timings.start();
            let rows = normality::not_normal(&data, alpha, true);
            let columns = normality::not_normal(&data, alpha, false);
            timings.lap("Normality tests", start);

            println!(
                "{} rows and {} columns do not follow a normal distribution (alpha = {})",
                rows.len(),
                columns.len(),
                alpha
            );
            if list {
                for (label, p) in rows.iter().chain(columns.iter()) {
                    println!("{}\t{}", label, p);
                }
            }
        }
        Command::Network {
            input,
            output,
            method,
            threshold,
            columns,
            relation,
        } => {
            let data = load(&input, &mut timings)?;

            let start = timings.start();
            println!("Computing {} correlations...", method);
            let matrix = CorrelationMatrix::build(&data, method, !columns);
            let network = Network::build(&matrix, threshold).with_relation(relation);
            timings.lap("Correlation calculation", start);
            println!(
                "{} of {} pairs reach |r| >= {}",
                network.len(),
                matrix.len(),
                threshold
            );

            let start = timings.start();
            network.to_sif(&output)?;
            timings.lap("Output writing", start);
            info!(path = %output.display(), "network written");
        }
    }

    timings.report();
    Ok(())
}
