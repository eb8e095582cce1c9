//! Convert the tourism CSV to a Parquet snapshot
//!
//! The output loads through the same `TourismData::load` path as the CSV;
//! the conversion is verified by loading both and comparing row counts.
//!
//! Usage:
//!   cargo run --bin convert_csv_to_parquet -- [input.csv] [output.parquet]

use anyhow::{bail, Context, Result};
use clap::Parser;
use polars::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tourism_trends::config::DEFAULT_DATA_PATH;
use tourism_trends::TourismData;

#[derive(Debug, Parser)]
#[command(name = "convert_csv_to_parquet", about = "Convert the tourism CSV to a Parquet snapshot")]
struct Args {
    /// Source CSV
    #[arg(default_value = DEFAULT_DATA_PATH)]
    input: PathBuf,

    /// Destination Parquet file; defaults to the input with a .parquet extension
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let csv_path = args.input;
    let parquet_path = args
        .output
        .unwrap_or_else(|| csv_path.with_extension("parquet"));

    println!("\n{}", "=".repeat(70));
    println!("CSV to Parquet Conversion");
    println!("{}", "=".repeat(70));
    println!("  CSV:     {}", csv_path.display());
    println!("  Parquet: {}", parquet_path.display());

    if !csv_path.exists() {
        bail!("CSV file not found: {}", csv_path.display());
    }

    let load_start = Instant::now();
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None) // Scan entire file
        .try_into_reader_with_file_path(Some(csv_path.clone()))?
        .finish()
        .with_context(|| format!("Failed to read {}", csv_path.display()))?;

    println!(
        "  Loaded:  {} rows × {} columns ({:.3} ms)",
        df.height(),
        df.width(),
        load_start.elapsed().as_secs_f64() * 1000.0
    );

    // Write Parquet with ZSTD compression
    let write_start = Instant::now();
    let file = std::fs::File::create(&parquet_path)?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .finish(&mut df)?;

    let csv_size = std::fs::metadata(&csv_path)?.len() as f64 / 1024.0;
    let parquet_size = std::fs::metadata(&parquet_path)?.len() as f64 / 1024.0;
    println!(
        "  Written: {:.1} KB ({:.3} ms), CSV was {:.1} KB",
        parquet_size,
        write_start.elapsed().as_secs_f64() * 1000.0,
        csv_size
    );

    // Both files must load identically through the dataset loader
    let from_csv = TourismData::load(&csv_path)?;
    let from_parquet = TourismData::load(&parquet_path)?;
    if from_csv.len() != from_parquet.len() {
        bail!(
            "Row count mismatch after conversion: CSV {} vs Parquet {}",
            from_csv.len(),
            from_parquet.len()
        );
    }

    println!("  Verified: {} rows load from both files", from_parquet.len());
    println!("{}", "=".repeat(70));

    Ok(())
}
