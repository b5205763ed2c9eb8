//! Command-line sampler for persisted pole expansions.
//!
//! Loads a pole expansion from its labeled text file, samples it over a
//! frequency grid given on the command line, and writes the resulting
//! `(omega, re, im)` rows to a CSV file for plotting.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use spectral_poles::textio::TextReader;
use spectral_poles::{FrequencyGrid, PoleExpansion};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Command-line arguments for the spectrum sampler.
#[derive(Parser, Debug)]
#[clap(
    name = "spectrum",
    about = "Samples a persisted pole expansion over a frequency grid and writes CSV."
)]
struct SpectrumArgs {
    /// Path to the persisted expansion file.
    #[clap(long, value_name = "PATH")]
    input: PathBuf,

    /// First frequency of the grid.
    #[clap(long, default_value_t = -1.0, allow_hyphen_values = true)]
    start: f64,

    /// Exclusive upper edge of the grid.
    #[clap(long, default_value_t = 1.0, allow_hyphen_values = true)]
    stop: f64,

    /// Spacing between consecutive frequencies.
    #[clap(long, default_value_t = 0.01)]
    step: f64,

    /// Imaginary broadening added to every frequency.
    #[clap(long, default_value_t = 0.01)]
    broadening: f64,

    /// Path to the output CSV file.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// One CSV row of the sampled spectrum.
#[derive(Debug, Serialize)]
struct SpectrumRow {
    /// The real frequency.
    omega: f64,
    /// Real part of the response at `omega`.
    re: f64,
    /// Imaginary part of the response at `omega`.
    im: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = SpectrumArgs::parse();

    let file = File::open(&args.input)
        .with_context(|| format!("opening expansion file {}", args.input.display()))?;
    let mut reader = TextReader::new(BufReader::new(file));
    let expansion =
        PoleExpansion::load(&mut reader).context("reading the persisted expansion")?;
    log::info!(
        "loaded a {}-pole expansion (weight {}, sign {})",
        expansion.poles().len(),
        expansion.weight(),
        expansion.sign()
    );

    let grid = FrequencyGrid {
        start: args.start,
        stop: args.stop,
        step: args.step,
        broadening: args.broadening,
    };
    let mut samples = Vec::new();
    expansion.sample(&grid, &mut samples);

    let mut writer = csv::Writer::from_path(&args.output)?;
    for (omega, value) in &samples {
        writer.serialize(SpectrumRow {
            omega: *omega,
            re: value.re,
            im: value.im,
        })?;
    }
    writer.flush()?;
    log::info!(
        "wrote {} samples to {}",
        samples.len(),
        args.output.display()
    );

    Ok(())
}
