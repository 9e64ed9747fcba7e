//! nocplot - Composite result figures for NoC router benchmark runs.
//!
//! Reads the per-router result CSVs, classifies every run by its tag and
//! renders one figure with a row of six panels per router, written as PDF
//! and PNG.

mod classify;
mod export;
mod panels;
mod plot;
mod results;
mod style;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use style::FigureStyle;

/// Highest accepted output resolution; the bitmap canvas grows with its square
const MAX_DPI: f64 = 1200.0;

/// Render the combined NoC router results figure
#[derive(Parser, Debug)]
#[command(name = "nocplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding nocrouter_results.csv, ranc_results.csv and ravenoc_results.csv
    #[arg(short, long, default_value = ".")]
    input_dir: PathBuf,

    /// Directory the figure files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Base name of the figure files
    #[arg(short, long, default_value = "combined_results")]
    name: String,

    /// Output resolution (dots per inch)
    #[arg(long, default_value = "100")]
    dpi: f64,

    /// Font family for all figure text
    #[arg(long, default_value = "serif")]
    font: String,

    /// Print the panel data as JSON to stdout
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn figure_style(&self) -> Result<FigureStyle> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            bail!("--dpi must be a positive number, got {}", self.dpi);
        }
        if self.dpi > MAX_DPI {
            bail!("--dpi must be at most {}, got {}", MAX_DPI, self.dpi);
        }
        Ok(FigureStyle {
            dpi: self.dpi,
            font_family: self.font.clone(),
            ..Default::default()
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let style = args.figure_style()?;

    let rows = results::load_all(&args.input_dir)?;
    let figure = panels::build_figure(&rows);

    if args.summary {
        let json = serde_json::to_string_pretty(&figure).context("Failed to serialize panel summary")?;
        println!("{}", json);
    }

    let written = export::write_figure(&figure, &style, &args.output_dir, &args.name)?;
    info!("Generated {} files", written.len());
    Ok(())
}
