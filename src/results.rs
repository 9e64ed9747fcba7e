//! Benchmark result ingestion from the per-router CSV files.

use crate::classify::{Classification, Port};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Router design under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Router {
    NocRouter,
    Ranc,
    RaveNoc,
}

impl Router {
    /// Figure row order
    pub const ALL: [Router; 3] = [Router::NocRouter, Router::Ranc, Router::RaveNoc];

    pub fn name(self) -> &'static str {
        match self {
            Router::NocRouter => "NoCRouter",
            Router::Ranc => "RANC",
            Router::RaveNoc => "RaveNoC",
        }
    }

    /// File holding this router's results inside the input directory
    pub fn results_file(self) -> &'static str {
        match self {
            Router::NocRouter => "nocrouter_results.csv",
            Router::Ranc => "ranc_results.csv",
            Router::RaveNoc => "ravenoc_results.csv",
        }
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One benchmark measurement as written by the testbench
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultRow {
    pub tag: String,
    #[serde(deserialize_with = "number_or_nan")]
    pub throughput_packets_per_cycle: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub avg_latency_cycles: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub loss_percent: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub duration_cycles: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub stall_local: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub stall_north: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub stall_east: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub stall_south: f64,
    #[serde(deserialize_with = "number_or_nan")]
    pub stall_west: f64,
}

impl ResultRow {
    /// Stall cycle counter of one port
    pub fn stall(&self, port: Port) -> f64 {
        match port {
            Port::Local => self.stall_local,
            Port::North => self.stall_north,
            Port::East => self.stall_east,
            Port::South => self.stall_south,
            Port::West => self.stall_west,
        }
    }
}

/// Empty cells read as NaN, the way the testbench leaves unmeasured values
fn number_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// A result row tagged with its router and its derived classification
#[derive(Debug, Clone)]
pub struct LabeledRow {
    pub router: Router,
    pub result: ResultRow,
    pub class: Classification,
}

impl LabeledRow {
    pub fn new(router: Router, result: ResultRow) -> Self {
        let class = Classification::of(&result.tag);
        Self { router, result, class }
    }

    pub fn tag(&self) -> &str {
        &self.result.tag
    }
}

/// Read one router's results from any CSV source
pub fn read_results<R: Read>(reader: R, router: Router) -> Result<Vec<LabeledRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<ResultRow>().enumerate() {
        let result = record
            .with_context(|| format!("Failed to parse {} result row {}", router, index + 1))?;
        rows.push(LabeledRow::new(router, result));
    }

    let unclassified = rows
        .iter()
        .filter(|r| r.class.pattern.is_none() && r.class.degree.is_none())
        .count();
    debug!(
        "{}: {} rows, {} without traffic pattern or hotspot degree",
        router,
        rows.len(),
        unclassified
    );

    Ok(rows)
}

/// Load one router's results file
pub fn load_router_results<P: AsRef<Path>>(path: P, router: Router) -> Result<Vec<LabeledRow>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;
    let rows = read_results(file, router)
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;
    info!("Loaded {} rows for {} from {}", rows.len(), router, path.display());
    Ok(rows)
}

/// Load and concatenate all routers' results, in figure row order
pub fn load_all<P: AsRef<Path>>(input_dir: P) -> Result<Vec<LabeledRow>> {
    let input_dir = input_dir.as_ref();
    let mut all = Vec::new();
    for router in Router::ALL {
        all.extend(load_router_results(input_dir.join(router.results_file()), router)?);
    }
    Ok(all)
}

/// Column header of a results file, for building fixtures
#[cfg(test)]
pub(crate) const HEADER: &str = "tag,throughput_packets_per_cycle,avg_latency_cycles,loss_percent,duration_cycles,stall_local,stall_north,stall_east,stall_south,stall_west\n";
