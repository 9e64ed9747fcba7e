//! Heatmap panel data: port-to-port latency and hotspot stall cycles.

use crate::classify::{parse_transfer_ports, HotspotDegree, Port};
use crate::results::LabeledRow;
use log::warn;
use serde::Serialize;

/// Average latency per (ingress, egress) port pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortLatencyMatrix {
    /// Indexed `[ingress][egress]` in `Port::ALL` order
    pub cells: [[Option<f64>; 5]; 5],
}

impl PortLatencyMatrix {
    /// Pivot the `transfer_rate_` rows of one router.
    ///
    /// Returns `None` when the router has no transfer rows at all.
    pub fn build(rows: &[&LabeledRow]) -> Option<Self> {
        let transfers: Vec<&LabeledRow> = rows
            .iter()
            .copied()
            .filter(|row| row.tag().starts_with("transfer_rate_"))
            .collect();
        if transfers.is_empty() {
            return None;
        }

        let mut cells = [[None; 5]; 5];
        for row in transfers {
            let Some((src, dst)) = parse_transfer_ports(row.tag()) else {
                warn!("{}: skipping transfer row with unknown ports: {}", row.router, row.tag());
                continue;
            };
            let cell = &mut cells[src.index()][dst.index()];
            if cell.is_some() {
                warn!("{}: duplicate transfer row ignored: {}", row.router, row.tag());
                continue;
            }
            *cell = Some(row.result.avg_latency_cycles);
        }
        Some(Self { cells })
    }

    pub fn get(&self, ingress: Port, egress: Port) -> Option<f64> {
        self.cells[ingress.index()][egress.index()]
    }

    pub fn grid(&self) -> HeatGrid {
        HeatGrid {
            row_labels: Port::ALL.iter().map(|p| p.abbrev().to_string()).collect(),
            col_labels: Port::ALL.iter().map(|p| p.abbrev().to_string()).collect(),
            values: self.cells.iter().map(|row| row.to_vec()).collect(),
            precision: 1,
            x_desc: Some("Egress"),
            y_desc: Some("Ingress"),
        }
    }
}

/// Stall cycles per (hotspot degree, port) at saturated load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StallMatrix {
    /// Indexed `[degree - 1][port]`; a degree without data is all zero
    pub cells: [[f64; 5]; 4],
}

impl StallMatrix {
    /// Build from the saturated hotspot rows of one router, taking the first
    /// row of each degree.
    ///
    /// Returns `None` when the router has no saturated hotspot rows.
    pub fn build(rows: &[&LabeledRow]) -> Option<Self> {
        let saturated: Vec<(HotspotDegree, &LabeledRow)> = rows
            .iter()
            .filter(|row| row.tag().contains("saturated"))
            .filter_map(|row| row.class.degree.map(|degree| (degree, *row)))
            .collect();
        if saturated.is_empty() {
            return None;
        }

        let mut cells = [[0.0; 5]; 4];
        for degree in HotspotDegree::ALL {
            if let Some((_, row)) = saturated.iter().find(|(d, _)| *d == degree) {
                for port in Port::ALL {
                    cells[degree.index()][port.index()] = row.result.stall(port);
                }
            }
        }
        Some(Self { cells })
    }

    pub fn row(&self, degree: HotspotDegree) -> &[f64; 5] {
        &self.cells[degree.index()]
    }

    pub fn grid(&self) -> HeatGrid {
        HeatGrid {
            row_labels: HotspotDegree::ALL.iter().map(|d| format!("D{}", d.get())).collect(),
            col_labels: Port::ALL.iter().map(|p| p.abbrev().to_string()).collect(),
            values: self
                .cells
                .iter()
                .map(|row| row.iter().map(|v| Some(*v)).collect())
                .collect(),
            precision: 0,
            x_desc: None,
            y_desc: None,
        }
    }
}

/// Renderer-facing view of a heatmap: labelled rows (top to bottom) and columns
#[derive(Debug, Clone, PartialEq)]
pub struct HeatGrid {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `values[row][col]`; `None` cells stay blank
    pub values: Vec<Vec<Option<f64>>>,
    /// Decimal places of the cell annotations
    pub precision: usize,
    pub x_desc: Option<&'static str>,
    pub y_desc: Option<&'static str>,
}

impl HeatGrid {
    /// Smallest and largest finite value, or `None` if every cell is blank
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flatten()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
