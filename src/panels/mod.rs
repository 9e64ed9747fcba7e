//! Panel model of the composite figure: one row of six panels per router.
//!
//! Panels are described declaratively and built from the labeled rows without
//! touching any drawing backend, so the plotted data can be inspected and
//! tested on its own.

pub mod heatmap;
pub mod series;

use crate::results::{LabeledRow, Router};
use serde::Serialize;

pub use heatmap::{HeatGrid, PortLatencyMatrix, StallMatrix};
pub use series::{Grouping, Metric, Quadrant, Series, SeriesKey};

/// The six panel columns, in figure order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelKind {
    TrafficThroughput,
    TrafficLatency,
    HotspotDuration,
    HotspotLatency,
    PortLatency,
    StallCycles,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::TrafficThroughput,
        PanelKind::TrafficLatency,
        PanelKind::HotspotDuration,
        PanelKind::HotspotLatency,
        PanelKind::PortLatency,
        PanelKind::StallCycles,
    ];

    /// Column title, as two lines
    pub fn title(self) -> [&'static str; 2] {
        match self {
            PanelKind::TrafficThroughput => ["Avg. Packet Throughput of", "Different Traffic Patterns"],
            PanelKind::TrafficLatency => ["Avg. Packet Latency of", "Different Traffic Patterns"],
            PanelKind::HotspotDuration => ["Abs. Execution Time of", "Different Hotspot Degrees"],
            PanelKind::HotspotLatency => ["Avg. Packet Latency of", "Different Hotspot Degrees"],
            PanelKind::PortLatency => ["Avg. Port-to-Port Latency,", "Saturated Load [cycles]"],
            PanelKind::StallCycles => ["Stall Cycles of Hotspot", "Degrees, Saturated Load"],
        }
    }
}

/// Configuration of a load-sweep line panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePanelSpec {
    pub kind: PanelKind,
    pub grouping: Grouping,
    pub metric: Metric,
    pub y_label: &'static str,
    /// Upper bound of the x axis
    pub x_max: f64,
    /// Upper bound of the y axis, also the scale of the label offsets
    pub y_max: f64,
}

pub const LINE_PANELS: [LinePanelSpec; 4] = [
    LinePanelSpec {
        kind: PanelKind::TrafficThroughput,
        grouping: Grouping::Pattern,
        metric: Metric::NormalizedThroughput,
        y_label: "Normalized Throughput",
        x_max: 1.1,
        y_max: 5.0,
    },
    LinePanelSpec {
        kind: PanelKind::TrafficLatency,
        grouping: Grouping::Pattern,
        metric: Metric::Latency,
        y_label: "Latency [cycles]",
        x_max: 1.1,
        y_max: 25.0,
    },
    LinePanelSpec {
        kind: PanelKind::HotspotDuration,
        grouping: Grouping::Degree,
        metric: Metric::Duration,
        y_label: "Duration [cycles]",
        x_max: 1.1,
        y_max: 1300.0,
    },
    LinePanelSpec {
        kind: PanelKind::HotspotLatency,
        grouping: Grouping::Degree,
        metric: Metric::Latency,
        y_label: "Latency [cycles]",
        x_max: 1.1,
        y_max: 25.0,
    },
];

/// X axis description of the line panels
pub const LOAD_AXIS_LABEL: &str = "Injection Rate";

/// Data of one panel; empty panels carry no series or no matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Panel {
    Lines {
        spec: LinePanelSpec,
        series: Vec<Series>,
    },
    PortLatency {
        matrix: Option<PortLatencyMatrix>,
    },
    Stalls {
        matrix: Option<StallMatrix>,
    },
}

impl Panel {
    pub fn kind(&self) -> PanelKind {
        match self {
            Panel::Lines { spec, .. } => spec.kind,
            Panel::PortLatency { .. } => PanelKind::PortLatency,
            Panel::Stalls { .. } => PanelKind::StallCycles,
        }
    }
}

/// One figure row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterPanels {
    pub router: Router,
    /// Six panels in `PanelKind::ALL` order
    pub panels: Vec<Panel>,
}

/// Build the six panels of one router
pub fn build_router_panels(rows: &[LabeledRow], router: Router) -> RouterPanels {
    let router_rows: Vec<&LabeledRow> = rows.iter().filter(|row| row.router == router).collect();

    let mut panels: Vec<Panel> = LINE_PANELS
        .iter()
        .map(|spec| Panel::Lines {
            spec: *spec,
            series: series::select_series(&router_rows, spec.grouping, spec.metric, spec.y_max),
        })
        .collect();
    panels.push(Panel::PortLatency {
        matrix: PortLatencyMatrix::build(&router_rows),
    });
    panels.push(Panel::Stalls {
        matrix: StallMatrix::build(&router_rows),
    });

    RouterPanels { router, panels }
}

/// Build every figure row, in router order
pub fn build_figure(rows: &[LabeledRow]) -> Vec<RouterPanels> {
    Router::ALL
        .iter()
        .map(|router| build_router_panels(rows, *router))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::BenchPattern;
    use crate::results::{read_results, HEADER};

    fn load_three(body: &str) -> Vec<LabeledRow> {
        let csv = format!("{}{}", HEADER, body);
        Router::ALL
            .iter()
            .flat_map(|router| read_results(csv.as_bytes(), *router).unwrap())
            .collect()
    }

    fn throughput_series(row: &RouterPanels) -> &[Series] {
        match &row.panels[0] {
            Panel::Lines { spec, series } => {
                assert_eq!(spec.kind, PanelKind::TrafficThroughput);
                series
            }
            other => panic!("unexpected first panel {:?}", other.kind()),
        }
    }

    #[test]
    fn test_single_light_uniform_run_without_loss() {
        let rows = load_three("benchmark_uniform_light,0.1,5,0,100,0,0,0,0,0\n");
        let figure = build_figure(&rows);
        assert_eq!(figure.len(), 3);
        for (row, router) in figure.iter().zip(Router::ALL) {
            assert_eq!(row.router, router);
            let series = throughput_series(row);
            assert_eq!(series.len(), 1);
            assert_eq!(series[0].key, SeriesKey::Pattern(BenchPattern::Uniform));
            assert_eq!(series[0].points.len(), 1);
            assert_eq!(series[0].points[0].x, 0.125);
            assert!((series[0].points[0].y - 0.8).abs() < 1e-12);
            assert!(series[0].annotations.is_empty());
        }
    }

    #[test]
    fn test_single_light_uniform_run_with_loss() {
        let rows = load_three("benchmark_uniform_light,0.1,5,2.5,100,0,0,0,0,0\n");
        for row in build_figure(&rows) {
            let series = throughput_series(&row);
            assert_eq!(series[0].points.len(), 1);
            assert_eq!(series[0].annotations.len(), 1);
            assert_eq!(series[0].annotations[0].text, "2.5%");
            assert_eq!(series[0].annotations[0].anchor, series[0].points[0]);
        }
    }

    #[test]
    fn test_throughput_label_offset_follows_panel_range() {
        let rows = load_three("benchmark_uniform_light,0.1,5,2.5,100,0,0,0,0,0\n");
        let figure = build_figure(&rows);
        let label = &throughput_series(&figure[0])[0].annotations[0];
        // Offset scales with this panel's y range of 5 rather than the
        // duration axis, so the label stays next to its point
        assert_eq!(LINE_PANELS[0].y_max, 5.0);
        assert_eq!(label.quadrant, Quadrant::BottomRight);
        assert!((label.at.x - (0.125 + 0.0111)).abs() < 1e-12);
        assert!((label.at.y - (0.8 - 5.0 * 0.0111)).abs() < 1e-12);
    }

    #[test]
    fn test_panel_order_and_empty_panels() {
        let rows = load_three("benchmark_uniform_light,0.1,5,0,100,0,0,0,0,0\n");
        let figure = build_figure(&rows);
        let kinds: Vec<PanelKind> = figure[0].panels.iter().map(Panel::kind).collect();
        assert_eq!(kinds, PanelKind::ALL.to_vec());
        for panel in &figure[0].panels[2..4] {
            assert!(matches!(panel, Panel::Lines { series, .. } if series.is_empty()));
        }
        assert!(matches!(figure[0].panels[4], Panel::PortLatency { matrix: None }));
        assert!(matches!(figure[0].panels[5], Panel::Stalls { matrix: None }));
    }

    #[test]
    fn test_rows_stay_with_their_router() {
        let mut rows = read_results(
            format!("{}benchmark_transpose_heavy,0.2,9,0,100,0,0,0,0,0\n", HEADER).as_bytes(),
            Router::Ranc,
        )
        .unwrap();
        rows.extend(
            read_results(
                format!("{}hotspot_north_saturated,0.4,12,0,900,1,2,3,4,5\n", HEADER).as_bytes(),
                Router::RaveNoc,
            )
            .unwrap(),
        );
        let figure = build_figure(&rows);
        assert!(throughput_series(&figure[0]).is_empty());
        assert_eq!(throughput_series(&figure[1]).len(), 1);
        assert!(matches!(figure[1].panels[5], Panel::Stalls { matrix: None }));
        assert!(matches!(figure[2].panels[5], Panel::Stalls { matrix: Some(_) }));
    }

    #[test]
    fn test_summary_serializes() {
        let rows = load_three("benchmark_uniform_light,0.1,5,2.5,100,0,0,0,0,0\n");
        let json = serde_json::to_string(&build_figure(&rows)).unwrap();
        assert!(json.contains("\"type\":\"lines\""));
        assert!(json.contains("2.5%"));
    }
}
