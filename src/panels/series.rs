//! Line-panel series selection and loss annotations.

use crate::classify::{BenchPattern, HotspotDegree};
use crate::results::{LabeledRow, ResultRow};
use serde::Serialize;

/// Measurement drawn on a line panel's y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    /// Throughput divided by the injection rate
    NormalizedThroughput,
    Latency,
    Duration,
}

impl Metric {
    pub fn value(self, row: &ResultRow, load: f64) -> f64 {
        match self {
            Metric::NormalizedThroughput => row.throughput_packets_per_cycle / load,
            Metric::Latency => row.avg_latency_cycles,
            Metric::Duration => row.duration_cycles,
        }
    }
}

/// Category a line panel groups its rows by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grouping {
    Pattern,
    Degree,
}

impl Grouping {
    /// Categories in plot order
    pub fn keys(self) -> Vec<SeriesKey> {
        match self {
            Grouping::Pattern => BenchPattern::ALL.into_iter().map(SeriesKey::Pattern).collect(),
            Grouping::Degree => HotspotDegree::ALL.into_iter().map(SeriesKey::Degree).collect(),
        }
    }

    fn key_of(self, row: &LabeledRow) -> Option<SeriesKey> {
        match self {
            Grouping::Pattern => row.class.pattern.map(SeriesKey::Pattern),
            Grouping::Degree => row.class.degree.map(SeriesKey::Degree),
        }
    }
}

/// Identity of one plotted series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesKey {
    Pattern(BenchPattern),
    Degree(HotspotDegree),
}

impl SeriesKey {
    pub fn label(self) -> String {
        match self {
            SeriesKey::Pattern(pattern) => pattern.to_string(),
            SeriesKey::Degree(degree) => degree.to_string(),
        }
    }
}

/// Where a loss label sits relative to its data point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Placement for the series at `index` among its panel's categories, so
    /// labels of neighbouring series fan out in different directions
    pub fn for_series(index: usize) -> Self {
        match index {
            1 => Quadrant::TopLeft,
            2 => Quadrant::TopRight,
            3 => Quadrant::BottomLeft,
            _ => Quadrant::BottomRight,
        }
    }

    /// Signed (dx, dy) direction
    pub fn direction(self) -> (f64, f64) {
        match self {
            Quadrant::TopLeft => (-1.0, 1.0),
            Quadrant::TopRight => (1.0, 1.0),
            Quadrant::BottomLeft => (-1.0, -1.0),
            Quadrant::BottomRight => (1.0, -1.0),
        }
    }
}

/// Offset of a loss label, relative to each axis' nominal maximum
pub const ANNOTATION_OFFSET: f64 = 0.0111;

/// Nominal maximum injection rate on the x axis
pub const LOAD_NOMINAL_MAX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Loss-rate label attached to a data point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// The annotated data point
    pub anchor: Point,
    /// Label position, already offset from the anchor
    pub at: Point,
    pub quadrant: Quadrant,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub key: SeriesKey,
    /// Position among the panel's categories
    pub index: usize,
    /// Points ordered by ascending load
    pub points: Vec<Point>,
    pub annotations: Vec<Annotation>,
}

/// Format a loss percentage the way it is printed on the figure
pub fn loss_label(loss_percent: f64) -> String {
    format!("{:.1}%", loss_percent)
}

/// Build one series per non-empty category.
///
/// Rows without a load level are left out since they have no x position.
pub fn select_series(
    rows: &[&LabeledRow],
    grouping: Grouping,
    metric: Metric,
    y_nominal_max: f64,
) -> Vec<Series> {
    grouping
        .keys()
        .into_iter()
        .enumerate()
        .filter_map(|(index, key)| {
            let mut subset: Vec<(f64, &ResultRow)> = rows
                .iter()
                .filter(|row| grouping.key_of(row) == Some(key))
                .filter_map(|row| row.class.load_rate().map(|load| (load, &row.result)))
                .collect();
            if subset.is_empty() {
                return None;
            }
            subset.sort_by(|a, b| a.0.total_cmp(&b.0));

            let quadrant = Quadrant::for_series(index);
            let (sx, sy) = quadrant.direction();
            let dx = sx * ANNOTATION_OFFSET * LOAD_NOMINAL_MAX;
            let dy = sy * ANNOTATION_OFFSET * y_nominal_max;

            let mut points = Vec::with_capacity(subset.len());
            let mut annotations = Vec::new();
            for (load, result) in subset {
                let point = Point {
                    x: load,
                    y: metric.value(result, load),
                };
                if result.loss_percent > 0.0 {
                    annotations.push(Annotation {
                        anchor: point,
                        at: Point {
                            x: point.x + dx,
                            y: point.y + dy,
                        },
                        quadrant,
                        text: loss_label(result.loss_percent),
                    });
                }
                points.push(point);
            }

            Some(Series {
                key,
                index,
                points,
                annotations,
            })
        })
        .collect()
}
