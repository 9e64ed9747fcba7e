//! Tag classification: derives injection load, traffic pattern, hotspot degree
//! and port pair from the free-text benchmark tag.
//!
//! Every classifier is a pure function over the tag. Unrecognised input yields
//! `None` rather than an error.

use serde::Serialize;
use std::fmt;

/// Injection load level encoded in a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Load {
    Light,
    Medium,
    Heavy,
    Saturated,
}

/// Keyword search order: the first keyword contained in a tag wins
const LOAD_PRIORITY: [Load; 4] = [Load::Saturated, Load::Heavy, Load::Medium, Load::Light];

impl Load {
    /// Injection rate in packets per cycle per node
    pub fn rate(self) -> f64 {
        match self {
            Load::Light => 0.125,
            Load::Medium => 0.25,
            Load::Heavy => 0.5,
            Load::Saturated => 1.0,
        }
    }

    /// Substring that marks this load level in a tag
    pub fn keyword(self) -> &'static str {
        match self {
            Load::Light => "light",
            Load::Medium => "medium",
            Load::Heavy => "heavy",
            Load::Saturated => "saturated",
        }
    }
}

/// Synthetic traffic pattern of a `benchmark_` run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BenchPattern {
    Uniform,
    Hotspot,
    Transpose,
}

impl BenchPattern {
    /// Plot order of the traffic-pattern panels
    pub const ALL: [BenchPattern; 3] = [
        BenchPattern::Uniform,
        BenchPattern::Hotspot,
        BenchPattern::Transpose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BenchPattern::Uniform => "Uniform",
            BenchPattern::Hotspot => "Hotspot",
            BenchPattern::Transpose => "Transpose",
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            BenchPattern::Uniform => "uniform",
            BenchPattern::Hotspot => "hotspot",
            BenchPattern::Transpose => "transpose",
        }
    }
}

impl fmt::Display for BenchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of simultaneously hotspotted cardinal directions (1..=4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HotspotDegree(u8);

impl HotspotDegree {
    pub const ALL: [HotspotDegree; 4] = [
        HotspotDegree(1),
        HotspotDegree(2),
        HotspotDegree(3),
        HotspotDegree(4),
    ];

    pub fn new(degree: u8) -> Option<Self> {
        (1..=4).contains(&degree).then_some(HotspotDegree(degree))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in `ALL`
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for HotspotDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Degree {}", self.0)
    }
}

/// Base names of the hotspot runs, by degree
const HOTSPOT_BASES: [(&str, u8); 4] = [
    ("hotspot_north", 1),
    ("hotspot_north_south", 2),
    ("hotspot_north_south_east", 3),
    ("hotspot_north_south_east_west", 4),
];

/// Router port, in matrix order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Port {
    Local,
    North,
    East,
    South,
    West,
}

impl Port {
    pub const ALL: [Port; 5] = [Port::Local, Port::North, Port::East, Port::South, Port::West];

    /// Parse the upper-case port name used in transfer tags
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "LOCAL" => Some(Port::Local),
            "NORTH" => Some(Port::North),
            "EAST" => Some(Port::East),
            "SOUTH" => Some(Port::South),
            "WEST" => Some(Port::West),
            _ => None,
        }
    }

    /// Single-letter axis label
    pub fn abbrev(self) -> &'static str {
        match self {
            Port::Local => "L",
            Port::North => "N",
            Port::East => "E",
            Port::South => "S",
            Port::West => "W",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Port::Local => 0,
            Port::North => 1,
            Port::East => 2,
            Port::South => 3,
            Port::West => 4,
        }
    }
}

/// Load level from the first matching keyword in priority order
pub fn parse_load(tag: &str) -> Option<Load> {
    LOAD_PRIORITY
        .into_iter()
        .find(|load| tag.contains(load.keyword()))
}

/// Traffic pattern of a `benchmark_` tag.
///
/// The keyword match is case-sensitive. A tag with the prefix but none of the
/// keywords has no pattern.
pub fn parse_benchmark_pattern(tag: &str) -> Option<BenchPattern> {
    if !tag.starts_with("benchmark_") {
        return None;
    }
    BenchPattern::ALL
        .into_iter()
        .find(|pattern| tag.contains(pattern.keyword()))
}

/// Hotspot degree of a `hotspot_` tag, looked up by its base name
pub fn parse_hotspot_degree(tag: &str) -> Option<HotspotDegree> {
    if !tag.starts_with("hotspot_") {
        return None;
    }
    let base = LOAD_SUFFIXES
        .iter()
        .fold(tag, |base, suffix| base.split(suffix).next().unwrap_or(base));
    HOTSPOT_BASES
        .iter()
        .find(|(name, _)| *name == base)
        .and_then(|(_, degree)| HotspotDegree::new(*degree))
}

/// Suffixes stripped from hotspot tags, applied in this order
const LOAD_SUFFIXES: [&str; 4] = ["_light", "_medium", "_heavy", "_saturated"];

/// Source and destination port of a `transfer_rate_PORT_<SRC>_to_PORT_<DST>` tag
pub fn parse_transfer_ports(tag: &str) -> Option<(Port, Port)> {
    if !tag.starts_with("transfer_rate_") {
        return None;
    }
    let (_, after_src) = tag.split_once("PORT_")?;
    let (src, _) = after_src.split_once("_to")?;
    let (_, after_dst) = tag.split_once("to_PORT_")?;
    // A trailing load keyword may follow the destination
    let dst = after_dst.split('_').next().unwrap_or(after_dst);
    Some((Port::from_tag_name(src)?, Port::from_tag_name(dst)?))
}

/// All classifications derived from one tag
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Classification {
    pub load: Option<Load>,
    pub pattern: Option<BenchPattern>,
    pub degree: Option<HotspotDegree>,
}

impl Classification {
    pub fn of(tag: &str) -> Self {
        Self {
            load: parse_load(tag),
            pattern: parse_benchmark_pattern(tag),
            degree: parse_hotspot_degree(tag),
        }
    }

    /// Injection rate, if the tag carries a load keyword
    pub fn load_rate(&self) -> Option<f64> {
        self.load.map(Load::rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(tag: &str) -> Option<f64> {
        parse_load(tag).map(Load::rate)
    }

    #[test]
    fn test_load_levels() {
        assert_eq!(rate("benchmark_uniform_light"), Some(0.125));
        assert_eq!(rate("benchmark_uniform_medium"), Some(0.25));
        assert_eq!(rate("hotspot_north_heavy"), Some(0.5));
        assert_eq!(rate("hotspot_north_saturated"), Some(1.0));
        assert_eq!(rate("transfer_rate_PORT_LOCAL_to_PORT_EAST"), None);
        assert_eq!(rate(""), None);
    }

    #[test]
    fn test_load_priority() {
        assert_eq!(rate("light_medium_heavy_saturated"), Some(1.0));
        assert_eq!(rate("light_heavy"), Some(0.5));
        assert_eq!(rate("medium_light"), Some(0.25));
    }

    #[test]
    fn test_benchmark_pattern_requires_prefix() {
        assert_eq!(
            parse_benchmark_pattern("benchmark_uniform_light"),
            Some(BenchPattern::Uniform)
        );
        assert_eq!(
            parse_benchmark_pattern("benchmark_hotspot_heavy"),
            Some(BenchPattern::Hotspot)
        );
        assert_eq!(
            parse_benchmark_pattern("benchmark_transpose_saturated"),
            Some(BenchPattern::Transpose)
        );
        assert_eq!(parse_benchmark_pattern("hotspot_north_light"), None);
        assert_eq!(parse_benchmark_pattern("uniform_benchmark_light"), None);
        assert_eq!(parse_benchmark_pattern("transfer_rate_PORT_LOCAL_to_PORT_EAST"), None);
    }

    #[test]
    fn test_benchmark_pattern_quirks() {
        // prefix matched, no known pattern
        assert_eq!(parse_benchmark_pattern("benchmark_bitreverse_light"), None);
        // case-sensitive
        assert_eq!(parse_benchmark_pattern("benchmark_Uniform_light"), None);
    }

    #[test]
    fn test_hotspot_degree() {
        assert_eq!(
            parse_hotspot_degree("hotspot_north_south_heavy").map(HotspotDegree::get),
            Some(2)
        );
        assert_eq!(
            parse_hotspot_degree("hotspot_north_south_east_west_saturated").map(HotspotDegree::get),
            Some(4)
        );
        assert_eq!(
            parse_hotspot_degree("hotspot_north_light").map(HotspotDegree::get),
            Some(1)
        );
        assert_eq!(
            parse_hotspot_degree("hotspot_north_south_east_medium").map(HotspotDegree::get),
            Some(3)
        );
        assert_eq!(parse_hotspot_degree("hotspot_east_light"), None);
        assert_eq!(parse_hotspot_degree("benchmark_hotspot_light"), None);
        // no load suffix still resolves the base name
        assert_eq!(
            parse_hotspot_degree("hotspot_north_south").map(HotspotDegree::get),
            Some(2)
        );
    }

    #[test]
    fn test_pattern_and_degree_are_exclusive() {
        for tag in [
            "benchmark_hotspot_light",
            "hotspot_north_heavy",
            "benchmark_uniform_saturated",
            "hotspot_north_south_east_west_medium",
        ] {
            let class = Classification::of(tag);
            assert!(
                class.pattern.is_none() || class.degree.is_none(),
                "{} classified twice",
                tag
            );
        }
    }

    #[test]
    fn test_transfer_ports() {
        assert_eq!(
            parse_transfer_ports("transfer_rate_PORT_LOCAL_to_PORT_NORTH"),
            Some((Port::Local, Port::North))
        );
        assert_eq!(
            parse_transfer_ports("transfer_rate_PORT_WEST_to_PORT_EAST_saturated"),
            Some((Port::West, Port::East))
        );
        assert_eq!(parse_transfer_ports("transfer_rate_PORT_UP_to_PORT_EAST"), None);
        assert_eq!(parse_transfer_ports("transfer_rate_broken"), None);
        assert_eq!(parse_transfer_ports("benchmark_PORT_LOCAL_to_PORT_EAST"), None);
    }

    #[test]
    fn test_degree_bounds() {
        assert!(HotspotDegree::new(0).is_none());
        assert!(HotspotDegree::new(5).is_none());
        assert_eq!(HotspotDegree::new(3).map(HotspotDegree::index), Some(2));
        assert_eq!(HotspotDegree::ALL[3].to_string(), "Degree 4");
    }
}
