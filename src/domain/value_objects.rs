//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MAX_LONGITUDE: f64 = 180.0;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside [-90,90] / [-180,180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= Self::MAX_LATITUDE
            && self.longitude.abs() <= Self::MAX_LONGITUDE
    }

    /// Clamp both components into the valid ranges.
    pub fn clamped(self) -> Self {
        Self {
            latitude: self.latitude.clamp(-Self::MAX_LATITUDE, Self::MAX_LATITUDE),
            longitude: self
                .longitude
                .clamp(-Self::MAX_LONGITUDE, Self::MAX_LONGITUDE),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Extent of a map region in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude_delta.is_finite()
            && self.longitude_delta.is_finite()
            && self.latitude_delta > 0.0
            && self.longitude_delta > 0.0
            && self.latitude_delta <= 2.0 * Coordinate::MAX_LATITUDE
            && self.longitude_delta <= 2.0 * Coordinate::MAX_LONGITUDE
    }
}

/// The visible map region: a centre and a span.
///
/// Pan and zoom gestures replace the viewport; random POIs are generated
/// around its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub span: CoordinateSpan,
}

impl Viewport {
    pub fn new(center: Coordinate, span: CoordinateSpan) -> Self {
        Self { center, span }
    }

    pub fn is_valid(&self) -> bool {
        self.center.is_valid() && self.span.is_valid()
    }
}

impl Default for Viewport {
    /// San Francisco, roughly a few kilometres across.
    fn default() -> Self {
        Self {
            center: Coordinate::new(37.7749, -122.4194),
            span: CoordinateSpan::new(0.05, 0.05),
        }
    }
}

/// Category of a point of interest.
///
/// Six categories are known; any other string is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PoiCategory {
    Hospital,
    Supermarket,
    Factory,
    School,
    Park,
    Restaurant,
    Other(String),
}

impl PoiCategory {
    /// All known categories, in the order the map view offers them.
    pub const ALL: [PoiCategory; 6] = [
        PoiCategory::Hospital,
        PoiCategory::Supermarket,
        PoiCategory::Factory,
        PoiCategory::School,
        PoiCategory::Park,
        PoiCategory::Restaurant,
    ];

    /// Parse a category name. Known names match case-insensitively;
    /// anything else becomes `Other` with the input preserved.
    ///
    /// # Examples
    /// ```
    /// use poi_playground::domain::value_objects::PoiCategory;
    ///
    /// assert_eq!(PoiCategory::parse("Park"), PoiCategory::Park);
    /// assert_eq!(PoiCategory::parse("museum"), PoiCategory::Other("museum".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hospital" => Self::Hospital,
            "supermarket" => Self::Supermarket,
            "factory" => Self::Factory,
            "school" => Self::School,
            "park" => Self::Park,
            "restaurant" => Self::Restaurant,
            _ => Self::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Hospital => "hospital",
            Self::Supermarket => "supermarket",
            Self::Factory => "factory",
            Self::School => "school",
            Self::Park => "park",
            Self::Restaurant => "restaurant",
            Self::Other(s) => s,
        }
    }

    /// Whether this is one of the six categories with a presentation mapping.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Human-readable label with every word capitalised ("Hospital").
    pub fn label(&self) -> String {
        self.as_str()
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for PoiCategory {
    fn default() -> Self {
        Self::Hospital
    }
}

impl From<String> for PoiCategory {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PoiCategory> for String {
    fn from(category: PoiCategory) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connectivity of the configured backend as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// No probe has run yet
    Unknown,
    /// A probe is in flight
    Probing,
    /// The server answered, even if with an error
    Connected,
    /// No network path, name resolution failure or bad configuration
    Unreachable,
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Probing => "probing",
            Self::Connected => "connected",
            Self::Unreachable => "unreachable",
        };
        write!(f, "{}", s)
    }
}

/// Classified result of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeVerdict {
    /// The query against the probe resource succeeded
    UnexpectedSuccess,
    /// The server returned a structured application error
    ServerResponded,
    /// DNS, URL or OS-level network failure
    TransportFailure,
    /// Error text matched no known pattern
    Unclassified,
}

impl ProbeVerdict {
    /// The connectivity state this verdict settles on.
    pub fn state(&self) -> ConnectivityState {
        match self {
            Self::UnexpectedSuccess | Self::ServerResponded => ConnectivityState::Connected,
            Self::TransportFailure | Self::Unclassified => ConnectivityState::Unreachable,
        }
    }
}
