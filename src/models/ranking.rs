use serde::Serialize;

use super::location::Coordinate;
use super::point::Point;
use crate::services::acquisition::UnavailableReason;

/// A catalog point annotated with its distance from the query location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPoint {
    #[serde(flatten)]
    pub point: Point,
    pub distance_km: f64,
}

/// Why a search was ranked against the default reference instead of the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    NotProvided,
    Denied,
    Unsupported,
    TimedOut,
    InvalidCoordinates,
}

impl From<UnavailableReason> for FallbackReason {
    fn from(reason: UnavailableReason) -> Self {
        match reason {
            UnavailableReason::NotProvided => FallbackReason::NotProvided,
            UnavailableReason::Denied => FallbackReason::Denied,
            UnavailableReason::Unsupported => FallbackReason::Unsupported,
            UnavailableReason::TimedOut => FallbackReason::TimedOut,
        }
    }
}

/// Output of one proximity search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResult {
    pub points: Vec<RankedPoint>,
    pub used_fallback_reference: bool,
    /// The coordinate distances were measured from
    pub reference: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
}

impl ProximityResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.points.iter().map(|ranked| ranked.point.id).collect()
    }
}
