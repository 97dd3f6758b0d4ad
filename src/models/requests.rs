use serde::{Deserialize, Serialize};

use super::location::Coordinate;
use super::point::{Point, PointId};
use super::ranking::{FallbackReason, ProximityResult, RankedPoint};
use super::request::{ProblemType, Request, RequestStatus};
use crate::libraries::distance::format_distance_km;

/// Category filter for the point list. Parsed strictly by the handler, so a
/// misspelled tag is rejected instead of matching `other`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointsQuery {
    pub category: Option<String>,
}

/// A catalog point with the display fields of its category
#[derive(Debug, Clone, Serialize)]
pub struct PointEntry {
    #[serde(flatten)]
    pub point: Point,
    pub category_label: &'static str,
    pub category_emoji: &'static str,
}

impl From<Point> for PointEntry {
    fn from(point: Point) -> Self {
        Self {
            category_label: point.category.label(),
            category_emoji: point.category.emoji(),
            point,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsResponse {
    pub points: Vec<PointEntry>,
    pub total_count: usize,
}

/// Query string of a nearest-points search.
///
/// Both `lat` and `lon` must be present for the location to count as provided.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearestQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub accuracy: Option<f64>, // meters
    pub k: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearestEntry {
    #[serde(flatten)]
    pub entry: PointEntry,
    pub distance_km: f64,
    pub distance_label: String,
}

impl From<RankedPoint> for NearestEntry {
    fn from(ranked: RankedPoint) -> Self {
        Self {
            distance_label: format_distance_km(ranked.distance_km),
            distance_km: ranked.distance_km,
            entry: ranked.point.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearestResponse {
    pub success: bool,
    pub points: Vec<NearestEntry>,
    pub used_fallback_reference: bool,
    pub reference: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    // Shown to the user when distances are not personalized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ProximityResult> for NearestResponse {
    fn from(result: ProximityResult) -> Self {
        let message = result.used_fallback_reference.then(|| {
            "Could not determine your location. Distances are approximate and measured from the city center.".to_string()
        });

        Self {
            success: true,
            points: result.points.into_iter().map(NearestEntry::from).collect(),
            used_fallback_reference: result.used_fallback_reference,
            reference: result.reference,
            fallback_reason: result.fallback_reason,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitProblemRequest {
    pub point_id: Option<PointId>,
    #[serde(default)]
    pub problem_type: ProblemType,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSuggestionRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
    #[serde(default)]
    pub reply: String,
}

/// A stored request with the labels shown to users and admins
#[derive(Debug, Clone, Serialize)]
pub struct RequestEntry {
    #[serde(flatten)]
    pub request: Request,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type_label: Option<&'static str>,
}

impl From<Request> for RequestEntry {
    fn from(request: Request) -> Self {
        Self {
            status_label: request.status.label(),
            problem_type_label: request.problem_type().map(|t| t.label()),
            request,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestResponse {
    pub success: bool,
    pub request: RequestEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RequestResponse {
    pub fn with_message(request: Request, message: impl Into<String>) -> Self {
        Self {
            success: true,
            request: request.into(),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestsResponse {
    pub requests: Vec<RequestEntry>,
    pub total_count: usize,
}

impl From<Vec<Request>> for RequestsResponse {
    fn from(requests: Vec<Request>) -> Self {
        Self {
            total_count: requests.len(),
            requests: requests.into_iter().map(RequestEntry::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminInboxResponse {
    pub requests: Vec<RequestEntry>,
    pub total_count: usize,
    pub new_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Category, Coordinate, RequestKind};

    #[test]
    fn test_request_entry_labels() {
        let problem = Request::new(
            Author::anonymous(),
            RequestKind::Problem {
                point_id: 1,
                point_name: "City Hospital No. 1".to_string(),
                problem_type: ProblemType::NoAuth,
                description: "Portal never loads".to_string(),
            },
        );

        let json = serde_json::to_value(RequestEntry::from(problem)).unwrap();
        assert_eq!(json["status"], "new");
        assert_eq!(json["status_label"], "🆕 New");
        assert_eq!(json["problem_type_label"], "Login page does not open");

        let suggestion = Request::new(
            Author::anonymous(),
            RequestKind::Suggestion {
                address: "Pier".to_string(),
                reason: "Ferries".to_string(),
            },
        );

        let json = serde_json::to_value(RequestEntry::from(suggestion)).unwrap();
        assert!(json.get("problem_type_label").is_none());
    }

    #[test]
    fn test_point_and_nearest_entries_share_shape() {
        let point = Point::new(
            6,
            "Passage Shopping Center",
            Coordinate::new(44.610553, 33.515586).unwrap(),
            Category::Retail,
        )
        .with_address("1 Shcherbaka St");

        let listed = serde_json::to_value(PointEntry::from(point.clone())).unwrap();
        let ranked = serde_json::to_value(NearestEntry::from(RankedPoint {
            point,
            distance_km: 1.0274,
        }))
        .unwrap();

        for field in ["id", "name", "address", "category", "category_label", "category_emoji"] {
            assert_eq!(listed[field], ranked[field], "{} differs", field);
        }
        assert_eq!(ranked["distance_label"], "1.0 km");
    }
}
