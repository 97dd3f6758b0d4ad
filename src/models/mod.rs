pub mod location;
pub mod point;
pub mod ranking;
pub mod request;
pub mod requests;

// Re-export commonly used types
pub use location::{is_valid_coordinate, Coordinate, InvalidCoordinate, Location};
pub use point::{Category, Point, PointId, UnknownCategory};
pub use ranking::{FallbackReason, ProximityResult, RankedPoint};
pub use request::{Author, ProblemType, Request, RequestKind, RequestStatus};
pub use requests::{
    AdminInboxResponse, NearestEntry, NearestQuery, NearestResponse, PointEntry, PointsQuery,
    PointsResponse, ReplyRequest, RequestEntry, RequestResponse, RequestsResponse,
    SubmitProblemRequest, SubmitSuggestionRequest, UpdateStatusRequest,
};
