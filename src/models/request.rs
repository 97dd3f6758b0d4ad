use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::point::PointId;

pub const ANONYMOUS_USER_ID: &str = "anonymous";
pub const ANONYMOUS_USER_NAME: &str = "Anonymous";
pub const UNKNOWN_POINT_NAME: &str = "Unknown point";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    New,
    InProgress,
    Resolved,
    Rejected,
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::New => "🆕 New",
            RequestStatus::InProgress => "🔄 In progress",
            RequestStatus::Resolved => "✅ Resolved",
            RequestStatus::Rejected => "❌ Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    #[default]
    NotWorking,
    WeakSignal,
    NoAuth,
    Other,
}

impl ProblemType {
    pub fn label(&self) -> &'static str {
        match self {
            ProblemType::NotWorking => "Point is not working",
            ProblemType::WeakSignal => "Weak signal",
            ProblemType::NoAuth => "Login page does not open",
            ProblemType::Other => "Other",
        }
    }
}

/// Who submitted a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub user_id: String,
    pub user_name: String,
}

impl Author {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS_USER_ID, ANONYMOUS_USER_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestKind {
    /// Something is wrong with an existing point
    Problem {
        point_id: PointId,
        point_name: String,
        problem_type: ProblemType,
        description: String,
    },
    /// A resident proposes a new point
    Suggestion { address: String, reason: String },
}

/// A problem report or new-point suggestion tracked through a status lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: Uuid,
    pub author: Author,
    #[serde(flatten)]
    pub kind: RequestKind,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_reply: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Request {
    pub fn new(author: Author, kind: RequestKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            kind,
            status: RequestStatus::New,
            admin_reply: None,
            created_at: Utc::now(),
        }
    }

    /// The reported problem, for problem reports only
    pub fn problem_type(&self) -> Option<ProblemType> {
        match self.kind {
            RequestKind::Problem { problem_type, .. } => Some(problem_type),
            RequestKind::Suggestion { .. } => None,
        }
    }

    /// Headline shown in inbox lists: the point name or the proposed address
    pub fn title(&self) -> &str {
        match &self.kind {
            RequestKind::Problem { point_name, .. } => point_name,
            RequestKind::Suggestion { address, .. } => address,
        }
    }

    /// Free-text body: the problem description or the suggestion reason
    pub fn body(&self) -> &str {
        match &self.kind {
            RequestKind::Problem { description, .. } => description,
            RequestKind::Suggestion { reason, .. } => reason,
        }
    }
}
