use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::request::UNKNOWN_POINT_NAME;
use crate::models::{Author, Point, PointId, ProblemType, Request, RequestKind, RequestStatus};
use crate::services::kv_store::{KeyValueStore, StoreError};

/// Key the request list is stored under
pub const REQUESTS_KEY: &str = "wifi_requests";

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Please fill in all required fields: {0} is missing.")]
    MissingField(&'static str),

    #[error("Request {0} not found.")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counters shown at the top of the admin inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestStats {
    pub total: usize,
    pub new: usize,
}

/// Append-only store of problem reports and suggestions.
///
/// Requests are cached in memory and the whole list is written through to the
/// key-value store after every change.
pub struct RequestStore {
    cache: RwLock<Vec<Request>>,
    store: Arc<dyn KeyValueStore>,
}

impl RequestStore {
    /// Load previously saved requests, starting empty when nothing is stored
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let requests: Vec<Request> = match store.get(REQUESTS_KEY).await? {
            Some(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                key: REQUESTS_KEY.to_string(),
                source,
            })?,
            None => Vec::new(),
        };

        info!("Loaded {} stored requests", requests.len());

        Ok(Self {
            cache: RwLock::new(requests),
            store,
        })
    }

    /// Record a problem with a catalog point.
    ///
    /// `point` is the catalog entry for `point_id`, if it exists.
    pub async fn submit_problem(
        &self,
        author: Author,
        point_id: Option<PointId>,
        point: Option<&Point>,
        problem_type: ProblemType,
        description: &str,
    ) -> Result<Request, RequestError> {
        let point_id = point_id.ok_or(RequestError::MissingField("point_id"))?;
        let description = required(description, "description")?;

        let point_name = point
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_POINT_NAME.to_string());

        let request = Request::new(
            author,
            RequestKind::Problem {
                point_id,
                point_name,
                problem_type,
                description,
            },
        );

        self.append(request).await
    }

    /// Record a proposal for a new point
    pub async fn submit_suggestion(
        &self,
        author: Author,
        address: &str,
        reason: &str,
    ) -> Result<Request, RequestError> {
        let address = required(address, "address")?;
        let reason = required(reason, "reason")?;

        self.append(Request::new(author, RequestKind::Suggestion { address, reason }))
            .await
    }

    pub async fn get(&self, id: Uuid) -> Option<Request> {
        self.cache.read().await.iter().find(|r| r.id == id).cloned()
    }

    /// All requests in submission order
    pub async fn list_all(&self) -> Vec<Request> {
        self.cache.read().await.clone()
    }

    pub async fn list_for_user(&self, user_id: &str) -> Vec<Request> {
        self.cache
            .read()
            .await
            .iter()
            .filter(|r| r.author.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> RequestStats {
        let cache = self.cache.read().await;
        RequestStats {
            total: cache.len(),
            new: cache
                .iter()
                .filter(|r| r.status == RequestStatus::New)
                .count(),
        }
    }

    pub async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<Request, RequestError> {
        self.modify(id, |request| request.status = status).await
    }

    /// Attach an admin reply. Replying resolves the request.
    pub async fn reply(&self, id: Uuid, reply: &str) -> Result<Request, RequestError> {
        let reply = required(reply, "reply")?;

        self.modify(id, move |request| {
            request.admin_reply = Some(reply);
            request.status = RequestStatus::Resolved;
        })
        .await
    }

    async fn append(&self, request: Request) -> Result<Request, RequestError> {
        let mut cache = self.cache.write().await;
        cache.push(request.clone());

        if let Err(e) = self.persist(&cache).await {
            cache.pop();
            return Err(e.into());
        }

        info!("Stored request {} from {}", request.id, request.author.user_id);
        Ok(request)
    }

    async fn modify<F>(&self, id: Uuid, change: F) -> Result<Request, RequestError>
    where
        F: FnOnce(&mut Request) + Send,
    {
        let mut cache = self.cache.write().await;
        let index = cache
            .iter()
            .position(|r| r.id == id)
            .ok_or(RequestError::NotFound(id))?;

        let previous = cache[index].clone();
        change(&mut cache[index]);

        if let Err(e) = self.persist(&cache).await {
            warn!("Rolling back change to request {}: {}", id, e);
            cache[index] = previous;
            return Err(e.into());
        }

        Ok(cache[index].clone())
    }

    async fn persist(&self, requests: &[Request]) -> Result<(), StoreError> {
        let json = serde_json::to_string(requests).map_err(|source| StoreError::Encode {
            key: REQUESTS_KEY.to_string(),
            source,
        })?;

        self.store.put(REQUESTS_KEY, json).await
    }
}

fn required(value: &str, field: &'static str) -> Result<String, RequestError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RequestError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
