use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::{AuthenticationType, Error, SessionRequest};
use std::fmt::{Display, Formatter};

/// A single streaming session tracked by the remote session service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: String,
    pub max_expiration_time: DateTime<Utc>,
}

/// Identity of the sessions to look up: the stack and fleet they run
/// against, the user holding them and how that user authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuery {
    pub stack_name: String,
    pub fleet_name: String,
    pub user_id: String,
    pub authentication_type: AuthenticationType,
}

impl From<&SessionRequest> for SessionQuery {
    fn from(request: &SessionRequest) -> Self {
        SessionQuery {
            stack_name: request.stack_name.clone(),
            fleet_name: request.resource_name.clone(),
            user_id: request.user_name.clone(),
            authentication_type: request.user_access_mode.authentication_type(),
        }
    }
}

/// Query and terminate streaming sessions.
///
/// Implementations are long lived and shared across invocations, so every
/// operation takes `&self`.
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn describe_sessions(
        &self,
        query: &SessionQuery,
    ) -> Result<Vec<SessionRecord>, ServiceError>;

    async fn expire_session(&self, session_id: &str) -> Result<(), ServiceError>;
}

/// Errors surfaced by the remote session service.
#[derive(Debug)]
pub struct ServiceError {
    pub operation: ServiceOperation,
    pub reason: ServiceErrorReason,
}

#[derive(Debug, Clone)]
pub enum ServiceOperation {
    DescribeSessions,
    ExpireSession,
}

#[derive(Debug)]
pub enum ServiceErrorReason {
    // The remote call itself failed
    RemoteFailure(Error),
    // The service returned a record violating its contract
    BadRecord(String),
}

impl ServiceError {
    pub fn new(operation: ServiceOperation, reason: ServiceErrorReason) -> Self {
        ServiceError { operation, reason }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{:?}", self).as_str())
    }
}

impl std::error::Error for ServiceError {}
