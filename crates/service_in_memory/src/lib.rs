use async_trait::async_trait;
use service::ServiceErrorReason::RemoteFailure;
use service::ServiceOperation::{DescribeSessions, ExpireSession};
use service::{ServiceError, SessionQuery, SessionRecord, SessionService};
use std::sync::{Arc, Mutex};

/// Session service holding a fixed set of sessions, for use in testing.
///
/// Expired sessions are removed from the set and their ids recorded so
/// tests can assert on the terminate call.
pub struct InMemorySessionService {
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
    expired: Arc<Mutex<Vec<String>>>,
    fail_describe: bool,
    fail_expire: bool,
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        InMemorySessionService::with_sessions(vec![])
    }
}

impl InMemorySessionService {
    pub fn with_sessions(sessions: Vec<SessionRecord>) -> Self {
        InMemorySessionService {
            sessions: Arc::new(Mutex::new(sessions)),
            expired: Arc::new(Mutex::new(vec![])),
            fail_describe: false,
            fail_expire: false,
        }
    }

    /// A service whose describe call always fails.
    pub fn failing_describe() -> Self {
        InMemorySessionService {
            fail_describe: true,
            ..Default::default()
        }
    }

    /// A service holding sessions whose expire call always fails.
    pub fn failing_expire(sessions: Vec<SessionRecord>) -> Self {
        InMemorySessionService {
            fail_expire: true,
            ..InMemorySessionService::with_sessions(sessions)
        }
    }

    /// Ids passed to `expire_session` so far.
    pub fn expired_sessions(&self) -> Vec<String> {
        self.expired.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn describe_sessions(
        &self,
        _query: &SessionQuery,
    ) -> Result<Vec<SessionRecord>, ServiceError> {
        if self.fail_describe {
            return Err(ServiceError::new(
                DescribeSessions,
                RemoteFailure("configured to fail".into()),
            ));
        }

        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn expire_session(&self, session_id: &str) -> Result<(), ServiceError> {
        if self.fail_expire {
            return Err(ServiceError::new(
                ExpireSession,
                RemoteFailure("configured to fail".into()),
            ));
        }

        self.sessions
            .lock()
            .unwrap()
            .retain(|session| session.id != session_id);
        self.expired.lock().unwrap().push(session_id.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{TEST_EXPIRATION_EPOCH, TEST_SESSION_ID, session_record, test_query};

    #[tokio::test]
    async fn expire_removes_session_and_records_id() {
        let session_service: InMemorySessionService = InMemorySessionService::with_sessions(vec![
            session_record(TEST_SESSION_ID, TEST_EXPIRATION_EPOCH),
        ]);

        session_service
            .expire_session(TEST_SESSION_ID)
            .await
            .unwrap();

        let remaining: Vec<SessionRecord> = session_service
            .describe_sessions(&test_query())
            .await
            .unwrap();

        assert!(remaining.is_empty());
        assert_eq!(
            vec![TEST_SESSION_ID.to_string()],
            session_service.expired_sessions()
        );
    }
}
