use lambda_runtime::{LambdaEvent, tracing};
use model::{Error, SessionAction, SessionRequest, SessionResponse};
use serde_json::Value;
use service::{SessionQuery, SessionRecord, SessionService};

/// Lambda event handler for session expiration lookups.
///
/// Resolves the requested session against the session service and answers
/// with its expiration time or a termination acknowledgement. Every path
/// resolves to a well formed `SessionResponse`; nothing is raised to the
/// runtime.
pub async fn session_fn(
    session_service: &impl SessionService,
    event: LambdaEvent<Value>,
) -> Result<SessionResponse, Error> {
    tracing::debug!("Handling session event {}", event.payload);

    let request: SessionRequest = match serde_json::from_value(event.payload) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!("Rejecting malformed session event, {err}");

            return Ok(SessionResponse::bad_request());
        }
    };

    let query: SessionQuery = SessionQuery::from(&request);
    let sessions: Vec<SessionRecord> = match session_service.describe_sessions(&query).await {
        Ok(sessions) => sessions,
        Err(err) => {
            tracing::error!("Failed to describe sessions, {err}");

            return Ok(SessionResponse::service_failure());
        }
    };

    // Session ids are unique, the first match is the only match
    let matched: Option<&SessionRecord> = sessions
        .iter()
        .find(|session| session.id == request.session_id);

    let Some(session) = matched else {
        tracing::info!("No matching session found");

        return Ok(SessionResponse::not_found());
    };

    tracing::info!("Matching session found");

    match request.action {
        SessionAction::Describe => Ok(SessionResponse::with_expiration(
            session.max_expiration_time,
        )),
        SessionAction::Expire => match session_service
            .expire_session(request.session_id.as_str())
            .await
        {
            Ok(()) => Ok(SessionResponse::ok()),
            Err(err) => {
                tracing::error!("Failed to expire session {}, {err}", request.session_id);

                Ok(SessionResponse::service_failure())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;
    use serde_json::json;
    use service_in_memory::InMemorySessionService;
    use test_utils::{TEST_EXPIRATION_EPOCH, TEST_SESSION_ID, session_event, session_record};

    fn event(payload: Value) -> LambdaEvent<Value> {
        LambdaEvent::new(payload, Context::default())
    }

    #[tokio::test]
    async fn describe_returns_expiration_of_matching_session() {
        let session_service: InMemorySessionService = InMemorySessionService::with_sessions(
            vec![session_record(TEST_SESSION_ID, TEST_EXPIRATION_EPOCH)],
        );

        let response: SessionResponse = session_fn(&session_service, event(session_event("describe")))
            .await
            .unwrap();

        assert_eq!(200, response.status_code);
        assert_eq!(
            Some("2024-01-01T10:00:00Z".to_string()),
            response.max_expiration
        );
    }

    #[tokio::test]
    async fn describe_scans_past_other_sessions() {
        let session_service: InMemorySessionService = InMemorySessionService::with_sessions(vec![
            session_record("test-session-0", TEST_EXPIRATION_EPOCH + 60),
            session_record(TEST_SESSION_ID, TEST_EXPIRATION_EPOCH),
        ]);

        let response: SessionResponse = session_fn(&session_service, event(session_event("describe")))
            .await
            .unwrap();

        assert_eq!(200, response.status_code);
        assert_eq!(
            Some("2024-01-01T10:00:00Z".to_string()),
            response.max_expiration
        );
    }

    #[tokio::test]
    async fn expire_acknowledges_without_expiration() {
        let session_service: InMemorySessionService = InMemorySessionService::with_sessions(
            vec![session_record(TEST_SESSION_ID, TEST_EXPIRATION_EPOCH)],
        );

        let response: SessionResponse = session_fn(&session_service, event(session_event("expire")))
            .await
            .unwrap();

        assert_eq!(200, response.status_code);
        assert_eq!(None, response.max_expiration);
        assert_eq!(
            vec![TEST_SESSION_ID.to_string()],
            session_service.expired_sessions()
        );
    }

    #[tokio::test]
    async fn no_matching_session_is_not_found() {
        let session_service: InMemorySessionService = InMemorySessionService::with_sessions(
            vec![session_record("test-session-2", TEST_EXPIRATION_EPOCH)],
        );

        let response: SessionResponse = session_fn(&session_service, event(session_event("describe")))
            .await
            .unwrap();

        assert_eq!(404, response.status_code);
    }

    #[tokio::test]
    async fn empty_session_list_is_not_found_regardless_of_action() {
        for action in ["describe", "expire"] {
            let session_service: InMemorySessionService = InMemorySessionService::default();

            let response: SessionResponse = session_fn(&session_service, event(session_event(action)))
                .await
                .unwrap();

            assert_eq!(404, response.status_code);
            assert!(session_service.expired_sessions().is_empty());
        }
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let session_service: InMemorySessionService = InMemorySessionService::default();
        let mut payload: Value = session_event("describe");
        payload.as_object_mut().unwrap().remove("sessionId");

        let response: SessionResponse = session_fn(&session_service, event(payload))
            .await
            .unwrap();

        assert_eq!(400, response.status_code);
    }

    #[tokio::test]
    async fn unknown_access_mode_is_bad_request() {
        let session_service: InMemorySessionService = InMemorySessionService::default();
        let mut payload: Value = session_event("describe");
        payload
            .as_object_mut()
            .unwrap()
            .insert("userAccessMode".to_string(), json!("unknown"));

        let response: SessionResponse = session_fn(&session_service, event(payload))
            .await
            .unwrap();

        assert_eq!(400, response.status_code);
    }

    #[tokio::test]
    async fn unknown_action_is_bad_request() {
        let session_service: InMemorySessionService = InMemorySessionService::with_sessions(
            vec![session_record(TEST_SESSION_ID, TEST_EXPIRATION_EPOCH)],
        );

        let response: SessionResponse = session_fn(&session_service, event(session_event("refresh")))
            .await
            .unwrap();

        assert_eq!(400, response.status_code);
    }

    #[tokio::test]
    async fn non_object_payload_is_bad_request() {
        let session_service: InMemorySessionService = InMemorySessionService::default();

        let response: SessionResponse = session_fn(&session_service, event(json!("not an event")))
            .await
            .unwrap();

        assert_eq!(400, response.status_code);
    }

    #[tokio::test]
    async fn describe_failure_is_service_failure() {
        let session_service: InMemorySessionService = InMemorySessionService::failing_describe();

        let response: SessionResponse = session_fn(&session_service, event(session_event("describe")))
            .await
            .unwrap();

        assert_eq!(500, response.status_code);
    }

    #[tokio::test]
    async fn expire_failure_is_service_failure() {
        let session_service: InMemorySessionService = InMemorySessionService::failing_expire(
            vec![session_record(TEST_SESSION_ID, TEST_EXPIRATION_EPOCH)],
        );

        let response: SessionResponse = session_fn(&session_service, event(session_event("expire")))
            .await
            .unwrap();

        assert_eq!(500, response.status_code);
    }
}
