use aws_sdk_appstream::operation::describe_sessions::DescribeSessionsOutput;
use aws_sdk_appstream::operation::expire_session::ExpireSessionOutput;
use aws_sdk_appstream::primitives::DateTime as SmithyDateTime;
use aws_sdk_appstream::types::{Session, SessionState};
use aws_smithy_mocks::{Rule, mock, mock_client};
use chrono::{DateTime, Utc};
use model::AuthenticationType;
use serde_json::{Value, json};
use service::{SessionQuery, SessionRecord};

/// Test identity values
pub const TEST_STACK: &str = "test-stack";
pub const TEST_FLEET: &str = "test-fleet";
pub const TEST_USER: &str = "test-user";
pub const TEST_SESSION_ID: &str = "test-session-1";

/// 2024-01-01T10:00:00Z as a unix timestamp
pub const TEST_EXPIRATION_EPOCH: i64 = 1_704_103_200;

/// A well formed invocation payload for the given action.
pub fn session_event(action: &str) -> Value {
    json!({
        "stackName": TEST_STACK,
        "resourceName": TEST_FLEET,
        "userName": TEST_USER,
        "userAccessMode": "saml",
        "sessionId": TEST_SESSION_ID,
        "action": action,
    })
}

/// The query the test identity resolves to.
pub fn test_query() -> SessionQuery {
    SessionQuery {
        stack_name: TEST_STACK.to_string(),
        fleet_name: TEST_FLEET.to_string(),
        user_id: TEST_USER.to_string(),
        authentication_type: AuthenticationType::Saml,
    }
}

/// A session record expiring at the given unix timestamp.
pub fn session_record(id: &str, expiration_epoch: i64) -> SessionRecord {
    let max_expiration_time: DateTime<Utc> =
        DateTime::from_timestamp(expiration_epoch, 0).expect("test timestamp should be in range");

    SessionRecord {
        id: id.to_string(),
        max_expiration_time,
    }
}

/// An API session as returned by describe_sessions.
pub fn appstream_session(id: &str, expiration_epoch: i64) -> Session {
    Session::builder()
        .id(id)
        .user_id(TEST_USER)
        .stack_name(TEST_STACK)
        .fleet_name(TEST_FLEET)
        .state(SessionState::Active)
        .max_expiration_time(SmithyDateTime::from_secs(expiration_epoch))
        .build()
}

/// An AppStream client answering describe_sessions with a fixed session
/// list and acknowledging every expire_session call.
pub fn mock_appstream_client(sessions: Vec<Session>) -> aws_sdk_appstream::Client {
    let describe_rule: Rule = mock!(aws_sdk_appstream::Client::describe_sessions)
        .match_requests(|_| true)
        .sequence()
        .output(move || {
            DescribeSessionsOutput::builder()
                .set_sessions(Some(sessions.clone()))
                .build()
        })
        .repeatedly()
        .build();

    let expire_rule: Rule = mock!(aws_sdk_appstream::Client::expire_session)
        .match_requests(|_| true)
        .sequence()
        .output(|| ExpireSessionOutput::builder().build())
        .repeatedly()
        .build();

    mock_client!(aws_sdk_appstream, [&describe_rule, &expire_rule])
}
