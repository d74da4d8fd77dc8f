use async_trait::async_trait;
use aws_sdk_appstream::operation::describe_sessions::DescribeSessionsOutput;
use aws_sdk_appstream::types::Session;
use chrono::{DateTime, Utc};
use model::AuthenticationType;
use service::ServiceErrorReason::{BadRecord, RemoteFailure};
use service::ServiceOperation::{DescribeSessions, ExpireSession};
use service::{ServiceError, SessionQuery, SessionRecord, SessionService};

/// Session service backed by the AppStream 2.0 API.
pub struct AppStreamSessionService {
    appstream_client: aws_sdk_appstream::Client,
}

impl AppStreamSessionService {
    pub fn new(appstream_client: aws_sdk_appstream::Client) -> Self {
        AppStreamSessionService { appstream_client }
    }
}

#[async_trait]
impl SessionService for AppStreamSessionService {
    async fn describe_sessions(
        &self,
        query: &SessionQuery,
    ) -> Result<Vec<SessionRecord>, ServiceError> {
        let output: DescribeSessionsOutput = self
            .appstream_client
            .describe_sessions()
            .stack_name(query.stack_name.as_str())
            .fleet_name(query.fleet_name.as_str())
            .user_id(query.user_id.as_str())
            .authentication_type(to_authentication_type(query.authentication_type))
            .send()
            .await
            .map_err(|err| ServiceError::new(DescribeSessions, RemoteFailure(err.into())))?;

        output
            .sessions
            .unwrap_or_default()
            .into_iter()
            .map(to_record)
            .collect()
    }

    async fn expire_session(&self, session_id: &str) -> Result<(), ServiceError> {
        self.appstream_client
            .expire_session()
            .session_id(session_id)
            .send()
            .await
            .map_err(|err| ServiceError::new(ExpireSession, RemoteFailure(err.into())))?;

        Ok(())
    }
}

fn to_authentication_type(
    authentication_type: AuthenticationType,
) -> aws_sdk_appstream::types::AuthenticationType {
    match authentication_type {
        AuthenticationType::Api => aws_sdk_appstream::types::AuthenticationType::Api,
        AuthenticationType::Saml => aws_sdk_appstream::types::AuthenticationType::Saml,
        AuthenticationType::Userpool => aws_sdk_appstream::types::AuthenticationType::Userpool,
    }
}

/// Convert an API session into a record.
/// Both the id and the expiration time are promised by the service contract.
fn to_record(session: Session) -> Result<SessionRecord, ServiceError> {
    let id: String = session
        .id
        .ok_or_else(|| ServiceError::new(DescribeSessions, BadRecord("session without an id".to_string())))?;

    let expiration = session.max_expiration_time.ok_or_else(|| {
        ServiceError::new(
            DescribeSessions,
            BadRecord(format!("session {} without an expiration time", id)),
        )
    })?;

    let max_expiration_time: DateTime<Utc> =
        DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos()).ok_or_else(
            || {
                ServiceError::new(
                    DescribeSessions,
                    BadRecord(format!("session {} with an out of range expiration time", id)),
                )
            },
        )?;

    Ok(SessionRecord {
        id,
        max_expiration_time,
    })
}
