use serde::{Deserialize, Serialize};

pub mod env;
mod response;

pub use response::SessionResponse;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Identity-provider mode carried on the inbound event.
/// This is the session-variable vocabulary, not the API one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Custom,
    Saml,
    Userpool,
}

/// Authentication-type vocabulary of the session service API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationType {
    Api,
    Saml,
    Userpool,
}

impl AccessMode {
    /// Map an inbound access mode onto the API authentication type.
    pub fn authentication_type(&self) -> AuthenticationType {
        match self {
            AccessMode::Custom => AuthenticationType::Api,
            AccessMode::Saml => AuthenticationType::Saml,
            AccessMode::Userpool => AuthenticationType::Userpool,
        }
    }
}

impl AuthenticationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationType::Api => "API",
            AuthenticationType::Saml => "SAML",
            AuthenticationType::Userpool => "USERPOOL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionAction {
    Describe,
    Expire,
}

/// A request to look up or force the expiration of one streaming session.
/// Every field is required; a payload missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub stack_name: String,
    // The fleet the session runs on
    pub resource_name: String,
    pub user_name: String,
    pub user_access_mode: AccessMode,
    pub session_id: String,
    pub action: SessionAction,
}
