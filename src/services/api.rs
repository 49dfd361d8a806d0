use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Message, Profile, User};

/// Errors that can occur when talking to the remote backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// Canned status payload the backend endpoints will return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub success: bool,
    pub message: String,
}

impl ApiStatus {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Client for the remote backend
///
/// The backend does not exist yet: every method logs the call and reports
/// success without touching the network. The signatures are the contract
/// the real implementation will slot into; callers already treat these
/// calls as best-effort next to the authoritative local write.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// HTTP client the real endpoints will go through
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub async fn login(&self, email: &str) -> Result<ApiStatus, ApiError> {
        tracing::info!("API login call for {} ({}), stubbed", email, self.base_url);
        Ok(ApiStatus::ok("Login successful"))
    }

    pub async fn register(&self, user: &User) -> Result<ApiStatus, ApiError> {
        tracing::info!("API register call for {} ({}), stubbed", user.email, self.base_url);
        Ok(ApiStatus::ok("Registration successful"))
    }

    pub async fn logout(&self) -> Result<ApiStatus, ApiError> {
        tracing::info!("API logout call ({}), stubbed", self.base_url);
        Ok(ApiStatus::ok("Logout successful"))
    }

    pub async fn get_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        tracing::info!("API get_profiles call ({}), stubbed", self.base_url);
        Ok(Vec::new())
    }

    pub async fn get_messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError> {
        tracing::info!(
            "API get_messages call for conversation {} ({}), stubbed",
            conversation_id,
            self.base_url
        );
        Ok(Vec::new())
    }

    pub async fn send_message(&self, message: &Message) -> Result<ApiStatus, ApiError> {
        tracing::info!(
            "API send_message call for conversation {} ({}), stubbed",
            message.conversation_id,
            self.base_url
        );
        Ok(ApiStatus::ok("Message sent successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_stub_calls_report_success() {
        let api = ApiClient::new("http://localhost:3001/api".to_string());

        assert!(api.login("test@iiti.ac.in").await.unwrap().success);
        assert!(api.logout().await.unwrap().success);
        assert!(api.get_profiles().await.unwrap().is_empty());
        assert!(api.get_messages("c1").await.unwrap().is_empty());

        let message = Message {
            id: "m1".to_string(),
            conversation_id: "c1".to_string(),
            sender_id: "u1".to_string(),
            content: "hi".to_string(),
            timestamp: Utc::now(),
            read: false,
        };
        assert!(api.send_message(&message).await.unwrap().success);
    }
}
