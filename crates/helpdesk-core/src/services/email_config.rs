use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::models::{EmailConfig, EmailConfigUpdate};

const EMAIL_CONFIG_PATH: &str = "/email-config";

#[derive(Debug, Serialize)]
struct TestEmail<'a> {
    to: &'a str,
}

/// The single outgoing-mail configuration of the backend.
#[derive(Clone)]
pub struct EmailConfigService {
    api: ApiClient,
}

impl EmailConfigService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<EmailConfig, ApiError> {
        self.api.get_json(EMAIL_CONFIG_PATH).await
    }

    pub async fn update(&self, update: &EmailConfigUpdate) -> Result<EmailConfig, ApiError> {
        self.api.put_json(EMAIL_CONFIG_PATH, update).await
    }

    /// Ask the backend to send a test message with the saved settings
    pub async fn send_test(&self, to: &str) -> Result<(), ApiError> {
        let path = format!("{}/test", EMAIL_CONFIG_PATH);
        self.api.post_unit(&path, &TestEmail { to }).await
    }
}
