use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::User;
use crate::session::{TOKEN_KEY, USER_KEY};

const LOGIN_PATH: &str = "/auth/login";
const CURRENT_USER_PATH: &str = "/auth/me";
const CHANGE_PASSWORD_PATH: &str = "/auth/change-password";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and store it with the user profile.
    ///
    /// Wrong credentials come back as `ApiError::Unauthorized`, after the
    /// client has run its usual 401 teardown.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidRequest(
                "Email and password required".to_string(),
            ));
        }

        let response: LoginResponse = self
            .api
            .post_json(LOGIN_PATH, &LoginRequest { email, password })
            .await?;

        if response.token.is_empty() {
            return Err(ApiError::InvalidResponse(
                "Login response contained an empty token".to_string(),
            ));
        }

        let store = self.api.store();
        // Replace whatever a previous login left behind
        store.clear().map_err(|e| ApiError::Session(e.to_string()))?;
        store
            .set(TOKEN_KEY, &response.token)
            .map_err(|e| ApiError::Session(e.to_string()))?;

        match serde_json::to_string(&response.user) {
            Ok(user_json) => {
                if let Err(e) = store.set(USER_KEY, &user_json) {
                    warn!(error = %e, "Failed to store user profile");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize user profile"),
        }

        info!(user_id = response.user.id, "Login successful");
        Ok(response.user)
    }

    /// Explicit logout: drop all local session state
    pub fn logout(&self) -> Result<(), ApiError> {
        self.api
            .store()
            .clear()
            .map_err(|e| ApiError::Session(e.to_string()))?;
        info!("Logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.store().token().is_some_and(|t| !t.is_empty())
    }

    /// The profile stored at login, without asking the backend
    pub fn cached_user(&self) -> Option<User> {
        let json = self.api.store().get(USER_KEY)?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Stored user profile is unreadable");
                None
            }
        }
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.api.get_json(CURRENT_USER_PATH).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), ApiError> {
        self.api
            .post_unit(
                CHANGE_PASSWORD_PATH,
                &ChangePasswordRequest {
                    current_password: current,
                    new_password: new,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::{MemorySessionStore, SessionStore};

    fn service_with(store: Arc<MemorySessionStore>) -> AuthService {
        let api = ApiClient::new("http://localhost:8000/api", store).unwrap();
        AuthService::new(api)
    }

    #[test]
    fn test_logout_clears_everything() {
        let store = Arc::new(MemorySessionStore::with_token("abc123"));
        store.set(USER_KEY, r#"{"id":1,"name":"A","email":"a@b.c"}"#).unwrap();
        let auth = service_with(store.clone());
        assert!(auth.is_authenticated());

        auth.logout().unwrap();
        assert!(store.is_empty());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_cached_user() {
        let store = Arc::new(MemorySessionStore::with_token("abc123"));
        let auth = service_with(store.clone());
        assert_eq!(auth.cached_user(), None);

        store.set(USER_KEY, r#"{"id":9,"name":"Robin","email":"robin@example.com"}"#).unwrap();
        let user = auth.cached_user().unwrap();
        assert_eq!(user.id, 9);
        assert_eq!(user.name, "Robin");

        store.set(USER_KEY, "garbage").unwrap();
        assert_eq!(auth.cached_user(), None);
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let auth = service_with(Arc::new(MemorySessionStore::new()));
        let err = auth.login("", "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
