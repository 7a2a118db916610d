use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::models::{NewUser, User, UserUpdate};

use super::Resource;

const USERS_PATH: &str = "/users";

#[derive(Debug, Serialize)]
struct ActiveFlag {
    active: bool,
}

/// Login accounts of the administration front end.
#[derive(Clone)]
pub struct UserService {
    users: Resource<User>,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            users: Resource::new(api, USERS_PATH),
        }
    }

    pub fn resource(&self) -> &Resource<User> {
        &self.users
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.users.list().await
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.users.get(id).await
    }

    pub async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        self.users.create(user).await
    }

    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        self.users.update(id, update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.users.delete(id).await
    }

    /// Enable or disable an account without touching its other fields
    pub async fn set_active(&self, id: i64, active: bool) -> Result<User, ApiError> {
        let path = format!("{}/active", self.users.item_path(id));
        self.users
            .api()
            .patch_json(&path, &ActiveFlag { active })
            .await
    }
}
