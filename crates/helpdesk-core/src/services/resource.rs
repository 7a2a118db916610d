use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::api::{ApiClient, ApiError};

/// Conventional CRUD endpoints of one REST collection.
///
/// `GET /path`, `GET /path/{id}`, `POST /path`, `PUT /path/{id}` and
/// `DELETE /path/{id}`, all JSON.
pub struct Resource<T> {
    api: ApiClient,
    path: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            path: self.path,
            _item: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Resource<T> {
    pub fn new(api: ApiClient, path: &'static str) -> Self {
        Self {
            api,
            path,
            _item: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.api.get_json(self.path).await
    }

    pub async fn list_with<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Vec<T>, ApiError> {
        self.api.get_json_with_query(self.path, query).await
    }

    pub async fn get(&self, id: i64) -> Result<T, ApiError> {
        self.api.get_json(&self.item_path(id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T, ApiError> {
        self.api.post_json(self.path, body).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> Result<T, ApiError> {
        self.api.put_json(&self.item_path(id), body).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&self.item_path(id)).await
    }
}
