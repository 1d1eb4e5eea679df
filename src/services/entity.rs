use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{EntityId, Identified};
use crate::session::ResourceKind;

/// An entity with a CRUD collection on the backend.
pub trait Resource: Identified + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path relative to the API base, e.g. `universities`
    const PATH: &'static str;
    const KIND: ResourceKind;
}

/// Thin typed pass-through to the HTTP client. No caching, no retries.
pub struct EntityClient<T> {
    http: HttpClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Resource> EntityClient<T> {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        self.http
            .get(T::PATH)
            .await
            .inspect_err(|e| warn!(resource = %T::KIND, error = %e, "list failed"))
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<T, ClientError> {
        self.http
            .get(&Self::item_path(id))
            .await
            .inspect_err(|e| warn!(resource = %T::KIND, id, error = %e, "fetch failed"))
    }

    /// Create a record. Any id on `entity` is dropped; the backend assigns one.
    pub async fn create(&self, mut entity: T) -> Result<T, ClientError> {
        entity.set_id(None);
        self.http
            .post(T::PATH, &entity)
            .await
            .inspect_err(|e| warn!(resource = %T::KIND, error = %e, "create failed"))
    }

    pub async fn update(&self, id: EntityId, entity: &T) -> Result<T, ClientError> {
        self.http
            .put(&Self::item_path(id), entity)
            .await
            .inspect_err(|e| warn!(resource = %T::KIND, id, error = %e, "update failed"))
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), ClientError> {
        self.http
            .delete(&Self::item_path(id))
            .await
            .inspect_err(|e| warn!(resource = %T::KIND, id, error = %e, "delete failed"))
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", T::PATH, id)
    }
}
