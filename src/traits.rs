use std::error::Error;

use async_trait::async_trait;
use serde_json::Value;

use crate::key::Key;

/// A document store that is addressed by hierarchical paths (e.g. `tasks/toDo/{id}`)
///
/// This is usually a remote [`Client`](crate::client::Client), but tests and demos can use a [`LocalStore`](crate::cache::LocalStore) instead.
/// No implementation is expected to retry, batch or cache anything: every call maps to exactly one request.
#[async_trait]
pub trait DocumentStore {
    /// Returns the document at this path, or `Value::Null` if nothing is stored there
    async fn get(&self, path: &str) -> Result<Value, Box<dyn Error>>;

    /// Replaces the document at this path.
    /// Storing `Value::Null` removes the document
    async fn put(&self, path: &str, body: &Value) -> Result<(), Box<dyn Error>>;

    /// Stores a new document as a child of this path, and returns its freshly generated key
    async fn post(&self, path: &str, body: &Value) -> Result<Key, Box<dyn Error>>;

    /// Removes the document at this path (this is not an error if there is none)
    async fn delete(&self, path: &str) -> Result<(), Box<dyn Error>>;
}

#[async_trait]
impl<T> DocumentStore for &T
where
    T: DocumentStore + Sync + ?Sized,
{
    async fn get(&self, path: &str) -> Result<Value, Box<dyn Error>> {
        (**self).get(path).await
    }
    async fn put(&self, path: &str, body: &Value) -> Result<(), Box<dyn Error>> {
        (**self).put(path, body).await
    }
    async fn post(&self, path: &str, body: &Value) -> Result<Key, Box<dyn Error>> {
        (**self).post(path, body).await
    }
    async fn delete(&self, path: &str) -> Result<(), Box<dyn Error>> {
        (**self).delete(path).await
    }
}
