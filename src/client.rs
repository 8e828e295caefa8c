//! This module provides a client to connect to the remote document store

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::key::Key;
use crate::resource::Resource;
use crate::traits::DocumentStore;

/// The reply of the store to a POST request
#[derive(Deserialize)]
struct PostReply {
    name: Key,
}

/// A [`DocumentStore`] that sends its requests to a REST server (e.g. a Firebase realtime database)
pub struct Client {
    resource: Resource,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self, Box<dyn Error>> {
        let url = Url::parse(url.as_ref())?;

        Ok(Self{
            resource: Resource::new(url),
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the URL set in [`crate::config::BASE_URL`]
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::get(&crate::config::BASE_URL))
    }

    pub fn url(&self) -> &Url {
        self.resource.url()
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response, Box<dyn Error>> {
        let url = self.resource.document_url(path)?;
        log::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(body)?);
        }
        let response = request.send().await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentStore for Client {
    async fn get(&self, path: &str) -> Result<Value, Box<dyn Error>> {
        let response = self.request(Method::GET, path, None).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn put(&self, path: &str, body: &Value) -> Result<(), Box<dyn Error>> {
        self.request(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Key, Box<dyn Error>> {
        let response = self.request(Method::POST, path, Some(body)).await?;
        let text = response.text().await?;
        let reply: PostReply = serde_json::from_str(&text)
            .map_err(|err| format!("Unable to read the key of the created document at {}: {} ({})", path, err, text))?;
        log::debug!("Created {}/{}", path, reply.name);
        Ok(reply.name)
    }

    async fn delete(&self, path: &str) -> Result<(), Box<dyn Error>> {
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }
}
