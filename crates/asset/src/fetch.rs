//! Text fetchers: where OBJ sources come from.

use std::{collections::HashMap, future::Future, time::Duration};

use reqwest::Client;

use crate::error::LoadError;

/// Retrieves the whole body behind `url` as text.
pub trait TextFetcher {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, LoadError>> + Send;
}

/// `http://` and `https://` over reqwest. Non-2xx responses are errors.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LoadError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown status").to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Local files, as `file://` URLs or plain paths. Needs a tokio runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

impl TextFetcher for FileFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.to_string(),
                source,
            })
    }
}

/// Picks [`HttpFetcher`] or [`FileFetcher`] by URL scheme.
#[derive(Clone)]
pub struct AnyFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl AnyFetcher {
    pub fn new() -> Result<Self, LoadError> {
        Ok(Self {
            http: HttpFetcher::new()?,
            file: FileFetcher,
        })
    }
}

pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl TextFetcher for AnyFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        if is_http_url(url) {
            self.http.fetch_text(url).await
        } else {
            self.file.fetch_text(url).await
        }
    }
}

/// Serves bodies registered in memory; unknown URLs answer 404.
#[derive(Clone, Debug, Default)]
pub struct MemoryFetcher {
    bodies: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.bodies.insert(url.into(), body.into());
    }
}

impl TextFetcher for MemoryFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        self.bodies.get(url).cloned().ok_or_else(|| LoadError::Status {
            url: url.to_string(),
            status: 404,
            reason: "Not Found".to_string(),
        })
    }
}
