use async_trait::async_trait;
use hilal_core::{ArticleSource, Error, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub mod backends;

pub use backends::*;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait SourceBackend: Send + Sync {
    async fn new() -> Result<Self>
    where
        Self: Sized;
    fn get_config(&mut self) -> Option<&mut BackendConfig>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    pub fn with_url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL.to_string(), DEFAULT_TIMEOUT)
    }
}

/// Creates a backend through [`SourceBackend::new`] and points it at
/// `backend_url` when the backend has a configurable endpoint.
pub async fn build_source<S>(backend_url: Option<&str>) -> Result<S>
where
    S: SourceBackend + ArticleSource + 'static,
{
    let mut source = S::new().await?;
    if let Some(url) = backend_url {
        match source.get_config() {
            Some(config) => {
                config.with_url(url);
            }
            None => debug!("{} source ignores backend URL {}", source.name(), url),
        }
    }
    Ok(source)
}

/// Builds the article source named by `kind` (`http` or `memory`).
///
/// The memory source is seeded from `seed` when given; the HTTP source talks
/// to `backend_url`, or the default API URL.
pub async fn create_source(
    kind: &str,
    backend_url: Option<&str>,
    seed: Option<&Path>,
) -> Result<Arc<dyn ArticleSource>> {
    match kind {
        "memory" => {
            let source = match seed {
                Some(path) => InMemorySource::from_json_file(path).await?,
                None => build_source::<InMemorySource>(backend_url).await?,
            };
            info!("📚 Using in-memory article source");
            Ok(Arc::new(source))
        }
        "http" => {
            let source = build_source::<HttpSource>(backend_url).await?;
            info!("🌐 Using article API at {}", source.base_url());
            Ok(Arc::new(source))
        }
        other => Err(Error::InvalidConfig(format!(
            "Unknown source backend: {} (expected http or memory)",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{build_source, create_source, BackendConfig, SourceBackend};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_source_kinds() {
        let memory = create_source("memory", None, None).await.unwrap();
        assert_eq!(memory.name(), "memory");

        let http = create_source("http", Some("http://127.0.0.1:9"), None).await.unwrap();
        assert_eq!(http.name(), "http");

        assert!(matches!(
            create_source("qdrant", None, None).await,
            Err(Error::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_build_source_applies_backend_url() {
        let http = build_source::<HttpSource>(Some("http://api.example.test")).await.unwrap();
        assert_eq!(http.base_url(), "http://api.example.test");

        let default = build_source::<HttpSource>(None).await.unwrap();
        assert_eq!(default.base_url(), DEFAULT_API_URL);

        let mut memory = build_source::<InMemorySource>(Some("http://ignored")).await.unwrap();
        assert!(memory.get_config().is_none());
        assert_eq!(memory.len().await, 0);
    }
}
