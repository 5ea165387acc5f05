use async_trait::async_trait;
use hilal_core::{Article, ArticleEnvelope, ArticleQuery, ArticleSource, Error, Result, UploadReceipt, UploadRequest};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;
use crate::{BackendConfig, SourceBackend};

const FILTERED_PATH: &str = "api/articles/filtered/";
const TRENDING_PATH: &str = "api/articles/trending/";
const UPLOAD_PATH: &str = "api/upload-file/";

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Article source backed by the site's REST API.
pub struct HttpSource {
    client: Arc<Client>,
    config: BackendConfig,
}

impl HttpSource {
    pub fn with_config(config: BackendConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.config.url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?.join(path)?)
    }

    async fn read_articles(response: Response) -> Result<Vec<Article>> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<ArticleEnvelope>().await?.into_articles())
    }
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.config.url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

#[async_trait]
impl SourceBackend for HttpSource {
    async fn new() -> Result<Self>
    where
        Self: Sized,
    {
        Ok(Self::with_config(BackendConfig::default()))
    }

    fn get_config(&mut self) -> Option<&mut BackendConfig> {
        Some(&mut self.config)
    }
}

#[async_trait]
impl ArticleSource for HttpSource {
    async fn filtered(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let url = self.endpoint(FILTERED_PATH)?;
        debug!("GET {} {:?}", url, query.to_pairs());

        let response = self
            .client
            .get(url)
            .query(&query.to_pairs())
            .timeout(self.config.timeout)
            .send()
            .await?;

        Self::read_articles(response).await
    }

    async fn trending(&self, publication: &str) -> Result<Vec<Article>> {
        let mut url = self.endpoint(TRENDING_PATH)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base URL", self.config.url)))?
            .pop_if_empty()
            .push(publication)
            .push("");
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await?;

        Self::read_articles(response).await
    }

    async fn upload_file(&self, request: &UploadRequest) -> Result<UploadReceipt> {
        let url = self.endpoint(UPLOAD_PATH)?;
        let part = Part::bytes(request.bytes.clone()).file_name(request.file_name.clone());
        let form = Form::new()
            .part("file", part)
            .text("entity_type", request.kind.dir_name())
            .text("entity_id", request.entity_id.clone());

        let response = self
            .client
            .post(url)
            .multipart(form)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "File upload failed".to_string());
            warn!("Upload of {} rejected ({}): {}", request.file_name, status, message);
            return Err(Error::Upload(message));
        }

        Ok(response.json::<UploadReceipt>().await?)
    }

    fn name(&self) -> &str {
        "http"
    }
}
