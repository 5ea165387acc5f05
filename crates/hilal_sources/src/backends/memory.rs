use async_trait::async_trait;
use hilal_core::media::{upload_filename, UploadReceipt, UploadRequest};
use hilal_core::search::matches_query;
use hilal_core::{Article, ArticleEnvelope, ArticleQuery, ArticleSource, Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use crate::{BackendConfig, SourceBackend};

/// Trending feed length served by the memory backend.
const TRENDING_LIMIT: usize = 6;

/// A file accepted by the memory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub filename: String,
    pub kind: hilal_core::EntityKind,
    pub size: usize,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
    uploads: Vec<StoredUpload>,
}

impl MemoryStore {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            uploads: Vec::new(),
        }
    }

    pub fn store_article(&mut self, article: Article) {
        if let Some(existing) = self.articles.iter_mut().find(|a| a.id == article.id) {
            *existing = article;
        } else {
            self.articles.push(article);
        }
    }

    fn matches(article: &Article, query: &ArticleQuery, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            if !matches_query(article, needle) {
                return false;
            }
        }
        if let Some(publication) = &query.publication {
            if article.publication_name.as_deref() != Some(publication.as_str()) {
                return false;
            }
        }
        if let Some(category) = &query.category {
            if article.category_name.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(window) = &query.window {
            if !window.contains(article) {
                return false;
            }
        }
        true
    }

    pub fn filtered(&self, query: &ArticleQuery) -> Vec<Article> {
        let needle = query
            .search
            .as_deref()
            .map(|search| search.trim().to_lowercase())
            .filter(|search| !search.is_empty());

        self.articles
            .iter()
            .filter(|article| Self::matches(article, query, needle.as_deref()))
            .take(query.count.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Most visited articles of the publication, most visited first.
    pub fn trending(&self, publication: &str) -> Vec<Article> {
        let mut articles: Vec<Article> = self
            .articles
            .iter()
            .filter(|article| article.publication_name.as_deref() == Some(publication))
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.visits.unwrap_or(0).cmp(&a.visits.unwrap_or(0)));
        articles.truncate(TRENDING_LIMIT);
        articles
    }

    pub fn upload(&mut self, request: &UploadRequest) -> Result<UploadReceipt> {
        let filename = upload_filename(&request.file_name, request.kind, &request.entity_id)?;
        self.uploads.push(StoredUpload {
            filename: filename.clone(),
            kind: request.kind,
            size: request.bytes.len(),
        });
        Ok(UploadReceipt {
            filename: Some(filename),
            message: Some("File uploaded successfully".to_string()),
        })
    }
}

/// Article source over an in-process list, for tests and offline runs.
pub struct InMemorySource {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemorySource {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new(articles))),
        }
    }

    /// Loads articles from a JSON file holding either an API envelope
    /// (`{"data": [...]}`) or a bare array.
    pub async fn from_json_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let articles = match serde_json::from_str::<ArticleEnvelope>(&raw) {
            Ok(envelope) if envelope.data.is_some() => envelope.into_articles(),
            _ => serde_json::from_str::<Vec<Article>>(&raw).map_err(|e| {
                Error::Source(format!("Invalid seed file {}: {}", path.display(), e))
            })?,
        };
        debug!("Seeded memory source with {} articles", articles.len());
        Ok(Self::with_articles(articles))
    }

    pub async fn store_article(&self, article: Article) {
        self.store.write().await.store_article(article);
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.articles.len()
    }

    pub async fn uploads(&self) -> Vec<StoredUpload> {
        self.store.read().await.uploads.clone()
    }
}

#[async_trait]
impl SourceBackend for InMemorySource {
    async fn new() -> Result<Self>
    where
        Self: Sized,
    {
        Ok(Self::with_articles(Vec::new()))
    }

    /// Nothing to point at; the store lives in-process.
    fn get_config(&mut self) -> Option<&mut BackendConfig> {
        None
    }
}

#[async_trait]
impl ArticleSource for InMemorySource {
    async fn filtered(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.filtered(query))
    }

    async fn trending(&self, publication: &str) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.trending(publication))
    }

    async fn upload_file(&self, request: &UploadRequest) -> Result<UploadReceipt> {
        let mut store = self.store.write().await;
        store.upload(request)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
