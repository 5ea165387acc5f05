use async_trait::async_trait;
use hilal_core::{
    Article, ArticleId, ArticleQuery, ArticleSource, Error, Result, UploadReceipt, UploadRequest,
};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn dated(id: i64, publication: &str, category: &str, date: &str) -> Article {
    Article::new(id, format!("Article {}", id))
        .with_publication(publication)
        .with_category(category)
        .with_publish_date(date)
}

pub fn expected_ids(ids: &[Option<i64>]) -> Vec<Option<ArticleId>> {
    ids.iter().map(|id| id.map(ArticleId::from)).collect()
}

/// Canned source: each endpoint answers its fixed list, or fails when unset.
/// Ignores query parameters.
#[derive(Default)]
pub struct StubSource {
    trending: Option<Vec<Article>>,
    filtered: Option<Vec<Article>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_trending(mut self, articles: Vec<Article>) -> Self {
        self.trending = Some(articles);
        self
    }

    pub fn with_filtered(mut self, articles: Vec<Article>) -> Self {
        self.filtered = Some(articles);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, list: &Option<Vec<Article>>) -> Result<Vec<Article>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        list.clone()
            .ok_or_else(|| Error::Source("stub source offline".to_string()))
    }
}

#[async_trait]
impl ArticleSource for StubSource {
    async fn filtered(&self, _query: &ArticleQuery) -> Result<Vec<Article>> {
        self.answer(&self.filtered)
    }

    async fn trending(&self, _publication: &str) -> Result<Vec<Article>> {
        self.answer(&self.trending)
    }

    async fn upload_file(&self, _request: &UploadRequest) -> Result<UploadReceipt> {
        Err(Error::Upload("stub source offline".to_string()))
    }

    fn name(&self) -> &str {
        "stub"
    }
}
