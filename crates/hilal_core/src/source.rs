use async_trait::async_trait;

use crate::media::{UploadReceipt, UploadRequest};
use crate::types::Article;
use crate::window::DateWindow;
use crate::Result;

/// Parameters of the `articles/filtered/` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub search: Option<String>,
    pub publication: Option<String>,
    pub category: Option<String>,
    pub window: Option<DateWindow>,
    pub count: Option<usize>,
}

impl ArticleQuery {
    pub fn search(query: &str, count: usize) -> Self {
        Self {
            search: Some(query.to_string()),
            count: Some(count),
            ..Self::default()
        }
    }

    pub fn publication(publication: &str, window: DateWindow) -> Self {
        Self {
            publication: Some(publication.to_string()),
            window: Some(window),
            ..Self::default()
        }
    }

    pub fn category(publication: &str, category: &str, window: DateWindow) -> Self {
        Self {
            publication: Some(publication.to_string()),
            category: Some(category.to_string()),
            window: Some(window),
            ..Self::default()
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Query-string pairs in the order the API documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(publication) = &self.publication {
            pairs.push(("publication", publication.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(window) = &self.window {
            pairs.push(("month", window.month().to_string()));
            pairs.push(("year", window.year().to_string()));
        }
        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        pairs
    }
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Articles matching the filtered-list parameters.
    async fn filtered(&self, query: &ArticleQuery) -> Result<Vec<Article>>;

    /// Trending feed of a publication, identified by its slug.
    async fn trending(&self, publication: &str) -> Result<Vec<Article>>;

    /// Stores a media file for an entity.
    async fn upload_file(&self, request: &UploadRequest) -> Result<UploadReceipt>;

    /// Short backend name for logs.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let window = DateWindow::new(4, 2025).unwrap();
        let query = ArticleQuery::category("hilal-urdu", "our-martyrs-and-heroes", window).with_count(6);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("publication", "hilal-urdu".to_string()),
                ("category", "our-martyrs-and-heroes".to_string()),
                ("month", "4".to_string()),
                ("year", "2025".to_string()),
                ("count", "6".to_string()),
            ]
        );

        assert_eq!(
            ArticleQuery::search("jones", 500).to_pairs(),
            vec![("search", "jones".to_string()), ("count", "500".to_string())]
        );
    }
}
