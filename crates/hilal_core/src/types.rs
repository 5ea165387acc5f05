use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::window::parse_publish_date;

/// Article identifier as the API sends it: usually an integer, sometimes a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Int(id) => write!(f, "{}", id),
            ArticleId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(id: i64) -> Self {
        ArticleId::Int(id)
    }
}

impl From<i32> for ArticleId {
    fn from(id: i32) -> Self {
        ArticleId::Int(i64::from(id))
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        ArticleId::Text(id.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(id: String) -> Self {
        ArticleId::Text(id)
    }
}

/// An article record as returned by the articles API.
///
/// Everything except `id` is optional on the wire. `publish_date` is kept as
/// the raw string so a malformed value never fails deserialization; use
/// [`Article::published_on`] to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_image: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_display_name: Option<String>,
    #[serde(default)]
    pub publication: Option<i64>,
    #[serde(default)]
    pub publication_name: Option<String>,
    #[serde(default)]
    pub publication_display_name: Option<String>,
    #[serde(default)]
    pub visits: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

impl Article {
    pub fn new(id: impl Into<ArticleId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            description: None,
            author_name: None,
            author_image: None,
            publish_date: None,
            cover_image: None,
            category: None,
            category_name: None,
            category_display_name: None,
            publication: None,
            publication_name: None,
            publication_display_name: None,
            visits: None,
            status: None,
            section: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = Some(author_name.into());
        self
    }

    pub fn with_publish_date(mut self, publish_date: impl Into<String>) -> Self {
        self.publish_date = Some(publish_date.into());
        self
    }

    pub fn with_publication(mut self, publication_name: impl Into<String>) -> Self {
        self.publication_name = Some(publication_name.into());
        self
    }

    pub fn with_category(mut self, category_name: impl Into<String>) -> Self {
        self.category_name = Some(category_name.into());
        self
    }

    pub fn with_visits(mut self, visits: u64) -> Self {
        self.visits = Some(visits);
        self
    }

    /// Calendar date of publication, or `None` when missing or unparseable.
    pub fn published_on(&self) -> Option<NaiveDate> {
        self.publish_date.as_deref().and_then(parse_publish_date)
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

/// The `{ "data": [...] }` envelope every article endpoint responds with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleEnvelope {
    #[serde(default)]
    pub data: Option<Vec<Article>>,
}

impl ArticleEnvelope {
    pub fn into_articles(self) -> Vec<Article> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: i64,
    /// URL slug, e.g. `hilal-english`.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Id of the owning publication.
    #[serde(default)]
    pub publication: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserializes_mixed_ids_and_missing_fields() {
        let json = r#"{"data": [
            {"id": 7, "title": "Numbered", "publish_date": "2025-04-02"},
            {"id": "slug-id", "description": null}
        ]}"#;
        let articles = serde_json::from_str::<ArticleEnvelope>(json).unwrap().into_articles();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, ArticleId::Int(7));
        assert_eq!(articles[1].id, ArticleId::Text("slug-id".to_string()));
        assert!(articles[1].title.is_none());
        assert!(articles[1].description.is_none());
    }

    #[test]
    fn test_envelope_without_data_is_empty() {
        let envelope: ArticleEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.into_articles().is_empty());

        let envelope: ArticleEnvelope = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(envelope.into_articles().is_empty());
    }

    #[test]
    fn test_published_on_ignores_garbage() {
        let article = Article::new(1, "Dated").with_publish_date("not a date");
        assert!(article.published_on().is_none());

        let article = Article::new(2, "Dated").with_publish_date("2025-04-30T23:10:00Z");
        assert_eq!(article.published_on(), NaiveDate::from_ymd_opt(2025, 4, 30));
    }
}
