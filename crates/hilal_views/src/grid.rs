use hilal_core::{Article, ArticleQuery, ArticleSource, ContentConfig};
use serde::Serialize;

use crate::language::Language;
use crate::logging::Logger;

/// Articles already shown by the trending section of kids and hilal-her pages.
const TRENDING_OVERLAP: usize = 6;

/// Every article of a publication in the target month, as a card grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllArticlesGridView {
    pub publication: String,
    pub language: Language,
    pub skipped: usize,
    pub articles: Vec<Article>,
    pub empty_message: Option<String>,
    pub error: Option<String>,
}

impl AllArticlesGridView {
    pub async fn load(
        source: &dyn ArticleSource,
        publication_name: &str,
        language: Language,
        config: &ContentConfig,
    ) -> Self {
        let logger = Logger::new().with_prefix("[grid]").with_prefix(format!("[{}]", publication_name));
        let skip = skip_count(publication_name);
        let mut view = Self {
            publication: publication_name.to_string(),
            language,
            skipped: skip,
            articles: Vec::new(),
            empty_message: None,
            error: None,
        };

        let query = ArticleQuery::publication(publication_name, config.window);
        let articles = match source.filtered(&query).await {
            Ok(articles) => articles,
            Err(e) => {
                logger.error(&format!("Failed to load publication articles: {}", e));
                view.error = Some(language.load_failed().to_string());
                return view;
            }
        };

        view.articles = config
            .window
            .filter(&articles)
            .into_iter()
            .skip(skip)
            .cloned()
            .collect();

        if view.articles.is_empty() {
            let message = match (skip > 0, language) {
                (true, _) => language.no_additional_articles(),
                (false, Language::English) => language.no_articles(),
                // Urdu grids use the singular wording.
                (false, Language::Urdu) => language.empty_slot(),
            };
            view.empty_message = Some(message.to_string());
        }
        view
    }
}

pub fn skip_count(publication_name: &str) -> usize {
    let name = publication_name.to_lowercase();
    if name.contains("kids") || name.contains("hilal-her") {
        TRENDING_OVERLAP
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dated, StubSource};
    use hilal_core::ArticleId;
    use hilal_sources::InMemorySource;

    fn publication(name: &str, count: i64) -> InMemorySource {
        InMemorySource::with_articles(
            (1..=count)
                .map(|id| dated(id, name, "stories", "2025-04-12"))
                .collect(),
        )
    }

    #[test]
    fn test_skip_count() {
        assert_eq!(skip_count("hilal-kids-english"), 6);
        assert_eq!(skip_count("Hilal-Urdu-KIDS"), 6);
        assert_eq!(skip_count("hilal-her"), 6);
        assert_eq!(skip_count("hilal-english"), 0);
    }

    #[tokio::test]
    async fn test_kids_grid_skips_trending_overlap() {
        let source = publication("hilal-kids-english", 8);
        let view = AllArticlesGridView::load(
            &source,
            "hilal-kids-english",
            Language::English,
            &ContentConfig::default(),
        )
        .await;

        let ids: Vec<_> = view.articles.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec![ArticleId::from(7), ArticleId::from(8)]);
        assert!(view.empty_message.is_none());
    }

    #[tokio::test]
    async fn test_empty_messages_depend_on_skip() {
        let config = ContentConfig::default();

        let view = AllArticlesGridView::load(&publication("hilal-her", 4), "hilal-her", Language::English, &config)
            .await;
        assert_eq!(view.empty_message.as_deref(), Some("No additional articles"));

        let view = AllArticlesGridView::load(&publication("hilal-urdu", 0), "hilal-urdu", Language::Urdu, &config)
            .await;
        assert_eq!(view.empty_message.as_deref(), Some("کوئی مضمون دستیاب نہیں"));

        let view = AllArticlesGridView::load(&publication("hilal-english", 0), "hilal-english", Language::English, &config)
            .await;
        assert_eq!(view.empty_message.as_deref(), Some("No articles available"));
    }

    #[tokio::test]
    async fn test_regular_publication_keeps_everything() {
        let view = AllArticlesGridView::load(
            &publication("hilal-english", 3),
            "hilal-english",
            Language::English,
            &ContentConfig::default(),
        )
        .await;
        assert_eq!(view.articles.len(), 3);
    }

    #[tokio::test]
    async fn test_error_message_is_localized() {
        let view = AllArticlesGridView::load(
            &StubSource::failing(),
            "hilal-urdu",
            Language::Urdu,
            &ContentConfig::default(),
        )
        .await;
        assert_eq!(view.error.as_deref(), Some("مضامین لوڈ کرنے میں مسئلہ پیش آیا"));
    }
}
