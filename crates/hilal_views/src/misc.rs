use hilal_core::{Article, ArticleQuery, ArticleSource, ContentConfig};
use serde::Serialize;

use crate::language::Language;
use crate::logging::Logger;

pub const MISC_CATEGORY: &str = "misc";
const SECONDARY_COUNT: usize = 3;

/// The misc section: one large card followed by up to three small ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiscView {
    pub title: String,
    pub period: String,
    pub language: Language,
    pub featured: Option<Article>,
    pub secondary: Vec<Article>,
    pub empty_message: Option<String>,
    pub error: Option<String>,
}

impl MiscView {
    pub async fn load(
        source: &dyn ArticleSource,
        publication: &str,
        language: Language,
        config: &ContentConfig,
    ) -> Self {
        let logger = Logger::new().with_prefix("[misc]").with_prefix(format!("[{}]", publication));
        let mut view = Self {
            title: misc_title(language).to_string(),
            period: language.period_label(&config.window),
            language,
            featured: None,
            secondary: Vec::new(),
            empty_message: None,
            error: None,
        };

        let query = ArticleQuery::category(publication, MISC_CATEGORY, config.window);
        let articles = match source.filtered(&query).await {
            Ok(articles) => articles,
            Err(e) => {
                logger.error(&format!("Failed to load misc articles: {}", e));
                view.error = Some(Language::English.load_failed().to_string());
                return view;
            }
        };

        let mut filtered = config.window.filter(&articles).into_iter();
        view.featured = filtered.next().cloned();
        view.secondary = filtered.take(SECONDARY_COUNT).cloned().collect();
        if view.featured.is_none() {
            view.empty_message = Some(language.no_articles().to_string());
        }
        view
    }
}

fn misc_title(language: Language) -> &'static str {
    match language {
        Language::English => "MISC",
        Language::Urdu => "متنوع",
    }
}
