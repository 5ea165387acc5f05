//! The trending section shown at the top of each publication page.
//!
//! `hilal-her` has no trending feed, so its section is built from the
//! publication's own articles. The two mixed publications lay their feed out
//! as a category grid, and `hilal-urdu` tops up empty grid cells from its
//! martyrs-and-heroes category.

use futures::join;
use hilal_core::{
    arrange_slots, normalize_publication_name, Article, ArticleQuery, ArticleSource,
    ContentConfig, Result, SlotLayout,
};
use serde::Serialize;

use crate::language::Language;
use crate::logging::Logger;

pub const HILAL_ENGLISH: &str = "hilal-english";
pub const HILAL_URDU: &str = "hilal-urdu";
pub const HILAL_HER: &str = "hilal-her";
pub const HILAL_URDU_FALLBACK_CATEGORY: &str = "our-martyrs-and-heroes";

const MIXED_PUBLICATIONS: [&str; 2] = [HILAL_ENGLISH, HILAL_URDU];
const LIST_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendingLayout {
    /// Fixed category grid; `slots` is row-major, `columns` cells per row.
    Grid {
        columns: usize,
        slots: Vec<Option<Article>>,
    },
    List { articles: Vec<Article> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingView {
    pub publication: String,
    pub title: String,
    pub period: String,
    pub language: Language,
    pub layout: TrendingLayout,
    pub error: Option<String>,
}

impl TrendingView {
    pub async fn load(
        source: &dyn ArticleSource,
        publication_name: &str,
        language: Language,
        config: &ContentConfig,
    ) -> Self {
        let raw_name = publication_name.trim();
        let slug = normalize_publication_name(raw_name);
        let logger = Logger::new().with_prefix("[trending]").with_prefix(format!("[{}]", slug));

        let (primary, fallback) = join!(
            fetch_primary(source, &slug, config),
            fetch_fallback(source, &slug, config, &logger)
        );

        let mut view = Self {
            publication: slug.clone(),
            title: trending_title(raw_name, &slug),
            period: language.period_label(&config.window),
            language,
            layout: TrendingLayout::List { articles: Vec::new() },
            error: None,
        };

        let articles = match primary {
            Ok(articles) => articles,
            Err(e) => {
                logger.error(&format!("Failed to load trending articles: {}", e));
                view.error = Some(Language::English.load_failed().to_string());
                return view;
            }
        };

        let filtered = config.window.filter(&articles);
        logger.debug(&format!(
            "{} of {} articles fall in {}",
            filtered.len(),
            articles.len(),
            config.window
        ));

        view.layout = if MIXED_PUBLICATIONS.contains(&slug.as_str()) {
            let layout = SlotLayout::trending_mixed();
            let mut cells = layout.assign(&filtered);
            if slug == HILAL_URDU {
                cells = arrange_slots(&cells, Some(fallback.as_slice()), filtered.iter().copied());
            }
            TrendingLayout::Grid {
                columns: layout.columns(),
                slots: cells.into_iter().map(|cell| cell.cloned()).collect(),
            }
        } else {
            TrendingLayout::List {
                articles: filtered.into_iter().take(LIST_LIMIT).cloned().collect(),
            }
        };
        view
    }

    pub fn is_empty(&self) -> bool {
        match &self.layout {
            TrendingLayout::Grid { slots, .. } => slots.iter().all(Option::is_none),
            TrendingLayout::List { articles } => articles.is_empty(),
        }
    }
}

async fn fetch_primary(
    source: &dyn ArticleSource,
    slug: &str,
    config: &ContentConfig,
) -> Result<Vec<Article>> {
    match slug {
        "" => Ok(Vec::new()),
        HILAL_HER => source.filtered(&ArticleQuery::publication(slug, config.window)).await,
        _ => source.trending(slug).await,
    }
}

/// Fallback pool for `hilal-urdu`; empty for every other publication. A
/// failed fetch only costs the back-fill, so it is logged and swallowed.
async fn fetch_fallback(
    source: &dyn ArticleSource,
    slug: &str,
    config: &ContentConfig,
    logger: &Logger,
) -> Vec<Article> {
    if slug != HILAL_URDU {
        return Vec::new();
    }

    let query = ArticleQuery::category(slug, HILAL_URDU_FALLBACK_CATEGORY, config.window)
        .with_count(config.fallback_slot_count);
    match source.filtered(&query).await {
        Ok(articles) => articles,
        Err(e) => {
            logger.warn(&format!("Fallback category unavailable: {}", e));
            Vec::new()
        }
    }
}

pub fn trending_title(raw_name: &str, slug: &str) -> String {
    match slug {
        HILAL_ENGLISH => "TRENDING".to_string(),
        HILAL_URDU => "ہلال اردو".to_string(),
        "hilal-urdu-kids" => "ہلال بچوں کے لیے اردو".to_string(),
        "hilal-digital" => "ہلال دیجیٹل".to_string(),
        _ if !raw_name.is_empty() => raw_name.to_uppercase(),
        _ => slug.to_uppercase(),
    }
}
