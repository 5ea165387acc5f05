//! Search screen state: query, candidate fetch and pagination.
//!
//! Every fetch carries the generation it was started in. When the reader
//! changes the query while a fetch is in flight, the older response arrives
//! with an outdated generation and is dropped instead of overwriting the
//! newer results.

use hilal_core::search::{page_links, search, PageLink};
use hilal_core::{Article, ArticleQuery, ArticleSource, ContentConfig, Page, Result, SearchState};
use tracing::{debug, error, info};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch articles.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A pending candidate fetch for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: String,
    count: usize,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn fetch(&self, source: &dyn ArticleSource) -> Result<Vec<Article>> {
        source
            .filtered(&ArticleQuery::search(&self.query, self.count))
            .await
    }
}

#[derive(Debug)]
pub struct SearchSession {
    state: SearchState,
    results: Vec<Article>,
    status: SearchStatus,
    generation: u64,
    candidate_count: usize,
}

impl SearchSession {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            state: SearchState::new(config.page_size),
            results: Vec::new(),
            status: SearchStatus::Idle,
            generation: 0,
            candidate_count: config.search_candidate_count,
        }
    }

    /// Records a new raw query. Returns a ticket when a fetch is needed,
    /// that is when the trimmed query changed and is not blank.
    pub fn begin(&mut self, raw_query: &str) -> Option<FetchTicket> {
        if !self.state.set_query(raw_query) {
            return None;
        }
        self.generation += 1;

        let query = self.state.trimmed_query().to_string();
        if query.is_empty() {
            self.results.clear();
            self.status = SearchStatus::Idle;
            return None;
        }

        self.status = SearchStatus::Loading;
        Some(FetchTicket {
            generation: self.generation,
            query,
            count: self.candidate_count,
        })
    }

    /// Applies a fetch result. Returns `false` and leaves the session
    /// untouched when `ticket` belongs to an outdated query.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<Article>>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale results for {:?} (generation {} < {})",
                ticket.query, ticket.generation, self.generation
            );
            return false;
        }

        match result {
            Ok(candidates) => {
                self.results = search(&candidates, &ticket.query).into_iter().cloned().collect();
                info!(
                    "🔎 {} of {} candidates match {:?}",
                    self.results.len(),
                    candidates.len(),
                    ticket.query
                );
                self.status = SearchStatus::Ready;
            }
            Err(e) => {
                error!("Search for {:?} failed: {}", ticket.query, e);
                self.results.clear();
                self.status = SearchStatus::Failed(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Runs `begin`, the fetch and `complete` in one go. Returns whether a
    /// fetch happened.
    pub async fn submit(&mut self, source: &dyn ArticleSource, raw_query: &str) -> bool {
        match self.begin(raw_query) {
            Some(ticket) => {
                let result = ticket.fetch(source).await;
                self.complete(ticket, result)
            }
            None => false,
        }
    }

    pub fn query(&self) -> &SearchState {
        &self.state
    }

    /// Every candidate matching the current query, in fetch order.
    pub fn results(&self) -> &[Article] {
        &self.results
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    pub fn page(&self) -> Page<'_, Article> {
        self.state.paginate(&self.results)
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        page_links(self.current_page(), self.page().total_pages)
    }

    /// Moves to `page`, kept within the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        let last = self.page().total_pages.max(1);
        self.state.set_page(page.clamp(1, last));
    }
}
