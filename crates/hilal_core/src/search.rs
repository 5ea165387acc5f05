use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Article;

lazy_static! {
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]+>").expect("valid markup pattern");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Replaces tag-like substrings with a space and collapses whitespace.
pub fn strip_markup(text: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(text, " ");
    WHITESPACE_RUN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

/// True when title, markup-free description or author name contains the
/// already lower-cased `needle`.
pub fn matches_query(article: &Article, needle: &str) -> bool {
    field_contains(article.title.as_deref(), needle)
        || article
            .description
            .as_deref()
            .is_some_and(|description| strip_markup(description).to_lowercase().contains(needle))
        || field_contains(article.author_name.as_deref(), needle)
}

/// Case-insensitive substring search over title, description and author.
///
/// A blank query means "nothing searched yet" and returns no results rather
/// than every article.
pub fn search<'a>(articles: &'a [Article], raw_query: &str) -> Vec<&'a Article> {
    let needle = raw_query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    articles
        .iter()
        .filter(|article| matches_query(article, &needle))
        .collect()
}

/// One page of a result list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'r, T> {
    pub items: &'r [T],
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    /// Index of the first item of this page within the full result list.
    pub start: usize,
    /// One past the last item of this page.
    pub end: usize,
}

impl<'r, T> Page<'r, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return format!("No results on page {} of {}", self.page, self.total_pages);
        }
        format!(
            "Showing {}-{} of {} results",
            self.start + 1,
            self.end,
            self.total
        )
    }
}

/// Slices `results` into the 1-based `page` of `page_size` items.
///
/// Pages below 1 are read as page 1; pages past the end are empty.
pub fn paginate<T>(results: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page = page.max(1);
    let total = results.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    };

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = page.saturating_mul(page_size).min(total);

    Page {
        items: &results[start..end],
        page,
        page_size,
        total,
        total_pages,
        start,
        end,
    }
}

/// An entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Gap,
}

/// Page numbers to offer around `current`: first, last and current ±1,
/// with a gap marker two pages away from the current one.
pub fn page_links(current: usize, total_pages: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    for page in 1..=total_pages {
        let near_current = page.saturating_add(1) >= current && page <= current.saturating_add(1);
        if page == 1 || page == total_pages || near_current {
            links.push(PageLink::Number(page));
        } else if page.saturating_add(2) == current || page == current.saturating_add(2) {
            links.push(PageLink::Gap);
        }
    }
    links
}

/// Query text and page position of a search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    current_page: usize,
    page_size: usize,
}

impl SearchState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            current_page: 1,
            page_size,
        }
    }

    /// Stores a new raw query. Returns whether the trimmed query changed, in
    /// which case the page goes back to 1.
    pub fn set_query(&mut self, raw: &str) -> bool {
        let changed = raw.trim() != self.query.trim();
        self.query = raw.to_string();
        if changed {
            self.current_page = 1;
        }
        changed
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    pub fn normalized_query(&self) -> String {
        self.trimmed_query().to_lowercase()
    }

    /// What to echo back to the reader in "results for ..." headings.
    pub fn display_query(&self) -> &str {
        match self.trimmed_query() {
            "" => &self.query,
            trimmed => trimmed,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn paginate<'r, T>(&self, results: &'r [T]) -> Page<'r, T> {
        paginate(results, self.current_page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleId;

    fn ids(articles: &[&Article]) -> Vec<ArticleId> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>about <b>Jones</b></p>"), "about Jones");
        assert_eq!(strip_markup("<p>one</p><p>two</p>"), "one two");
        assert_eq!(strip_markup("  plain\n\ttext  "), "plain text");
        assert_eq!(strip_markup("a < b"), "a < b");
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let articles = vec![Article::new(1, "Anything")];
        assert!(search(&articles, "").is_empty());
        assert!(search(&articles, "   ").is_empty());
    }

    #[test]
    fn test_search_matches_title_description_and_author() {
        let mut untitled = Article::new(3, "ignored").with_author("Sara JONESBERG");
        untitled.title = None;
        let articles = vec![
            Article::new(1, "Jones Wins"),
            Article::new(2, "Other").with_description("<p>about Jones</p>"),
            untitled,
            Article::new(4, "Nothing here").with_description("<jones>hidden in a tag</jones>"),
        ];

        let results = search(&articles, "  jones ");

        assert_eq!(ids(&results), vec![ArticleId::from(1), ArticleId::from(2), ArticleId::from(3)]);
    }

    #[test]
    fn test_missing_fields_never_match() {
        let mut bare = Article::new(1, "");
        bare.title = None;
        let articles = vec![bare];
        assert!(search(&articles, "a").is_empty());
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let results: Vec<usize> = (0..23).collect();
        let page = paginate(&results, 3, 10);

        assert_eq!(page.items, &results[20..23]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.summary(), "Showing 21-23 of 23 results");
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_clamps_out_of_range_pages() {
        let results: Vec<usize> = (0..5).collect();

        let beyond = paginate(&results, 4, 10);
        assert!(beyond.is_empty());
        assert_eq!(beyond.total_pages, 1);

        let zero = paginate(&results, 0, 2);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items, &[0, 1]);

        let empty: Vec<usize> = Vec::new();
        let page = paginate(&empty, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());

        let no_size = paginate(&results, 1, 0);
        assert_eq!(no_size.total_pages, 0);
        assert!(no_size.is_empty());
    }

    #[test]
    fn test_page_links_with_gaps() {
        use PageLink::*;

        assert_eq!(page_links(1, 1), vec![Number(1)]);
        assert_eq!(
            page_links(5, 10),
            vec![Number(1), Gap, Number(4), Number(5), Number(6), Gap, Number(10)]
        );
        assert_eq!(
            page_links(1, 5),
            vec![Number(1), Number(2), Gap, Number(5)]
        );
        assert_eq!(page_links(3, 4), vec![Number(1), Number(2), Number(3), Number(4)]);
        assert!(page_links(1, 0).is_empty());
    }

    #[test]
    fn test_page_links_far_past_the_end() {
        use PageLink::*;

        assert_eq!(page_links(usize::MAX, 3), vec![Number(1), Number(3)]);
        assert_eq!(page_links(usize::MAX, 1), vec![Number(1)]);
    }

    #[test]
    fn test_changing_query_resets_page() {
        let mut state = SearchState::new(10);
        assert!(state.set_query("a"));
        state.set_page(3);
        assert_eq!(state.current_page(), 3);

        assert!(state.set_query("ab"));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_whitespace_only_change_keeps_page() {
        let mut state = SearchState::new(10);
        state.set_query("Jones");
        state.set_page(2);

        assert!(!state.set_query("Jones  "));
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.normalized_query(), "jones");
        assert_eq!(state.display_query(), "Jones");
    }
}
