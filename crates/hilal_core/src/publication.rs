//! Publication and category resolution for site paths.
//!
//! Nothing here reads shared state: callers load a [`PublicationDirectory`]
//! once and pass it, together with the publication the reader is currently
//! browsing, into every helper.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

use crate::types::{Category, Publication};
use crate::window::DateWindow;

pub const DEFAULT_PUBLICATION: &str = "hilal-english";
const ARTICLES_PATH: &str = "/articles";

/// Lower-cases a publication name and turns whitespace runs into dashes,
/// e.g. `"Hilal English"` becomes `hilal-english`.
pub fn normalize_publication_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Category ids that have articles in one month for one publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCategories {
    pub year: i32,
    pub month: u32,
    pub publication: String,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationDirectory {
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub month_categories: Vec<MonthCategories>,
}

impl PublicationDirectory {
    pub fn new(publications: Vec<Publication>, categories: Vec<Category>) -> Self {
        Self {
            publications,
            categories,
            month_categories: Vec::new(),
        }
    }

    pub fn with_month_categories(
        mut self,
        window: DateWindow,
        publication: impl Into<String>,
        category_ids: Vec<i64>,
    ) -> Self {
        self.month_categories.push(MonthCategories {
            year: window.year(),
            month: window.month(),
            publication: publication.into(),
            category_ids,
        });
        self
    }

    pub fn find(&self, name: &str) -> Option<&Publication> {
        self.publications.iter().find(|publication| publication.name == name)
    }

    fn is_publication_path(&self, pathname: &str) -> bool {
        pathname == "/"
            || self
                .publications
                .iter()
                .any(|publication| pathname.strip_prefix('/') == Some(publication.name.as_str()))
    }

    fn categories_in_window(&self, window: DateWindow, publication: &str) -> &[i64] {
        self.month_categories
            .iter()
            .find(|entry| {
                entry.year == window.year()
                    && entry.month == window.month()
                    && entry.publication == publication
            })
            .map(|entry| entry.category_ids.as_slice())
            .unwrap_or_default()
    }
}

fn path_publication_name(pathname: &str) -> &str {
    if pathname == "/" {
        DEFAULT_PUBLICATION
    } else {
        pathname.strip_prefix('/').unwrap_or(pathname)
    }
}

/// Publication slug named by `pathname`, or the default publication.
pub fn publication_from_path(directory: &PublicationDirectory, pathname: &str) -> String {
    directory
        .find(path_publication_name(pathname))
        .map(|publication| publication.name.clone())
        .unwrap_or_else(|| DEFAULT_PUBLICATION.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMenu<'d> {
    pub label: &'static str,
    pub categories: Vec<CategoryEntry>,
    /// Publication named by a publication page path. Callers keep it as the
    /// current publication for pages that do not name one.
    pub visited: Option<&'d Publication>,
}

impl<'d> CategoryMenu<'d> {
    fn empty() -> Self {
        Self {
            label: "Category",
            categories: Vec::new(),
            visited: None,
        }
    }
}

/// Categories to offer in the navigation menu for `pathname`.
///
/// Publication pages (`/`, `/<publication>`) pick the publication from the
/// path. On `/articles` a known `publication` parameter takes precedence over
/// `current`, so the menu follows the listing on screen instead of the last
/// publication visited; an unknown or missing parameter is ignored. Every
/// other page falls back to `current`, then to the default publication. When
/// the directory knows which categories have articles in `window`, the menu
/// is narrowed to those.
pub fn categories_for_path<'d>(
    directory: &'d PublicationDirectory,
    pathname: &str,
    publication_param: Option<&str>,
    current: Option<&Publication>,
    window: DateWindow,
) -> CategoryMenu<'d> {
    if directory.categories.is_empty() || directory.publications.is_empty() {
        debug!("Categories or publications not loaded yet");
        return CategoryMenu::empty();
    }

    let from_param = if pathname == ARTICLES_PATH {
        publication_param.and_then(|name| directory.find(name))
    } else {
        None
    };

    let (publication_id, target_name, visited) = if let Some(publication) = from_param {
        (Some(publication.id), publication.name.clone(), Some(publication))
    } else if directory.is_publication_path(pathname) {
        let path_name = path_publication_name(pathname);
        let publication = directory.find(path_name);
        (
            publication.map(|p| p.id),
            publication
                .map(|p| p.name.clone())
                .unwrap_or_else(|| path_name.to_string()),
            publication,
        )
    } else if let Some(current) = current {
        (Some(current.id), current.name.clone(), None)
    } else {
        let fallback = directory.find(DEFAULT_PUBLICATION);
        (
            fallback.map(|p| p.id),
            DEFAULT_PUBLICATION.to_string(),
            None,
        )
    };

    let allowed = directory.categories_in_window(window, &target_name);

    let categories = directory
        .categories
        .iter()
        .filter(|category| category.publication == publication_id)
        .filter(|category| allowed.is_empty() || allowed.contains(&category.id))
        .map(|category| CategoryEntry {
            id: category.id,
            name: category.name.clone(),
            display_name: category.display_name.clone(),
        })
        .collect();

    CategoryMenu {
        label: "Category",
        categories,
        visited,
    }
}

/// Link to the article listing of one category, scoped to the publication
/// the reader is on. With a `window`, the month and year are appended.
pub fn category_url(
    directory: &PublicationDirectory,
    category_id: i64,
    current_path: &str,
    publication_param: Option<&str>,
    current: Option<&Publication>,
    window: Option<DateWindow>,
) -> String {
    let mut publication = publication_from_path(directory, current_path);

    if current_path == ARTICLES_PATH {
        if let Some(found) = publication_param.and_then(|name| directory.find(name)) {
            publication = found.name.clone();
        }
    }

    let on_publication_page =
        current_path == ARTICLES_PATH || directory.is_publication_path(current_path);

    let display_name = if on_publication_page {
        directory
            .find(&publication)
            .map(|p| p.name.as_str())
            .unwrap_or(DEFAULT_PUBLICATION)
    } else {
        current
            .map(|p| p.name.as_str())
            .unwrap_or(DEFAULT_PUBLICATION)
    };

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("category", &category_id.to_string())
        .append_pair("publication", display_name);
    if let Some(window) = window {
        query
            .append_pair("month", &window.month().to_string())
            .append_pair("year", &window.year().to_string());
    }

    format!("{}?{}", ARTICLES_PATH, query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(id: i64, name: &str) -> Publication {
        Publication {
            id,
            name: name.to_string(),
            display_name: None,
        }
    }

    fn category(id: i64, name: &str, publication: i64) -> Category {
        Category {
            id,
            name: name.to_string(),
            display_name: Some(name.to_uppercase()),
            publication: Some(publication),
        }
    }

    fn directory() -> PublicationDirectory {
        PublicationDirectory::new(
            vec![
                publication(1, "hilal-english"),
                publication(2, "hilal-urdu"),
                publication(3, "hilal-her"),
            ],
            vec![
                category(10, "in-focus", 1),
                category(11, "misc", 1),
                category(20, "our-martyrs-and-heroes", 2),
                category(21, "misc", 2),
                category(30, "lifestyle", 3),
            ],
        )
    }

    fn april() -> DateWindow {
        DateWindow::new(4, 2025).unwrap()
    }

    fn names(menu: &CategoryMenu<'_>) -> Vec<String> {
        menu.categories.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_normalize_publication_name() {
        assert_eq!(normalize_publication_name("Hilal English"), "hilal-english");
        assert_eq!(normalize_publication_name("  Hilal   Urdu Kids "), "hilal-urdu-kids");
        assert_eq!(normalize_publication_name(""), "");
    }

    #[test]
    fn test_publication_from_path() {
        let dir = directory();
        assert_eq!(publication_from_path(&dir, "/"), "hilal-english");
        assert_eq!(publication_from_path(&dir, "/hilal-urdu"), "hilal-urdu");
        assert_eq!(publication_from_path(&dir, "/ebooks"), "hilal-english");
    }

    #[test]
    fn test_menu_is_empty_until_directory_is_loaded() {
        let dir = PublicationDirectory::default();
        let menu = categories_for_path(&dir, "/", None, None, april());
        assert_eq!(menu.label, "Category");
        assert!(menu.categories.is_empty());
        assert!(menu.visited.is_none());
    }

    #[test]
    fn test_menu_on_publication_page() {
        let dir = directory();
        let menu = categories_for_path(&dir, "/hilal-urdu", None, None, april());

        assert_eq!(names(&menu), vec!["our-martyrs-and-heroes", "misc"]);
        assert_eq!(menu.visited.map(|p| p.id), Some(2));
        assert_eq!(menu.categories[0].display_name.as_deref(), Some("OUR-MARTYRS-AND-HEROES"));
    }

    #[test]
    fn test_menu_on_other_pages_uses_current_then_default() {
        let dir = directory();
        let current = publication(3, "hilal-her");

        let menu = categories_for_path(&dir, "/ebooks", None, Some(&current), april());
        assert_eq!(names(&menu), vec!["lifestyle"]);
        assert!(menu.visited.is_none());

        let menu = categories_for_path(&dir, "/ebooks", None, None, april());
        assert_eq!(names(&menu), vec!["in-focus", "misc"]);
    }

    #[test]
    fn test_menu_on_articles_page_follows_publication_param() {
        let dir = directory();
        let menu = categories_for_path(&dir, "/articles", Some("hilal-her"), None, april());
        assert_eq!(names(&menu), vec!["lifestyle"]);
        assert_eq!(menu.visited.map(|p| p.id), Some(3));

        let current = publication(2, "hilal-urdu");
        let menu = categories_for_path(&dir, "/articles", Some("hilal-her"), Some(&current), april());
        assert_eq!(names(&menu), vec!["lifestyle"]);

        let menu = categories_for_path(&dir, "/articles", Some("nowhere"), Some(&current), april());
        assert_eq!(names(&menu), vec!["our-martyrs-and-heroes", "misc"]);
        assert!(menu.visited.is_none());
    }

    #[test]
    fn test_menu_narrowed_to_month_categories() {
        let dir = directory().with_month_categories(april(), "hilal-english", vec![11]);

        let menu = categories_for_path(&dir, "/", None, None, april());
        assert_eq!(names(&menu), vec!["misc"]);

        let may = DateWindow::new(5, 2025).unwrap();
        let menu = categories_for_path(&dir, "/", None, None, may);
        assert_eq!(names(&menu), vec!["in-focus", "misc"]);
    }

    #[test]
    fn test_category_url() {
        let dir = directory();
        let current = publication(2, "hilal-urdu");

        assert_eq!(
            category_url(&dir, 10, "/", None, None, None),
            "/articles?category=10&publication=hilal-english"
        );
        assert_eq!(
            category_url(&dir, 20, "/hilal-urdu", None, None, Some(april())),
            "/articles?category=20&publication=hilal-urdu&month=4&year=2025"
        );
        assert_eq!(
            category_url(&dir, 30, "/articles", Some("hilal-her"), None, None),
            "/articles?category=30&publication=hilal-her"
        );
        assert_eq!(
            category_url(&dir, 20, "/gallery", None, Some(&current), None),
            "/articles?category=20&publication=hilal-urdu"
        );
        assert_eq!(
            category_url(&dir, 20, "/gallery", None, None, None),
            "/articles?category=20&publication=hilal-english"
        );
    }
}
