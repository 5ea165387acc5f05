use clap::Parser;
use hilal_core::config::{DEFAULT_PAGE_SIZE, DEFAULT_TARGET_MONTH, DEFAULT_TARGET_YEAR};
use hilal_core::media::media_url;
use hilal_core::publication::{categories_for_path, category_url, publication_from_path};
use hilal_core::{
    Article, ArticleSource, ContentConfig, EntityKind, Page, Publication, PublicationDirectory,
    Result, SlotLayout, UploadRequest,
};
use hilal_sources::{create_source, DEFAULT_API_URL};
use hilal_views::{
    init_logging, upload_media, AllArticlesGridView, Language, MiscView, SearchSession,
    SearchStatus, TrendingLayout, TrendingView,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse Hilal magazine content from the terminal", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, default_value = "http", help = "Article source: http or memory")]
    source: String,
    #[arg(long, global = true, env = "HILAL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    #[arg(long, global = true, help = "JSON article list that seeds the memory source")]
    seed: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = DEFAULT_TARGET_MONTH)]
    month: u32,
    #[arg(long, global = true, default_value_t = DEFAULT_TARGET_YEAR)]
    year: i32,
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
    #[arg(long, global = true, help = "Print results as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search article titles, descriptions and authors.
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Trending section of a publication.
    Trending {
        publication: String,
        #[arg(long)]
        urdu: bool,
    },
    /// Misc section of a publication.
    Misc {
        publication: String,
        #[arg(long)]
        urdu: bool,
    },
    /// Every article of a publication in the target month.
    Grid {
        publication: String,
        #[arg(long)]
        urdu: bool,
    },
    /// Category menu for a site path.
    Categories {
        #[arg(long, default_value = "/")]
        path: String,
        /// `publication` query parameter of the page.
        #[arg(long)]
        publication: Option<String>,
        /// Publication the reader was last on.
        #[arg(long)]
        current: Option<String>,
        /// JSON file with publications, categories and month categories.
        #[arg(long)]
        directory: PathBuf,
    },
    /// Link to a category listing.
    CategoryUrl {
        category: i64,
        #[arg(long, default_value = "/")]
        path: String,
        #[arg(long)]
        publication: Option<String>,
        #[arg(long)]
        current: Option<String>,
        #[arg(long, help = "Append the target month and year")]
        with_date: bool,
        #[arg(long)]
        directory: PathBuf,
    },
    /// Public URL of a stored media file.
    MediaUrl {
        filename: String,
        #[arg(long, default_value = "articles")]
        entity: EntityKind,
    },
    /// Upload a media file for an entity.
    Upload {
        file: PathBuf,
        #[arg(long)]
        entity: EntityKind,
        #[arg(long)]
        id: String,
    },
}

async fn load_directory(path: &Path) -> Result<PublicationDirectory> {
    let raw = tokio::fs::read_to_string(path).await?;
    let directory: PublicationDirectory = serde_json::from_str(&raw)?;
    info!(
        "📖 Loaded {} publications and {} categories from {}",
        directory.publications.len(),
        directory.categories.len(),
        path.display()
    );
    Ok(directory)
}

fn find_current<'d>(directory: &'d PublicationDirectory, name: Option<&str>) -> Option<&'d Publication> {
    name.and_then(|name| directory.find(name))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn article_line(article: &Article) -> String {
    let mut line = format!("[{}] {}", article.id, article.title_or_default());
    if let Some(author) = &article.author_name {
        line.push_str(&format!(" by {}", author));
    }
    if let Some(date) = article.published_on() {
        line.push_str(&format!(" ({})", date));
    }
    line
}

fn print_header(title: &str, period: &str, language: Language) {
    println!("{} | {} [{}]", title, period, language.direction());
    println!("{}", "-".repeat(40));
}

/// One line per grid cell, grouped by row and labelled with the cell's category.
fn grid_lines(slots: &[Option<Article>], language: Language) -> Vec<String> {
    let layout = SlotLayout::trending_mixed();
    let mut lines = Vec::new();
    for (row, (specs, cells)) in layout.rows(layout.slots()).zip(layout.rows(slots)).enumerate() {
        lines.push(format!("Row {}", row + 1));
        for (spec, cell) in specs.iter().zip(cells) {
            let text = match cell {
                Some(article) => article_line(article),
                None => language.empty_slot().to_string(),
            };
            lines.push(format!("  {:<14}{}", spec.category.slug(), text));
        }
    }
    lines
}

/// Previous/next hints around the page counter; `None` for a single page.
fn page_footer<T>(page: &Page<'_, T>) -> Option<String> {
    if page.total_pages <= 1 {
        return None;
    }
    let mut footer = format!("Page {} of {}", page.page, page.total_pages);
    if page.has_previous() {
        footer = format!("← --page {}  {}", page.page - 1, footer);
    }
    if page.has_next() {
        footer.push_str(&format!("  --page {} →", page.page + 1));
    }
    Some(footer)
}

fn print_trending(view: &TrendingView) {
    print_header(&view.title, &view.period, view.language);
    if let Some(error) = &view.error {
        println!("{}", error);
        return;
    }
    match &view.layout {
        TrendingLayout::Grid { slots, .. } => {
            for line in grid_lines(slots, view.language) {
                println!("{}", line);
            }
        }
        TrendingLayout::List { articles } if articles.is_empty() => {
            println!("{}", view.language.empty_slot());
        }
        TrendingLayout::List { articles } => {
            for article in articles {
                println!("  {}", article_line(article));
            }
        }
    }
}

fn print_misc(view: &MiscView) {
    print_header(&view.title, &view.period, view.language);
    if let Some(message) = view.error.as_ref().or(view.empty_message.as_ref()) {
        println!("{}", message);
        return;
    }
    if let Some(featured) = &view.featured {
        println!("★ {}", article_line(featured));
    }
    for article in &view.secondary {
        println!("  {}", article_line(article));
    }
}

fn print_grid(view: &AllArticlesGridView) {
    if view.skipped > 0 {
        println!("(first {} articles appear under trending)", view.skipped);
    }
    if let Some(message) = view.error.as_ref().or(view.empty_message.as_ref()) {
        println!("{}", message);
        return;
    }
    for article in &view.articles {
        println!("  {}", article_line(article));
    }
}

async fn run_search(
    source: &dyn ArticleSource,
    config: &ContentConfig,
    query: &str,
    page: usize,
    as_json: bool,
) -> Result<()> {
    let mut session = SearchSession::new(config);
    if session.submit(source, query).await {
        info!("🔎 Searched {} for {:?}", source.name(), query.trim());
    }
    session.go_to_page(page);

    if let SearchStatus::Failed(message) = session.status() {
        println!("{}", message);
        return Ok(());
    }

    let current = session.page();
    if as_json {
        return print_json(&json!({
            "query": session.query().display_query(),
            "page": current.page,
            "total_pages": current.total_pages,
            "total": current.total,
            "articles": current.items,
        }));
    }

    println!("Search results for \"{}\"", session.query().display_query());
    if current.total == 0 {
        println!("No articles found.");
        return Ok(());
    }
    println!("{}", current.summary());
    for article in current.items {
        println!("  {}", article_line(article));
    }
    if let Some(footer) = page_footer(&current) {
        println!("{}", footer);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let logger = init_logging().with_prefix("[hilal]");
    let cli = Cli::parse();

    let config = ContentConfig::new(cli.month, cli.year)?.with_page_size(cli.page_size);
    logger.debug(&format!("Target window {}", config.window));

    match cli.command {
        Commands::Search { query, page } => {
            let source = open_source(&cli.source, &cli.api_url, cli.seed.as_deref()).await?;
            run_search(source.as_ref(), &config, &query, page, cli.json).await?;
        }
        Commands::Trending { publication, urdu } => {
            let source = open_source(&cli.source, &cli.api_url, cli.seed.as_deref()).await?;
            let view = TrendingView::load(source.as_ref(), &publication, Language::from_urdu_flag(urdu), &config).await;
            if cli.json {
                print_json(&view)?;
            } else {
                print_trending(&view);
            }
        }
        Commands::Misc { publication, urdu } => {
            let source = open_source(&cli.source, &cli.api_url, cli.seed.as_deref()).await?;
            let view = MiscView::load(source.as_ref(), &publication, Language::from_urdu_flag(urdu), &config).await;
            if cli.json {
                print_json(&view)?;
            } else {
                print_misc(&view);
            }
        }
        Commands::Grid { publication, urdu } => {
            let source = open_source(&cli.source, &cli.api_url, cli.seed.as_deref()).await?;
            let view =
                AllArticlesGridView::load(source.as_ref(), &publication, Language::from_urdu_flag(urdu), &config)
                    .await;
            if cli.json {
                print_json(&view)?;
            } else {
                print_grid(&view);
            }
        }
        Commands::Categories {
            path,
            publication,
            current,
            directory,
        } => {
            let directory = load_directory(&directory).await?;
            let current = find_current(&directory, current.as_deref());
            let menu = categories_for_path(&directory, &path, publication.as_deref(), current, config.window);
            let resolved = menu
                .visited
                .or(current)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| publication_from_path(&directory, &path));

            if cli.json {
                print_json(&json!({
                    "label": menu.label,
                    "publication": resolved,
                    "categories": menu.categories,
                }))?;
            } else {
                println!("{} ({})", menu.label, resolved);
                for category in &menu.categories {
                    println!(
                        "  {:>4}  {}",
                        category.id,
                        category.display_name.as_deref().unwrap_or(&category.name)
                    );
                }
            }
        }
        Commands::CategoryUrl {
            category,
            path,
            publication,
            current,
            with_date,
            directory,
        } => {
            let directory = load_directory(&directory).await?;
            let current = find_current(&directory, current.as_deref());
            let window = with_date.then_some(config.window);
            println!(
                "{}",
                category_url(&directory, category, &path, publication.as_deref(), current, window)
            );
        }
        Commands::MediaUrl { filename, entity } => match media_url(&cli.api_url, &filename, entity) {
            Some(url) => println!("{}", url),
            None => println!("No media file given"),
        },
        Commands::Upload { file, entity, id } => {
            let source = open_source(&cli.source, &cli.api_url, cli.seed.as_deref()).await?;
            let bytes = tokio::fs::read(&file).await?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let request = UploadRequest {
                file_name,
                bytes,
                kind: entity,
                entity_id: id,
            };
            let stored = upload_media(source.as_ref(), request).await?;
            println!("Stored as {}", stored);
        }
    }

    Ok(())
}

async fn open_source(kind: &str, api_url: &str, seed: Option<&Path>) -> Result<Arc<dyn ArticleSource>> {
    let source = create_source(kind, Some(api_url), seed).await?;
    info!("✨ Article source ready (using {})", source.name());
    Ok(source)
}
