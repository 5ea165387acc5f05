pub mod config;
pub mod error;
pub mod media;
pub mod publication;
pub mod search;
pub mod slots;
pub mod source;
pub mod types;
pub mod window;

pub use config::ContentConfig;
pub use error::Error;
pub use media::{EntityKind, UploadReceipt, UploadRequest};
pub use publication::{normalize_publication_name, PublicationDirectory};
pub use search::{paginate, search, Page, PageLink, SearchState};
pub use slots::{arrange_slots, SlotCategory, SlotLayout, SlotSpec};
pub use source::{ArticleQuery, ArticleSource};
pub use types::{Article, ArticleEnvelope, ArticleId, Category, Publication};
pub use window::{filter_by_month, DateWindow};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{Article, ArticleId, ArticleQuery, ArticleSource, ContentConfig, DateWindow, Error, Result};
}
