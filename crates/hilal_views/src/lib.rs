pub mod grid;
pub mod language;
pub mod logging;
pub mod media;
pub mod misc;
pub mod search;
pub mod trending;

#[cfg(test)]
mod testing;

pub use grid::AllArticlesGridView;
pub use language::Language;
pub use logging::{init_logging, Logger};
pub use media::upload_media;
pub use misc::MiscView;
pub use search::{FetchTicket, SearchSession, SearchStatus, FETCH_FAILED_MESSAGE};
pub use trending::{TrendingLayout, TrendingView};

pub mod prelude {
    pub use crate::{
        AllArticlesGridView, Language, MiscView, SearchSession, SearchStatus, TrendingLayout,
        TrendingView,
    };
}
