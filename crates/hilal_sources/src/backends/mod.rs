pub mod http;
pub mod memory;

pub use http::HttpSource;
pub use memory::InMemorySource;
