use crate::window::DateWindow;
use crate::Result;

pub const DEFAULT_TARGET_MONTH: u32 = 4;
pub const DEFAULT_TARGET_YEAR: i32 = 2025;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_FALLBACK_SLOT_COUNT: usize = 6;
pub const DEFAULT_SEARCH_CANDIDATE_COUNT: usize = 500;

/// Constants every content view is parameterized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentConfig {
    pub window: DateWindow,
    pub page_size: usize,
    pub fallback_slot_count: usize,
    pub search_candidate_count: usize,
}

impl ContentConfig {
    pub fn new(target_month: u32, target_year: i32) -> Result<Self> {
        Ok(Self {
            window: DateWindow::new(target_month, target_year)?,
            ..Self::default()
        })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            window: DateWindow::new_unchecked(DEFAULT_TARGET_MONTH, DEFAULT_TARGET_YEAR),
            page_size: DEFAULT_PAGE_SIZE,
            fallback_slot_count: DEFAULT_FALLBACK_SLOT_COUNT,
            search_candidate_count: DEFAULT_SEARCH_CANDIDATE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContentConfig::default();
        assert_eq!(config.window.month(), 4);
        assert_eq!(config.window.year(), 2025);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.fallback_slot_count, 6);
        assert_eq!(config.search_candidate_count, 500);
    }

    #[test]
    fn test_rejects_bad_month() {
        assert!(ContentConfig::new(13, 2025).is_err());
        let config = ContentConfig::new(12, 2024).unwrap().with_page_size(0);
        assert_eq!(config.page_size, 1);
    }
}
