use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MatchingSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page must be at least 1")]
    InvalidPage,

    #[error("page size must be at least 1")]
    InvalidPageSize,
}

/// Page size limits applied to every paginated endpoint
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl From<&MatchingSettings> for PageLimits {
    fn from(settings: &MatchingSettings) -> Self {
        let defaults = PageLimits::default();
        Self {
            default_page_size: settings.default_page_size.unwrap_or(defaults.default_page_size),
            max_page_size: settings.max_page_size.unwrap_or(defaults.max_page_size),
        }
    }
}

impl PageLimits {
    /// Resolve optional query parameters into a page request.
    ///
    /// Missing page means page 1, missing size means the default size.
    /// Oversized pages are capped rather than rejected.
    pub fn request(&self, page: Option<u32>, page_size: Option<u32>) -> Result<PageRequest, PageError> {
        let size = page_size.unwrap_or(self.default_page_size);
        PageRequest::new(page.unwrap_or(1), size.min(self.max_page_size))
    }
}

/// A 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::InvalidPage);
        }
        if page_size == 0 {
            return Err(PageError::InvalidPageSize);
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

/// Pagination metadata returned alongside every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    pub fn new(total_count: u64, request: PageRequest) -> Self {
        let size = request.page_size() as u64;
        let total_pages = total_count.div_ceil(size).max(1);
        let current_page = request.page();

        Self {
            total_count,
            total_pages,
            current_page,
            page_size: request.page_size(),
            has_next_page: (current_page as u64) < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}
