//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};

use super::payee::Payee;

/// Fixed number of payees per page
pub const PAGE_SIZE: usize = 10;

/// Pagination query parameters
///
/// # Example
/// ```rust,ignore
/// GET /api/v1/recebedores/nome/ana?pagina=2
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    /// Page number (starts at 1); anything lower reads as 1
    #[serde(default = "default_page", rename = "pagina")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

impl PageParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        usize::try_from(self.page).unwrap_or(0).max(1)
    }
}

/// Zero-based storage offset of the first item on `page`
///
/// Saturates instead of overflowing; a page past the end is simply empty.
pub fn page_offset(page: usize) -> usize {
    (page.max(1) - 1).saturating_mul(PAGE_SIZE)
}

/// One page of payees matching a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedPayees {
    pub total: usize,
    #[serde(rename = "por_pagina")]
    pub per_page: usize,
    #[serde(rename = "pagina_atual")]
    pub current_page: usize,
    #[serde(rename = "total_paginas")]
    pub total_pages: usize,
    #[serde(rename = "recebedores")]
    pub items: Vec<Payee>,
}

impl PagedPayees {
    pub fn new(total: usize, current_page: usize, items: Vec<Payee>) -> Self {
        Self {
            total,
            per_page: PAGE_SIZE,
            current_page,
            total_pages: total.div_ceil(PAGE_SIZE),
            items,
        }
    }
}
