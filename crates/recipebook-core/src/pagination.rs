//! Pagination utilities for list endpoints.
//!
//! Lists are served in fixed windows of [`PAGE_SIZE`] items. A request names a
//! 1-based `page` (default 1); the window for page `p` covers the item indices
//! `[(p - 1) * PAGE_SIZE, p * PAGE_SIZE)` of the collection sorted by name.
//!
//! # Bounds
//!
//! - An empty collection accepts only page 1, which yields an empty list.
//! - A non-empty collection rejects any page whose first index is at or past
//!   the end of the collection.
//!
//! Both rejections are `400 Bad Request` with the message
//! `Page set beyond end of list`.
//!
//! # Example
//!
//! ```ignore
//! use recipebook_core::pagination::{PaginationParams, PageWindow, PageMeta};
//!
//! async fn list_recipes(Query(params): Query<PaginationParams>) -> Result<Json<_>, AppError> {
//!     let window = PageWindow::for_page(params.page())?;
//!     let total = count_recipes().await?;
//!     window.check_bounds(total)?;
//!
//!     let recipes = fetch_recipes(window.limit(), window.offset()).await?;
//!     let meta = PageMeta::new(&window, total);
//!     // ...
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;

/// Number of items served per page.
pub const PAGE_SIZE: i64 = 10;

/// Deserializes an optional query string into an optional i64.
///
/// Empty and non-numeric values are treated as absent, so they fall back to
/// the default page.
fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Query parameters for page-based pagination.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    /// Returns the requested page, defaulting to 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// The slice of a sorted collection served for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub start: i64,
    pub end: i64,
}

impl PageWindow {
    /// Computes the window for a 1-based page number.
    ///
    /// Pages below 1 have no window and are rejected outright.
    pub fn for_page(page: i64) -> Result<Self, AppError> {
        if page < 1 {
            return Err(out_of_bounds());
        }

        let start = (page - 1).checked_mul(PAGE_SIZE).ok_or_else(out_of_bounds)?;
        let end = start.checked_add(PAGE_SIZE).ok_or_else(out_of_bounds)?;
        Ok(Self { page, start, end })
    }

    /// Rejects windows that start past the end of a collection of `total` items.
    pub fn check_bounds(&self, total: i64) -> Result<(), AppError> {
        let beyond = if total == 0 {
            self.start > 0
        } else {
            self.start >= total
        };

        if beyond { Err(out_of_bounds()) } else { Ok(()) }
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        self.start
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.end - self.start
    }
}

/// Number of pages needed for `total` items.
#[must_use]
pub fn total_pages(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Page information reported alongside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// Page that was served
    pub page: i64,
    /// Number of pages in the whole collection
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(window: &PageWindow, total: i64) -> Self {
        Self {
            page: window.page,
            total_pages: total_pages(total),
        }
    }
}

fn out_of_bounds() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Page set beyond end of list"))
}
