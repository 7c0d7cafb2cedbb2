//! # Recipebook Core
//!
//! Core types, errors, and utilities for the Recipebook API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type rendered into the standard failure envelope
//! - [`pagination`]: Fixed-size page windows with bounds checking
//! - [`permissions`]: Permission string constants granted through token claims
//!
//! # Example
//!
//! ```ignore
//! use recipebook_core::errors::AppError;
//! use recipebook_core::pagination::{PaginationParams, PageWindow};
//!
//! // Create an error
//! let error = AppError::not_found(anyhow::anyhow!("Recipe 7 not found"));
//!
//! // Compute a page window and check it against the collection size
//! let window = PageWindow::for_page(params.page())?;
//! window.check_bounds(total)?;
//! ```

pub mod errors;
pub mod pagination;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PAGE_SIZE, PageMeta, PageWindow, PaginationParams};
