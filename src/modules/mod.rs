//! Feature modules. Each one follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Store access and business rules
//! - `router.rs`: Axum router configuration

pub mod menus;
pub mod recipes;
