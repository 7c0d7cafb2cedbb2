//! # Recipebook CLI
//!
//! A small command-line client for the Recipebook API.
//!
//! Connection settings live in a `.call-config` JSON file holding named
//! profiles, each with an API URL and a bearer token:
//!
//! ```json
//! {
//!   "current-profile": "default",
//!   "profiles": { "default": { "url": "http://127.0.0.1:5000", "token": "eyJ..." } }
//! }
//! ```

pub mod client;
pub mod config;

pub use client::{ApiClient, Entity};
pub use config::{CallConfig, Profile};
