//! # Guardian News
//!
//! A fetch-and-parse pipeline for The Guardian content API's `/search`
//! endpoint.
//!
//! - [`request`] builds the search URL from sort and section options
//! - [`api`] performs the GET with connect/read timeouts
//! - [`parser`] turns the JSON body into [`models::Article`] records
//! - [`pipeline`] ties them together, either typed or fail-soft
//! - [`loader`] runs a load on a background task and picks what to display
//!
//! The `guardian_news` binary adds a preference file, Markdown rendering and
//! JSON snapshots on top.

pub mod api;
pub mod error;
pub mod loader;
pub mod models;
pub mod outputs;
pub mod parser;
pub mod pipeline;
pub mod preferences;
pub mod request;
pub mod utils;
