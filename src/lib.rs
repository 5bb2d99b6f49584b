//! Seithi, a content-scoring API.
//!
//! Articles arrive from an external classifier carrying nine precomputed
//! scores on three axes, are stored once per url, listed with threshold
//! filters, and annotated with user feedback.
//!
//! | Axis | Scores |
//! |------|--------|
//! | **Epistemic** | opinion, mixed, facts |
//! | **Emotive** | triggering, mixed, calm |
//! | **Density** | fluff, standard, deep |
//!
//! # Architecture
//!
//! - **Storage**: SQLite via rusqlite, WAL mode, forward-only migrations
//! - **Transport**: JSON over HTTP with axum; CORS and request tracing from tower-http
//! - **Client**: a thin reqwest wrapper for front ends and ingestion scripts
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite database initialization, schema, migrations, and health checks
//! - [`articles`]: Query, ingestion, feedback, and stats services
//! - [`api`]: HTTP routes and JSON error mapping
//! - [`client`]: Typed HTTP client for the API

pub mod api;
pub mod articles;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
