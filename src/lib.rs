//! # Filmroom
//!
//! Engagement analytics for video-based sports coaching: who actually
//! watched the film, how much of it, and who acknowledged it.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (teams, points, views, acks, etc.)
//! - **storage**: Filesystem data lake operations (JSONL per team)
//! - **calculate**: Pure engagement aggregation engine
//! - **api**: REST API endpoints serving the reports
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
