//! Product trend scoring over a catalog CSV of unknown layout.
//!
//! Startup: [`dataset::load`] detects columns, cleans names and builds an
//! immutable [`dataset::CanonicalTable`]. Per request: [`predict::predict`]
//! samples it, scores each product on sentiment, rating and popularity, splits
//! Trending from Not Trending and summarizes description keywords.

pub mod api;
pub mod cleaner;
pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod keywords;
pub mod normalize;
pub mod predict;
pub mod scoring;
pub mod sentiment;
pub mod trend;
