//! TruthLens - backend core for a real-time misinformation-analysis dashboard.
//!
//! # Overview
//!
//! TruthLens holds the session state of a claim-review dashboard: a single
//! reducer-driven state tree, a filter pipeline that derives the visible
//! feed, a live simulator that keeps the trending rail and the feed moving,
//! and a typed client for the external analysis agent. Nothing is persisted;
//! a session starts from the seed data and ends with the process.
//!
//! # Modules
//!
//! - [`model`]: Domain types for claims, trending topics, and alert rules
//! - [`i18n`]: Translation lookup with an English fallback chain
//! - [`store`]: The application state tree and its reducer
//! - [`filter`]: Pure derivation of the visible feed
//! - [`data`]: Static seed pools
//! - [`feed`]: The live feed simulator
//! - [`analysis`]: Client for the external analysis agent
//! - [`markers`]: Parsers for the agent's response marker conventions
//! - [`alerts`]: Saved alert rules
//! - [`pages`]: Page routing and view composition
//! - [`api`]: HTTP API handlers

pub mod alerts;
pub mod analysis;
pub mod api;
pub mod data;
pub mod feed;
pub mod filter;
pub mod i18n;
pub mod markers;
pub mod model;
pub mod pages;
pub mod store;
