#![doc = "sheet-snapshot-core: core pipeline library for sheet-snapshot."]

//! This crate holds the data model, the renderers and the pipeline that turns
//! spreadsheets into Markdown, HTML and JSON snapshots and publishes them.
//! Transport clients for the concrete remote services live in the CLI crate;
//! everything here talks to them through the traits in [`contract`].
//!
//! # Usage
//! Add this as a dependency for all assembly, rendering, routing and publishing code.

pub mod assemble;
pub mod config;
pub mod contract;
pub mod error;
pub mod location;
pub mod model;
pub mod publish;
pub mod render;
pub mod snapshot;

pub use error::SnapshotError;
