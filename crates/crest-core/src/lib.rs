//! crest-core library.
//!
//! The authoritative store of historical flood-event records: a built-in
//! seed layer, an optional external YAML layer merged over it by `id`, and
//! a contribution path that writes the external layer back to a remote
//! content store with optimistic concurrency.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums at module seams; `anyhow::Result`
//!   with context for fallible IO paths.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod seed;
pub mod slug;
pub mod store;
pub mod sync;
pub mod validate;
