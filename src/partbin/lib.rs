//! # Partbin Architecture
//!
//! Partbin is a **UI-agnostic inventory library** for small parts stored in
//! addressable bins, with pick-to-light guidance over an RGB LED strip. The
//! CLI in `main.rs` is one client; a GUI or web front end would sit on the
//! same facade.
//!
//! ## Layers
//!
//! ```text
//! CLI (args.rs, wired by main.rs)
//!   — parses arguments, formats output; the only place that prints
//!        │
//! API facade (api.rs)
//!   — PartbinApi<S>: one mutex around the catalogue, structured results
//!        │
//! Commands (commands/*.rs)          Strip (strip/*.rs)
//!   — ledger business logic          — addressing, debounce, wire protocol
//!        │                                │
//! Storage (store/)                  Transport (strip/transport.rs)
//!   — CatalogueStore trait:          — Transport trait: TtyLink
//!     FileStore, InMemoryStore         (production), MockLink (tests)
//! ```
//!
//! ## The two numberings
//!
//! Bin codes like `3F` have an *allocation order* (reading order, used to
//! hand out free bins) and a *physical-wire order* (serpentine, used to
//! address the strip). [`location`] owns both; nothing else converts codes.
//!
//! ## Concurrency
//!
//! Catalogue mutations are single-writer: every facade call locks the one
//! catalogue mutex for its full mutate-then-persist span. The strip keeps
//! its generation counter and recently-lit set under a single mutex, and
//! every serial write goes through one link lock, so commands from timer
//! threads never interleave on the wire. Hardware absence degrades to
//! explicit no-op outcomes; the ledger never depends on the device.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade — entry point for all operations
//! - [`commands`]: business logic per operation
//! - [`catalogue`]: the owned component list + undo stack
//! - [`store`]: persistence abstraction and implementations
//! - [`model`]: core data types (`Component`, `BomRow`)
//! - [`location`]: bin codes and both orderings
//! - [`similarity`]: duplicate-detection scoring
//! - [`strip`]: LED bus, transport seam, highlight scheduling
//! - [`backup`]: cancellable periodic backup loop
//! - [`config`]: configuration loading
//! - [`lookup`]: contracts for external collaborators
//! - [`error`]: error types

pub mod api;
pub mod backup;
pub mod catalogue;
pub mod commands;
pub mod config;
pub mod error;
pub mod location;
pub mod lookup;
pub mod model;
pub mod similarity;
pub mod store;
pub mod strip;
