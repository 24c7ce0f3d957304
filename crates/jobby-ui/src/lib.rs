#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Jobby web UI button behaviors.
//!
//! Watchlist toggles, watchlist/trash removal buttons and search-form pruning.
//! The action engine is DOM-free and generic over [`crate::core::dom::Dom`] and
//! [`crate::core::transport::Transport`]; the browser bindings only build for wasm32.

pub mod config;
pub mod core;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod services;

#[cfg(target_arch = "wasm32")]
pub use app::{rearm, run_app};
