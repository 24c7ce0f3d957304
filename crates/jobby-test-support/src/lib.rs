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

//! Shared test helpers used across integration suites.
//! Layout: page.rs (in-memory document), transport.rs (scripted replies),
//! fixtures.rs (page markup builders).

pub mod fixtures;
pub mod page;
pub mod transport;

use std::sync::Once;

use jobby_telemetry::{LogFormat, LoggingConfig, init_logging};

pub use page::{El, FakePage, NodeId};
pub use transport::ScriptedTransport;

/// Install a debug-level pretty subscriber once per test binary.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: "debug",
            format: LogFormat::Pretty,
        };
        if let Err(err) = init_logging(&config) {
            eprintln!("test logging unavailable: {err}");
        }
    });
}
