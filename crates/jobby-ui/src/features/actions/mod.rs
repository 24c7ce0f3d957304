//! Trigger button actions: watchlist toggle, watchlist and trash removal.
//!
//! # Design
//! - Each activation runs a typed pipeline: request, network, response, reconcile, callback.
//! - Behaviors form a fixed strategy set chosen once per trigger at bootstrap.
//! - The page only changes after the server confirmed the outcome.

pub mod behavior;
pub mod bootstrap;
pub mod controller;
pub mod reconcile;
pub mod request;
pub mod response;

pub use behavior::Behavior;
pub use bootstrap::{BindingReport, BootstrapReport, bootstrap};
pub use controller::{ButtonController, Callback};
pub use response::{ListEffect, Outcome, ToggleBody};
