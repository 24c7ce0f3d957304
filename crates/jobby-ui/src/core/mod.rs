//! Core, DOM-free primitives for the button behaviors.
pub mod credential;
pub mod dom;
pub mod error;
pub mod payload;
pub mod search_form;
pub mod transport;
pub mod ui;
