//! Feature slices built on the core primitives.
pub mod actions;
