//! Browser implementations of the document and transport seams.

pub(crate) mod dom;
pub(crate) mod http;
