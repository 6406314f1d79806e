//! Native shell bindings for the Life OS core.

pub mod api;
