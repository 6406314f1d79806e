//! Persisted document model for Life OS.
//!
//! # Responsibility
//! - Define the single aggregate document and every entity it holds.
//! - Define caller-facing input and patch shapes for store mutations.
//!
//! # Invariants
//! - Wire field names are camelCase and enum values lowercase, so documents
//!   written by earlier app builds keep loading.
//! - The document is always persisted as one unit.

pub mod document;
pub mod input;
