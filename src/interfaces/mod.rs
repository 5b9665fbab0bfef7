//! Boundary adapters: JSON channel wire shapes and CSV export.

pub mod csv;
pub mod json;
