//! Shared data crate for the heart failure records viewer.
//!
//! This crate contains the pieces used by both the loader and the web
//! components: the 13-column clinical record model with its display
//! formatting (`record`), and the SQLite helpers that materialize and
//! read the `heart_data` table (`store`). These modules are
//! intentionally minimal and focus on the viewer's needs rather than
//! being general-purpose libraries.
//!
/// Record model, column labels, and display formatting
pub mod record;
/// SQLite table creation, replacement, and reads
pub mod store;
