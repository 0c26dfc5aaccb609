//! Store layer: use-case orchestration over repositories.
//!
//! # Responsibility
//! - Expose the APIs UI surfaces call directly (tracker list with diffs,
//!   category picker, day toggling).
//! - Own caller-facing policy: save-failure handling, pinned-category
//!   filtering, fallback category resolution.

pub mod category_store;
pub mod record_store;
pub mod tracker_store;
