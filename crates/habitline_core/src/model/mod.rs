//! Domain model for trackers, schedules, categories and completion records.
//!
//! # Responsibility
//! - Define canonical value types used by core business logic.
//! - Keep storage encodings out of the model, except the schedule codec that
//!   lives with `Schedule` as its storage-boundary representation.
//!
//! # Invariants
//! - Every tracker is identified by a stable `TrackerId`.
//! - Completion state is a set of `(tracker, date)` facts, never a counter.

pub mod schedule;
pub mod tracker;
