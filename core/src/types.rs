//! Shared primitive types used across the engine.

/// Identifier of an event row in the data store.
pub type EventId = String;

/// Identifier of a center (venue / branch) in the data store.
pub type CenterId = String;

/// Whole-number percentage in [0, 100], stored as f64 so it serializes
/// the same way the UI consumes every other metric.
pub type Pct = f64;
