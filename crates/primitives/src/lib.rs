//! Core types for selection navigation: positions, ranges, and selections.
//!
//! All coordinates are 1-based (line, column) pairs where the column counts
//! Unicode scalar values. Ranges are normalized so that `start <= end`.

/// Async future aliases.
pub mod future;
/// Identifier types for editor entities.
pub mod ids;
/// Text positions.
pub mod position;
/// Normalized text ranges and containment queries.
pub mod range;
/// Directional selections and ordered multi-cursor sets.
pub mod selection;

pub use future::BoxFutureLocal;
pub use ids::ViewId;
pub use position::Position;
pub use range::Range;
pub use selection::{Direction, Selection, SelectionSet};
