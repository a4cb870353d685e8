//! Base trait for store state in MVI architecture.

/// Marker trait for state objects.
///
/// States should be:
/// - Cloneable (snapshots are handed to the persistence writer)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait State: Clone + PartialEq + Default + Send + 'static {}
