//! Base trait for intents (user actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (create a list, rename an item)
/// - Startup events (initial state restored from storage)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
