//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::State;

/// Whether applying an intent altered the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Changed,
    /// The state is unchanged (unknown target or identical values).
    Unchanged,
}

impl Reduction {
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must not perform I/O. When it returns `Err`, the state is left
/// exactly as it was.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: State;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Rejection reported back to the caller.
    type Error;

    /// Apply an intent to the state in place.
    fn reduce(state: &mut Self::State, intent: Self::Intent) -> Result<Reduction, Self::Error>;
}
