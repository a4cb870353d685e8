//! Model-View-Intent (MVI) primitives for the list store.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Plain data describing everything the view renders
//! - **Intent**: User actions (add a list, toggle an item, ...)
//! - **Reducer**: Applies an intent to the state, without I/O

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{Reducer, Reduction};
pub use state::State;
