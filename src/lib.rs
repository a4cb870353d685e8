//! Shopping lists with reducer-driven state and queued local persistence.
//!
//! - [`shopping`]: data model, intents, reducer and read-only selectors
//! - [`store::ListStore`]: owned in-memory state that triggers saves
//! - [`persist`]: blob stores, JSON load/save and the background writer
//! - [`session::Session`]: startup wiring of the above

pub mod config;
pub mod logging;
pub mod mvi;
pub mod persist;
pub mod session;
pub mod shopping;
pub mod store;
