//! Shopping-list domain: data model, intents, reducer and selectors.

mod error;
mod intent;
pub mod query;
mod reducer;
mod state;

pub use error::ValidationError;
pub use intent::ShoppingIntent;
pub use reducer::ShoppingReducer;
pub use state::{Item, ShoppingList, ShoppingState};
