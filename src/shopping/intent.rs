use crate::mvi::Intent;
use crate::shopping::state::{Item, ShoppingList};

/// Every mutation the list store understands.
///
/// Ids are generated by the caller so the reducer stays deterministic.
#[derive(Debug, Clone)]
pub enum ShoppingIntent {
    /// Replace the whole collection (startup restore).
    Initialize { lists: Vec<ShoppingList> },
    CreateList { id: String, name: String },
    RenameList { list_id: String, name: String },
    DeleteList { list_id: String },
    AddItem { list_id: String, item: Item },
    EditItem {
        list_id: String,
        item_id: String,
        name: String,
        quantity: String,
    },
    TogglePurchased { list_id: String, item_id: String },
    DeleteItem { list_id: String, item_id: String },
}

impl Intent for ShoppingIntent {}
