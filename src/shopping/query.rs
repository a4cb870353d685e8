//! Read-only selectors over a [`ShoppingState`] snapshot.
//!
//! The presentation layer reads through these instead of walking the
//! state directly, so the store's internal shape can change freely.

use crate::shopping::state::{Item, ShoppingList, ShoppingState};

/// Purchased vs. total item counts for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub purchased: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.purchased == self.total
    }
}

pub fn all_lists(state: &ShoppingState) -> &[ShoppingList] {
    &state.lists
}

pub fn list<'a>(state: &'a ShoppingState, list_id: &str) -> Option<&'a ShoppingList> {
    state.list(list_id)
}

/// Items of a list in insertion order; `None` when the list does not exist.
pub fn items_of<'a>(state: &'a ShoppingState, list_id: &str) -> Option<&'a [Item]> {
    state.list(list_id).map(|list| list.items.as_slice())
}

pub fn item<'a>(state: &'a ShoppingState, list_id: &str, item_id: &str) -> Option<&'a Item> {
    state.list(list_id).and_then(|list| list.item(item_id))
}

/// Whether any list already uses this name (compared after trimming).
pub fn is_list_name_taken(state: &ShoppingState, name: &str) -> bool {
    let name = name.trim();
    state.lists.iter().any(|list| list.name.trim() == name)
}

/// Mirrors the duplicate-name guard applied by `add_item`.
pub fn is_item_name_taken(state: &ShoppingState, list_id: &str, name: &str) -> bool {
    state
        .list(list_id)
        .is_some_and(|list| list.has_item_named(name.trim()))
}

pub fn progress(list: &ShoppingList) -> Progress {
    Progress {
        purchased: list.items.iter().filter(|item| item.purchased).count(),
        total: list.items.len(),
    }
}
