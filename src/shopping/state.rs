use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::mvi::State;
use crate::shopping::error::ValidationError;

/// A purchasable entry inside a [`ShoppingList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within the owning list only.
    pub id: String,
    pub name: String,
    /// Free-form text ("2", "500 g", "a dozen").
    pub quantity: String,
    #[serde(default)]
    pub purchased: bool,
}

impl Item {
    /// Create an item that has not been purchased yet.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: quantity.into(),
            purchased: false,
        }
    }
}

/// A named, ordered collection of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ShoppingList {
    /// Create an empty list.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub(crate) fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Exact, case-sensitive name match.
    pub fn has_item_named(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }
}

/// The full list collection held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShoppingState {
    pub lists: Vec<ShoppingList>,
}

impl State for ShoppingState {}

impl ShoppingState {
    pub fn new(lists: Vec<ShoppingList>) -> Self {
        Self { lists }
    }

    pub fn list(&self, list_id: &str) -> Option<&ShoppingList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    pub(crate) fn list_mut(&mut self, list_id: &str) -> Option<&mut ShoppingList> {
        self.lists.iter_mut().find(|list| list.id == list_id)
    }

    /// Check the collection invariant for an arbitrary set of lists.
    ///
    /// Checks:
    /// - List ids are unique across the collection
    /// - Item ids are unique within each list
    pub fn validate(lists: &[ShoppingList]) -> Result<(), ValidationError> {
        let mut list_ids = HashSet::with_capacity(lists.len());
        for list in lists {
            if !list_ids.insert(list.id.as_str()) {
                return Err(ValidationError::DuplicateListId {
                    id: list.id.clone(),
                });
            }

            let mut item_ids = HashSet::with_capacity(list.items.len());
            for item in &list.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ValidationError::DuplicateItemId {
                        list_id: list.id.clone(),
                        id: item.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
