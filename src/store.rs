//! The list store: authoritative in-memory state plus save triggering.
//!
//! Every mutation runs through [`ShoppingReducer`]. When the reducer
//! reports a change, the full collection is handed to the attached
//! [`SaveHandle`] and the call returns without waiting for the save. A
//! crash before that save completes loses the mutation on next start.

use uuid::Uuid;

use crate::mvi::{Reducer, Reduction};
use crate::persist::SaveHandle;
use crate::shopping::{
    Item, ShoppingIntent, ShoppingList, ShoppingReducer, ShoppingState, ValidationError,
};

/// Owned, explicitly passed state container for all shopping lists.
#[derive(Default)]
pub struct ListStore {
    state: ShoppingState,
    saver: Option<SaveHandle>,
}

impl ListStore {
    /// A store that keeps everything in memory and never saves.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saver(saver: SaveHandle) -> Self {
        Self {
            state: ShoppingState::default(),
            saver: Some(saver),
        }
    }

    /// Attach (or replace) the writer that receives post-mutation snapshots.
    pub fn attach_saver(&mut self, saver: SaveHandle) {
        self.saver = Some(saver);
    }

    pub fn saver(&self) -> Option<&SaveHandle> {
        self.saver.as_ref()
    }

    pub fn state(&self) -> &ShoppingState {
        &self.state
    }

    pub fn lists(&self) -> &[ShoppingList] {
        &self.state.lists
    }

    /// Apply an intent, then queue a save if the state changed.
    ///
    /// `Initialize` never queues a save: it is how stored data comes in.
    pub fn dispatch(&mut self, intent: ShoppingIntent) -> Result<Reduction, ValidationError> {
        let persist = !matches!(intent, ShoppingIntent::Initialize { .. });
        let (label, list_id, item_id) = describe(&intent);

        let reduction = ShoppingReducer::reduce(&mut self.state, intent).inspect_err(|e| {
            tracing::debug!(
                intent = label,
                list_id = list_id.as_deref(),
                item_id = item_id.as_deref(),
                error = %e,
                "Mutation rejected"
            );
        })?;
        tracing::debug!(
            intent = label,
            list_id = list_id.as_deref(),
            item_id = item_id.as_deref(),
            changed = reduction.is_changed(),
            "Mutation applied"
        );

        if persist && reduction.is_changed() {
            if let Some(saver) = &self.saver {
                saver.submit(self.state.lists.clone());
            }
        }
        Ok(reduction)
    }

    /// Replace the whole collection with lists restored from storage.
    pub fn initialize(&mut self, lists: Vec<ShoppingList>) -> Result<(), ValidationError> {
        self.dispatch(ShoppingIntent::Initialize { lists }).map(|_| ())
    }

    /// Create an empty list and return its id.
    pub fn create_list(&mut self, name: &str) -> Result<String, ValidationError> {
        let id = new_id();
        self.dispatch(ShoppingIntent::CreateList {
            id: id.clone(),
            name: name.to_string(),
        })?;
        Ok(id)
    }

    pub fn rename_list(&mut self, list_id: &str, name: &str) -> Reduction {
        self.apply(ShoppingIntent::RenameList {
            list_id: list_id.to_string(),
            name: name.to_string(),
        })
    }

    /// Remove a list together with all its items.
    pub fn delete_list(&mut self, list_id: &str) -> Reduction {
        self.apply(ShoppingIntent::DeleteList {
            list_id: list_id.to_string(),
        })
    }

    /// Append an unpurchased item and return its id.
    ///
    /// Returns `Ok(None)` when the list does not exist.
    pub fn add_item(
        &mut self,
        list_id: &str,
        name: &str,
        quantity: &str,
    ) -> Result<Option<String>, ValidationError> {
        let id = new_id();
        let reduction = self.dispatch(ShoppingIntent::AddItem {
            list_id: list_id.to_string(),
            item: Item::new(id.clone(), name, quantity),
        })?;
        Ok(reduction.is_changed().then_some(id))
    }

    pub fn edit_item(
        &mut self,
        list_id: &str,
        item_id: &str,
        name: &str,
        quantity: &str,
    ) -> Reduction {
        self.apply(ShoppingIntent::EditItem {
            list_id: list_id.to_string(),
            item_id: item_id.to_string(),
            name: name.to_string(),
            quantity: quantity.to_string(),
        })
    }

    pub fn toggle_purchased(&mut self, list_id: &str, item_id: &str) -> Reduction {
        self.apply(ShoppingIntent::TogglePurchased {
            list_id: list_id.to_string(),
            item_id: item_id.to_string(),
        })
    }

    pub fn delete_item(&mut self, list_id: &str, item_id: &str) -> Reduction {
        self.apply(ShoppingIntent::DeleteItem {
            list_id: list_id.to_string(),
            item_id: item_id.to_string(),
        })
    }

    /// For intents the reducer never rejects.
    fn apply(&mut self, intent: ShoppingIntent) -> Reduction {
        match self.dispatch(intent) {
            Ok(reduction) => reduction,
            Err(e) => {
                tracing::error!(error = %e, "Unexpected rejection");
                Reduction::Unchanged
            }
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Label and target ids of an intent, for logging.
fn describe(intent: &ShoppingIntent) -> (&'static str, Option<String>, Option<String>) {
    match intent {
        ShoppingIntent::Initialize { .. } => ("initialize", None, None),
        ShoppingIntent::CreateList { id, .. } => ("create_list", Some(id.clone()), None),
        ShoppingIntent::RenameList { list_id, .. } => ("rename_list", Some(list_id.clone()), None),
        ShoppingIntent::DeleteList { list_id } => ("delete_list", Some(list_id.clone()), None),
        ShoppingIntent::AddItem { list_id, item } => {
            ("add_item", Some(list_id.clone()), Some(item.id.clone()))
        }
        ShoppingIntent::EditItem { list_id, item_id, .. } => {
            ("edit_item", Some(list_id.clone()), Some(item_id.clone()))
        }
        ShoppingIntent::TogglePurchased { list_id, item_id } => {
            ("toggle_purchased", Some(list_id.clone()), Some(item_id.clone()))
        }
        ShoppingIntent::DeleteItem { list_id, item_id } => {
            ("delete_item", Some(list_id.clone()), Some(item_id.clone()))
        }
    }
}
