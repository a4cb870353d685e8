use crate::mvi::{Reducer, Reduction};
use crate::shopping::error::ValidationError;
use crate::shopping::intent::ShoppingIntent;
use crate::shopping::state::{Item, ShoppingList, ShoppingState};

pub struct ShoppingReducer;

impl Reducer for ShoppingReducer {
    type State = ShoppingState;
    type Intent = ShoppingIntent;
    type Error = ValidationError;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> Result<Reduction, Self::Error> {
        match intent {
            ShoppingIntent::Initialize { lists } => {
                ShoppingState::validate(&lists)?;
                if state.lists == lists {
                    return Ok(Reduction::Unchanged);
                }
                state.lists = lists;
                Ok(Reduction::Changed)
            }
            ShoppingIntent::CreateList { id, name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::EmptyListName);
                }
                if state.list(&id).is_some() {
                    return Err(ValidationError::DuplicateListId { id });
                }
                state.lists.push(ShoppingList::new(id, name));
                Ok(Reduction::Changed)
            }
            ShoppingIntent::RenameList { list_id, name } => {
                let Some(list) = state.list_mut(&list_id) else {
                    return Ok(Reduction::Unchanged);
                };
                if list.name == name {
                    return Ok(Reduction::Unchanged);
                }
                list.name = name;
                Ok(Reduction::Changed)
            }
            ShoppingIntent::DeleteList { list_id } => {
                let before = state.lists.len();
                state.lists.retain(|list| list.id != list_id);
                Ok(changed_if(state.lists.len() != before))
            }
            ShoppingIntent::AddItem { list_id, item } => add_item(state, list_id, item),
            ShoppingIntent::EditItem {
                list_id,
                item_id,
                name,
                quantity,
            } => {
                let Some(item) = state
                    .list_mut(&list_id)
                    .and_then(|list| list.item_mut(&item_id))
                else {
                    return Ok(Reduction::Unchanged);
                };
                if item.name == name && item.quantity == quantity {
                    return Ok(Reduction::Unchanged);
                }
                item.name = name;
                item.quantity = quantity;
                Ok(Reduction::Changed)
            }
            ShoppingIntent::TogglePurchased { list_id, item_id } => {
                match state
                    .list_mut(&list_id)
                    .and_then(|list| list.item_mut(&item_id))
                {
                    Some(item) => {
                        item.purchased = !item.purchased;
                        Ok(Reduction::Changed)
                    }
                    None => Ok(Reduction::Unchanged),
                }
            }
            ShoppingIntent::DeleteItem { list_id, item_id } => {
                let Some(list) = state.list_mut(&list_id) else {
                    return Ok(Reduction::Unchanged);
                };
                let before = list.items.len();
                list.items.retain(|item| item.id != item_id);
                Ok(changed_if(list.items.len() != before))
            }
        }
    }
}

/// Input is validated before the list lookup, so a blank item is rejected
/// even when the list is gone.
fn add_item(
    state: &mut ShoppingState,
    list_id: String,
    mut item: Item,
) -> Result<Reduction, ValidationError> {
    item.name = item.name.trim().to_string();
    item.quantity = item.quantity.trim().to_string();
    if item.name.is_empty() {
        return Err(ValidationError::EmptyItemName);
    }
    if item.quantity.is_empty() {
        return Err(ValidationError::EmptyQuantity);
    }

    let Some(list) = state.list_mut(&list_id) else {
        return Ok(Reduction::Unchanged);
    };
    if list.has_item_named(&item.name) {
        return Err(ValidationError::DuplicateItemName {
            list_id,
            name: item.name,
        });
    }
    if list.item(&item.id).is_some() {
        return Err(ValidationError::DuplicateItemId { list_id, id: item.id });
    }

    list.items.push(item);
    Ok(Reduction::Changed)
}

fn changed_if(changed: bool) -> Reduction {
    if changed {
        Reduction::Changed
    } else {
        Reduction::Unchanged
    }
}
