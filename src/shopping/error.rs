use thiserror::Error;

/// Reasons a mutation is rejected before it touches the state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("List name cannot be empty")]
    EmptyListName,

    #[error("Item name cannot be empty")]
    EmptyItemName,

    #[error("Item quantity cannot be empty")]
    EmptyQuantity,

    #[error("Item '{name}' already exists in list '{list_id}'")]
    DuplicateItemName { list_id: String, name: String },

    #[error("List id '{id}' is already in use")]
    DuplicateListId { id: String },

    #[error("Item id '{id}' is already in use in list '{list_id}'")]
    DuplicateItemId { list_id: String, id: String },
}
