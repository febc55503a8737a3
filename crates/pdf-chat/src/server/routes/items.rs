//! Demo item-echo endpoint (not part of the functional core)

use axum::Json;

use crate::types::{Item, ItemResponse};

/// `POST /items/`: echo an item back to the caller
pub async fn create_item(Json(item): Json<Item>) -> Json<ItemResponse> {
    Json(ItemResponse {
        message: format!(
            "Item '{}' created with description: '{}'",
            item.name, item.description
        ),
    })
}
