use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_recipe, delete_recipe, get_recipe, get_recipes, update_recipe};

pub fn init_recipes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_recipes).post(create_recipe))
        .route(
            "/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
}
