use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_menu, delete_menu, get_menu, get_menus, update_menu};

pub fn init_menus_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_menus).post(create_menu))
        .route("/{id}", get(get_menu).patch(update_menu).delete(delete_menu))
}
