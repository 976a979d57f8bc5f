//! Router construction and shared state

use std::sync::Arc;

use axum::{routing::get, Router};
use house_engine::HouseService;

use crate::handlers;

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct HouseState {
    service: Arc<HouseService>,
}

impl HouseState {
    pub fn new(service: HouseService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &Arc<HouseService> {
        &self.service
    }
}

/// Build the router with every house endpoint
///
/// `/house/new` is matched before `/house/{roomName}`; its GET and DELETE
/// still address a room literally named "new".
pub fn create_router(state: HouseState) -> Router {
    Router::new()
        .route("/house", get(handlers::list_rooms))
        .route(
            "/house/new",
            get(handlers::get_new_room)
                .post(handlers::create_room)
                .delete(handlers::delete_new_room),
        )
        .route(
            "/house/:room_name",
            get(handlers::get_room).delete(handlers::delete_room),
        )
        .with_state(state)
}
