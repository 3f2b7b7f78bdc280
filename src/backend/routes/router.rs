/**
 * Router Configuration
 *
 * # Routes
 *
 * - `GET /rooms`
 * - `POST /create-room`
 * - `POST /join-room`
 * - `POST /leave-room/{room_id}/{peer_id}`
 * - `POST /rooms/{room_id}/send-message`
 * - `GET /rooms/{room_id}/chats`
 *
 * # Middleware
 *
 * - `TraceLayer` - one span per request
 * - `CorsLayer::permissive()` - any origin, method and header
 *
 * Unknown paths fall back to a plain-text 404.
 */

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::chat::handlers::{get_chats, send_message};
use crate::backend::rooms::handlers::{create_room, get_rooms, join_room, leave_room};
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/rooms", get(get_rooms))
        .route("/create-room", post(create_room))
        .route("/join-room", post(join_room))
        .route("/leave-room/{room_id}/{peer_id}", post(leave_room))
        .route("/rooms/{room_id}/send-message", post(send_message))
        .route("/rooms/{room_id}/chats", get(get_chats))
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
