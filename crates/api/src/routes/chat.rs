use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`. All require authentication.
///
/// ```text
/// POST   /                          -> create
/// GET    /                          -> list (caller's chats)
/// POST   /user/{user_id}            -> send_private
/// GET    /user/{user_id}            -> private_messages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(chat::create).get(chat::list))
        .route(
            "/user/{user_id}",
            post(chat::send_private).get(chat::private_messages),
        )
}
