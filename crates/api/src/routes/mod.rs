pub mod auth;
pub mod catalog;
pub mod chat;
pub mod collection;
pub mod contact;
pub mod department;
pub mod graduate_program;
pub mod group;
pub mod guidance;
pub mod health;
pub mod institution;
pub mod notification;
pub mod productivity_weight;
pub mod professor;
pub mod rbac;
pub mod researcher;
pub mod star;
pub mod technician;
pub mod uploads;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                      notification WebSocket (?token=)
/// /ws/chat/user/{user_id}                  private chat relay (?token=)
///
/// /token                                   login (public)
///
/// /user                                    accounts, roles, API keys, images
/// /role                                    roles and grants (admin)
/// /permission                              permissions (admin)
///
/// /institution                             institutions with stats
/// /researcher                              researchers and department links
/// /group                                   research groups
/// /graduate-program                        programs, researcher and student rosters
/// /department                              departments, links, disciplines
/// /technician                              technicians per semester, roles, links
/// /professor                               faculty per semester
/// /productivity-weight                     productivity weights per institution
/// /tag                                     tag catalog
/// /area                                    knowledge area catalog
/// /guidance-tracking                       supervision timelines
/// /guidance-config                         milestone duration presets
///
/// /collection                              user collections and entries
/// /stars                                   bookmarked entries
/// /notification                            user notifications
/// /chat                                    chats and private messages
/// /newsletter                              newsletter subscriptions
/// /feedback                                visitor feedback
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/ws/chat/user/{user_id}", get(ws::chat_ws_handler))
        .nest("/token", auth::router())
        .nest("/user", users::router())
        .nest("/role", rbac::role_router())
        .nest("/permission", rbac::permission_router())
        .nest("/institution", institution::router())
        .nest("/researcher", researcher::router())
        .nest("/group", group::router())
        .nest("/graduate-program", graduate_program::router())
        .nest("/department", department::router())
        .nest("/technician", technician::router())
        .nest("/professor", professor::router())
        .nest("/productivity-weight", productivity_weight::router())
        .nest("/tag", catalog::tag_router())
        .nest("/area", catalog::area_router())
        .nest("/guidance-tracking", guidance::tracking_router())
        .nest("/guidance-config", guidance::config_router())
        .nest("/collection", collection::router())
        .nest("/stars", star::router())
        .nest("/notification", notification::router())
        .nest("/chat", chat::router())
        .nest("/newsletter", contact::newsletter_router())
        .nest("/feedback", contact::feedback_router())
}
