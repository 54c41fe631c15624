use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use mentorship_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    health::{healthz, readyz},
    relation::{
        accept_relation, cancel_relation, delete_relation, get_current_relation,
        list_past_relations, list_pending_relations, list_relations, reject_relation,
        send_request,
    },
    user::{create_user, get_me, get_user, list_users, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user))
        .route("/users", get(list_users))
        .route("/users/@me", get(get_me))
        .route("/users/@me", patch(update_me))
        .route("/users/{user_id}", get(get_user))
        // Mentorship relations
        .route("/mentorship_relation/send_request", post(send_request))
        .route("/mentorship_relation/{id}/accept", put(accept_relation))
        .route("/mentorship_relation/{id}/reject", put(reject_relation))
        .route("/mentorship_relation/{id}/cancel", put(cancel_relation))
        .route("/mentorship_relation/{id}", delete(delete_relation))
        .route("/mentorship_relations", get(list_relations))
        .route("/mentorship_relations/pending", get(list_pending_relations))
        .route("/mentorship_relations/current", get(get_current_relation))
        .route("/mentorship_relations/past", get(list_past_relations))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
