use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::{auth_handler, current_admin},
        clients::clients_handler,
        inquiries::inquiries_handler,
        overview::get_overview,
        properties::{admin_properties_handler, public_properties_handler},
        receipts::receipts_handler,
        tours::{admin_tours_handler, public_tours_handler},
        visits::visits_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/me", get(current_admin))
        .route("/overview", get(get_overview))
        .nest("/clients", clients_handler())
        .nest("/properties", admin_properties_handler())
        .nest("/visits", visits_handler())
        .nest("/tours", admin_tours_handler())
        .nest("/receipts", receipts_handler())
        .layer(middleware::from_fn(auth));

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/properties", public_properties_handler())
        .nest("/tours", public_tours_handler())
        .nest("/inquiries", inquiries_handler())
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
