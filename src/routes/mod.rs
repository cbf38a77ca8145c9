pub mod api;
pub mod pages;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Index redirects to the HTML list
        .route("/", get(index))
        // JSON API
        .route("/api", get(api::status))
        .route("/api/ping", get(api::ping))
        .route("/api/country", get(api::get_all).post(api::create))
        .route(
            "/api/country/{code}",
            get(api::get_one).patch(api::update).delete(api::remove),
        )
        // HTML pages
        .route("/countries", get(pages::list))
        .route("/countries/new", get(pages::new_form).post(pages::create))
        .route(
            "/countries/{code}/edit",
            get(pages::edit_form).post(pages::update),
        )
        .route("/countries/{code}/delete", post(pages::delete))
        // Health check
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Redirect {
    Redirect::to("/countries")
}

async fn health() -> &'static str {
    "OK"
}
