//! API handlers for Biblioteca REST endpoints

pub mod books;
pub mod extract;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod users;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::CorsConfig, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route("/api/books/search", get(books::search_books))
        .route(
            "/api/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        // Users
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        // Loans
        .route("/api/loans", get(loans::list_loans).post(loans::create_loan))
        .route("/api/loans/details", get(loans::list_loan_details))
        .route("/api/loans/user/:id", get(loans::get_user_loans))
        .route("/api/loans/book/:id", get(loans::get_book_loans))
        .route("/api/loans/recommendations/:id", get(loans::get_recommendations))
        .route(
            "/api/loans/:id",
            get(loans::get_loan).put(loans::update_loan).delete(loans::delete_loan),
        )
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS policy: the configured origins with credentials, or any origin without
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
