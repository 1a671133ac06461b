//! HTTP host for the catalog site's locale routing.
//!
//! Wraps every page route in the locale middleware so that by the time a
//! request reaches a page handler its first path segment is a supported
//! locale. API routes, static assets and well-known files bypass it.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use catalog_locale::LocaleConfig;

pub mod locale_middleware;
pub mod routes;

pub use locale_middleware::{locale_routing, Locale};

pub struct AppState {
    pub config: LocaleConfig,
}

pub fn build_router(config: LocaleConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        // API (bypasses locale routing)
        .route("/api/health", get(routes::health))
        .route("/api/locales", get(routes::api_locales))
        // Localized pages
        .route("/{locale}", get(routes::page))
        .route("/{locale}/", get(routes::page))
        .route("/{locale}/{*rest}", get(routes::page))
        .layer(middleware::from_fn_with_state(state.clone(), locale_routing))
        .with_state(state)
        // Logging layer: method + path only (no query, cookies or headers)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
