//! API routes.

pub mod card;

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::from_fn,
    routing::get,
};

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::app::{AppState, app_rest_headers, log_app_errors};

/// Builds the app router with its middleware.
pub fn router(state: AppState) -> Router {
    Router::<AppState>::new()
        .route("/card", get(card::list).post(card::create))
        .route(
            "/card/{id}",
            get(card::show).put(card::update).delete(card::delete),
        )
        .layer(from_fn(app_rest_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    // axum automatically adds this extension.
                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                // errors are logged by `log_app_errors`
                .on_failure(()),
        )
        .layer(from_fn(log_app_errors))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
