//! API router.
//!
//! Routes are nested under `/api/`. Everything except health, signup
//! and login requires a bearer session token; uploaded photos are
//! served statically under `/uploads/`.

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer). Endpoint handlers use `State<ApiContext>`.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);
    build_router(ctx)
}

/// Build router from a pre-constructed `ApiContext`.
///
/// Used by tests that need direct access to the session store.
#[cfg(test)]
pub(crate) fn api_router_with_ctx(ctx: ApiContext) -> Router {
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    // Protected routes — bearer token required.
    let protected = Router::new()
        .route("/dashboard", get(endpoints::dashboard::overview))
        .route("/employees", get(endpoints::employees::list))
        .route(
            "/employees/:id/photo",
            post(endpoints::employees::upload_photo),
        )
        .route("/clients", get(endpoints::clients::list))
        .route("/services", get(endpoints::services::list))
        .route("/services", post(endpoints::services::create))
        .route("/appointments", get(endpoints::appointments::day))
        .route("/appointments", post(endpoints::appointments::create))
        .route("/appointments/:id", put(endpoints::appointments::update))
        .route(
            "/appointments/:id",
            delete(endpoints::appointments::cancel),
        )
        .route(
            "/appointments/:id/finalize",
            post(endpoints::appointments::finalize),
        )
        .route("/sales", get(endpoints::sales::list))
        .route("/auth/logout", post(endpoints::auth::logout))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    // Unprotected routes.
    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/signup", post(endpoints::auth::signup))
        .route("/auth/login", post(endpoints::auth::login))
        .with_state(ctx.clone());

    let uploads = ServeDir::new(&ctx.core.uploads_dir);

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
        .nest_service("/uploads", uploads)
        .layer(CorsLayer::permissive())
}
