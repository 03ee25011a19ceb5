pub mod candidates;
pub mod health;
pub mod job_orders;
pub mod submittals;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{config::get_config, middleware, AppState};

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/candidates/:id",
            get(candidates::get_candidate)
                .patch(candidates::update_candidate)
                .delete(candidates::delete_candidate),
        )
        .route("/candidates/:id/resume", post(candidates::upload_resume))
        .route(
            "/job-orders",
            get(job_orders::list_job_orders).post(job_orders::create_job_order),
        )
        .route("/job-orders/stats", get(job_orders::get_job_order_stats))
        .route(
            "/job-orders/:id",
            get(job_orders::get_job_order)
                .patch(job_orders::update_job_order)
                .delete(job_orders::delete_job_order),
        )
        .route(
            "/submittals",
            get(submittals::list_submittals).post(submittals::create_submittal),
        )
        .route("/submittals/stats", get(submittals::get_submittal_stats))
        .route(
            "/submittals/:id",
            get(submittals::get_submittal)
                .patch(submittals::update_submittal)
                .delete(submittals::delete_submittal),
        )
        .layer(from_fn(middleware::auth::require_bearer_auth))
        .layer(from_fn_with_state(
            middleware::rate_limit::new_rps_state(get_config().api_rps),
            middleware::rate_limit::rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}
