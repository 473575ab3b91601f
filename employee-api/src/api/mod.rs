//! HTTP routes

pub mod employee;
pub mod extract;
pub mod health;

use axum::Router;
use axum::routing::get;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/v1";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Employee routes, served with and without the trailing slash
fn employee_routes() -> Router<AppState> {
    let collection = get(employee::list).post(employee::create);
    let item = get(employee::get_by_id)
        .put(employee::update)
        .patch(employee::patch)
        .delete(employee::delete);

    Router::new()
        .route(&format!("{API_PREFIX}/employees"), collection.clone())
        .route(&format!("{API_PREFIX}/employees/"), collection)
        .route(&format!("{API_PREFIX}/employees/{{id}}"), item)
}

/// Create the application router with all middleware and state
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(employee_routes())
        // CORS - all origins, methods and headers
        .layer(CorsLayer::permissive())
        // Trace - request spans (INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        // Request ID - outermost, so every inner layer sees it
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state)
}
