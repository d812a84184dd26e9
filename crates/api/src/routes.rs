use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn create_api_routes(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/dns-query",
            get(handlers::dns_query_get).post(handlers::dns_query_post),
        )
        .route("/health", get(handlers::health_check));

    if state.resolve_json.is_some() {
        router = router.route("/resolve", get(handlers::resolve));
    }

    router.with_state(state)
}
