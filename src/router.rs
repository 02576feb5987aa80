use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{api, app::App};

pub fn router(app: App) -> Router {
    let api_router = Router::new()
        .route(
            "/reports",
            get(api::reports::index).post(api::reports::create),
        )
        .route("/reports/{id}", get(api::reports::show))
        .with_state(app);

    Router::new()
        .route("/liveness", get(api::health_checks::ok))
        .route("/readiness", get(api::health_checks::ok))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}
