use crate::handlers::queries;
use crate::service::Report;
use crate::state::AppState;
use axum::{extract::State, routing::get, routing::post, routing::put, Router};

/// Reporting and raw-statement routes under `/queries`.
pub fn query_routes(state: AppState) -> Router {
    let mut routes = Router::new();
    for report in Report::ALL {
        routes = routes.route(
            &format!("/{}", report.path()),
            get(move |State(state): State<AppState>| queries::run_report(state, report)),
        );
    }
    let routes = routes
        .route(
            "/cars-more-expensive-than-category/:category_id",
            get(queries::more_expensive_than_category),
        )
        .route(
            "/cars-cheaper-than-category/:category_id",
            get(queries::cheaper_than_category),
        )
        .route("/cars", post(queries::add_car))
        .route("/cars/:car_id", put(queries::reprice_car))
        .route("/users", post(queries::add_user))
        .route("/users/:email", axum::routing::delete(queries::remove_user))
        .with_state(state);
    Router::new().nest("/queries", routes)
}
