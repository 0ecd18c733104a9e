// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{instructor, quiz},
    state::AppState,
    utils::jwt::{auth_middleware, instructor_middleware},
};

/// Assembles the main application router.
///
/// * Quiz routes are open: respondents identify themselves, not log in.
/// * Instructor report routes require a bearer token with the instructor role.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/questions", get(quiz::list_questions))
        .route("/sessions", post(quiz::start_session))
        .route("/sessions/{id}", get(quiz::get_session))
        .route(
            "/sessions/{id}/answers/{question_id}",
            put(quiz::record_answer),
        )
        .route("/sessions/{id}/submit", post(quiz::submit_session));

    let report_routes = Router::new()
        .route("/report", get(instructor::get_report))
        .route("/export/{file}", get(instructor::export_csv))
        // Auth first, then the role check
        .layer(middleware::from_fn(instructor_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let instructor_routes = Router::new()
        .route("/login", post(instructor::login))
        .merge(report_routes);

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/instructor", instructor_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
