//! Routes and middleware (CORS, compression, tracing).

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    auth, check_ins, export, papers, profile, roadmap, stats, system, tasks, topics,
};
use super::state::AppState;

/// Build the application router. `cors_origins` may contain `*` to allow any
/// origin.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
        .route("/change-password", put(auth::change_password));

    let profile_routes = Router::new()
        .route("/", get(profile::get_profile).put(profile::update_profile))
        .route(
            "/interests",
            get(profile::list_interests).post(profile::create_interest),
        )
        .route(
            "/interests/{id}",
            get(profile::get_interest)
                .put(profile::update_interest)
                .delete(profile::delete_interest),
        )
        .route("/subscription", get(profile::get_subscription));

    let task_routes = Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/stats", get(tasks::task_stats))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/{id}/complete", patch(tasks::complete_task))
        .route("/{id}/uncomplete", patch(tasks::uncomplete_task));

    let check_in_routes = Router::new()
        .route(
            "/",
            get(check_ins::list_check_ins).post(check_ins::create_check_in),
        )
        .route("/today", get(check_ins::today_check_in))
        .route("/stats", get(check_ins::check_in_stats))
        .route("/streak", get(check_ins::get_check_in_streak))
        .route(
            "/calendar/{year}/{month}",
            get(check_ins::get_check_in_calendar),
        )
        .route("/{id}", delete(check_ins::delete_check_in));

    let paper_routes = Router::new()
        .route("/", get(papers::list_papers).post(papers::save_paper))
        .route("/search", post(papers::search_papers))
        .route(
            "/{id}",
            get(papers::get_paper)
                .patch(papers::update_paper)
                .delete(papers::delete_paper),
        );

    let roadmap_routes = Router::new()
        .route(
            "/current",
            get(roadmap::current_roadmap).delete(roadmap::delete_roadmap),
        )
        .route("/generate", post(roadmap::generate_roadmap));

    let stats_routes = Router::new()
        .route("/overview", get(stats::overview))
        .route("/timeseries", get(stats::timeseries))
        .route("/achievements", get(stats::achievements))
        .route("/learning-progress", get(stats::learning_progress))
        .route("/activity-heatmap", get(stats::activity_heatmap));

    let export_routes = Router::new()
        .route("/json", get(export::export_json))
        .route("/csv/{kind}", get(export::export_csv));

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health_check))
        .nest("/auth", auth_routes)
        .nest("/profile", profile_routes)
        .nest("/tasks", task_routes)
        .nest("/checkins", check_in_routes)
        .nest("/papers", paper_routes)
        .route("/topics/recommend", post(topics::recommend_topics))
        .nest("/roadmap", roadmap_routes)
        .nest("/stats", stats_routes)
        .nest("/export", export_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
