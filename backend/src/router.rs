//! Route wiring. Every API route runs behind `validate_request` with the
//! schema declared for it.

use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{self, contests, payments, submissions, users},
    middleware::{log_error_responses, request_id, validate_request, RequestSchema},
    state::AppState,
    validation::{schemas, Schema},
};

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let guard = |schema: &'static Schema| RequestSchema::new(schema, max_body_bytes);

    let contest_routes = Router::new()
        .route(
            "/api/contests",
            get(contests::list_contests).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::LIST_CONTESTS),
                validate_request,
            )),
        )
        .route(
            "/api/contests",
            post(contests::create_contest).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::CREATE_CONTEST),
                validate_request,
            )),
        )
        .route(
            "/api/contests/{id}",
            get(contests::get_contest).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::CONTEST_BY_ID),
                validate_request,
            )),
        )
        .route(
            "/api/contests/{id}",
            put(contests::update_contest).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::UPDATE_CONTEST),
                validate_request,
            )),
        )
        .route(
            "/api/contests/{id}",
            delete(contests::delete_contest).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::CONTEST_BY_ID),
                validate_request,
            )),
        )
        .route(
            "/api/contests/{id}/submissions",
            get(submissions::list_submissions).route_layer(
                axum_middleware::from_fn_with_state(
                    guard(&schemas::CONTEST_BY_ID),
                    validate_request,
                ),
            ),
        )
        .route(
            "/api/contests/{id}/submissions",
            post(submissions::create_submission).route_layer(
                axum_middleware::from_fn_with_state(
                    guard(&schemas::CREATE_SUBMISSION),
                    validate_request,
                ),
            ),
        );

    let user_routes = Router::new()
        .route(
            "/api/users",
            get(users::list_users).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::LIST_USERS),
                validate_request,
            )),
        )
        .route(
            "/api/users",
            post(users::create_user).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::CREATE_USER),
                validate_request,
            )),
        )
        .route(
            "/api/users/{id}",
            get(users::get_user).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::USER_BY_ID),
                validate_request,
            )),
        )
        .route(
            "/api/users/{id}",
            put(users::update_user).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::UPDATE_USER),
                validate_request,
            )),
        )
        .route(
            "/api/users/{id}/role",
            put(users::update_user_role).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::UPDATE_USER_ROLE),
                validate_request,
            )),
        );

    let payment_routes = Router::new()
        .route(
            "/api/payments",
            post(payments::create_payment).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::CREATE_PAYMENT),
                validate_request,
            )),
        )
        .route(
            "/api/payments/{id}",
            get(payments::get_payment).route_layer(axum_middleware::from_fn_with_state(
                guard(&schemas::PAYMENT_BY_ID),
                validate_request,
            )),
        );

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health))
        .merge(contest_routes)
        .merge(user_routes)
        .merge(payment_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum_middleware::from_fn(log_error_responses)),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allow_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60))
}
