//! Main application router.

use crate::{
    controllers::{employee_controller, health_controller},
    middleware::{logging_middleware, REQUEST_ID_HEADER},
    openapi::ApiDoc,
    responses::ApiResponse,
    state::AppState,
};
use axum::{
    http::{HeaderName, HeaderValue, Method, StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use roster_config::ServerConfig;
use roster_core::ErrorResponse;
use roster_service::EmployeeService;
use shaku::{HasComponent, Module};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the application router from a Shaku module.
pub fn create_router_from_module<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: Module + HasComponent<dyn EmployeeService>,
{
    create_router(AppState::from_module(module), server_config)
}

/// Creates the application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/employees", employee_controller::router())
        .route("/", get(root))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(logging_middleware))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(TimeoutLayer::new(server_config.request_timeout()))
                .layer(create_cors_layer(server_config))
                .layer(CompressionLayer::new()),
        );

    info!("Router created with employee endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Roster employee directory API. Documentation at /swagger-ui"
}

/// Fallback for unknown routes.
async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    let error = ErrorResponse {
        code: "NOT_FOUND".to_string(),
        message: format!("No route for {method} {}", uri.path()),
        details: None,
    };
    (StatusCode::NOT_FOUND, Json(ApiResponse::<()>::error(error)))
}
