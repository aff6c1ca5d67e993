use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::Repository;
use crate::handlers;
use crate::middleware::resolve_tenant_middleware;
use crate::services::{CommentService, OrganizationService, ProjectService, TaskService};

/// Shared per-process state. Holds no tenant data; the tenant is resolved per request.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub tenant_header: HeaderName,
    pub organizations: OrganizationService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub comments: CommentService,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, config: &AppConfig) -> anyhow::Result<Self> {
        let tenant_header = HeaderName::from_bytes(config.api.tenant_header.as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid tenant header '{}': {}", config.api.tenant_header, e))?;

        Ok(Self {
            organizations: OrganizationService::new(repo.clone()),
            projects: ProjectService::new(repo.clone()),
            tasks: TaskService::new(repo.clone()),
            comments: CommentService::new(repo.clone()),
            tenant_header,
            repo,
        })
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(organization_routes())
        // Tenant-scoped; every handler passes the gate itself
        .merge(project_routes())
        .merge(task_routes())
        .merge(comment_routes())
        // The resolver runs for every route and never rejects
        .layer(middleware::from_fn_with_state(state.clone(), resolve_tenant_middleware))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(config, &state.tenant_header));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn organization_routes() -> Router<AppState> {
    use handlers::public::organization;

    Router::new()
        .route("/api/organizations", get(organization::list).post(organization::create))
        .route("/api/organizations/current", get(organization::current))
}

fn project_routes() -> Router<AppState> {
    use handlers::protected::project;

    Router::new()
        .route("/api/projects", get(project::list).post(project::create))
        .route("/api/projects/:id", patch(project::update))
}

fn task_routes() -> Router<AppState> {
    use handlers::protected::task;

    Router::new()
        .route("/api/projects/:project_id/tasks", get(task::list).post(task::create))
        .route("/api/tasks/:id", patch(task::update))
}

fn comment_routes() -> Router<AppState> {
    use handlers::protected::comment;

    Router::new().route("/api/tasks/:task_id/comments", get(comment::list).post(comment::add))
}

fn cors_layer(config: &AppConfig, tenant_header: &HeaderName) -> CorsLayer {
    let origins = &config.security.cors_origins;
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| HeaderValue::from_str(o).ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, tenant_header.clone()])
}
