use crate::application::dto::{DashboardRequest, DashboardResponse};
use crate::application::use_cases::{CacheClearReport, ManageProjectsUseCase};
use crate::branch_status::domain::{ProjectReference, SyncState};
use crate::branch_status::services::{DashboardFilter, SortOrder};
use crate::config::parse_branch_list;
use crate::ports::inbound::DashboardQueryPort;
use crate::ports::outbound::ProjectRegistry;
use crate::shared::error::DashboardError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::error;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub dashboard: Arc<dyn DashboardQueryPort>,
    pub projects: ManageProjectsUseCase<dyn ProjectRegistry>,
}

pub type SharedState = Arc<AppState>;

// ── Request and response payloads ─────────────────────────────────────

/// Dashboard query string; blank values count as "not set"
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub search_query: Option<String>,
    pub min_feature_branches: Option<String>,
    pub max_open_mrs: Option<String>,
    pub main_sync_status: Option<String>,
    pub sort_order: Option<String>,
    /// Comma-separated default-branch override
    pub branches: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCacheRequest {
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub branches: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub branches: Vec<String>,
}

impl From<&ProjectReference> for ProjectView {
    fn from(reference: &ProjectReference) -> Self {
        Self {
            name: reference.identifier().to_string(),
            branches: reference.configured_branches().to_vec(),
        }
    }
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    BadGateway(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DashboardError>() {
            Some(DashboardError::Upstream { .. }) => ApiError::BadGateway(err.to_string()),
            Some(DashboardError::InvalidProjectIdentifier { .. })
            | Some(DashboardError::Validation { .. }) => ApiError::BadRequest(err.to_string()),
            _ => {
                error!(error = %err, "request failed");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

// ── Query parsing ─────────────────────────────────────────────────────

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_param<T: FromStr>(name: &str, value: &Option<String>) -> Result<Option<T>, ApiError>
where
    T::Err: std::fmt::Display,
{
    non_blank(value)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ApiError::BadRequest(format!("Invalid {}: {}", name, e)))
        })
        .transpose()
}

impl DashboardQuery {
    /// Converts the query string into a dashboard request
    pub fn into_request(self) -> Result<DashboardRequest, ApiError> {
        let filter = DashboardFilter {
            search_query: non_blank(&self.search_query).map(str::to_string),
            min_feature_branches: parse_param::<usize>(
                "min_feature_branches",
                &self.min_feature_branches,
            )?,
            max_open_change_requests: parse_param::<usize>("max_open_mrs", &self.max_open_mrs)?,
            sync_status: parse_param::<SyncState>("main_sync_status", &self.main_sync_status)?,
            sort_order: parse_param::<SortOrder>("sort_order", &self.sort_order)?
                .unwrap_or_default(),
        };

        let branches = non_blank(&self.branches).map(parse_branch_list);

        Ok(DashboardRequest::new(filter, branches))
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route("/api/cache", delete(clear_all_cache))
        .route("/api/cache/clear", post(clear_selected_cache))
        .route("/api/cache/{*project}", delete(clear_project_cache))
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{*name}", delete(delete_project))
}

pub fn build_router(state: SharedState) -> Router {
    api_router().with_state(state)
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health() -> &'static str {
    "ok"
}

async fn dashboard(
    State(state): State<SharedState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let request = query.into_request()?;
    let response = state.dashboard.query(request).await?;
    Ok(Json(response))
}

async fn clear_project_cache(
    State(state): State<SharedState>,
    Path(project): Path<String>,
) -> Json<CacheClearReport> {
    let removed = state.dashboard.clear_cache(&[project]);
    Json(CacheClearReport {
        requested: 1,
        removed,
    })
}

async fn clear_selected_cache(
    State(state): State<SharedState>,
    Json(body): Json<ClearCacheRequest>,
) -> Json<CacheClearReport> {
    let removed = state.dashboard.clear_cache(&body.projects);
    Json(CacheClearReport {
        requested: body.projects.len(),
        removed,
    })
}

async fn clear_all_cache(State(state): State<SharedState>) -> Json<CacheClearReport> {
    Json(state.dashboard.clear_all_cache())
}

async fn list_projects(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ProjectView>>, ApiError> {
    let projects = state.projects.list()?;
    Ok(Json(projects.iter().map(ProjectView::from).collect()))
}

async fn create_project(
    State(state): State<SharedState>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reference = state.projects.add(&body.name, body.branches)?;
    Ok((StatusCode::CREATED, Json(ProjectView::from(&reference))))
}

async fn delete_project(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.projects.remove(&name)? {
        // Drop stale status so a re-added project starts fresh
        state.dashboard.clear_cache(&[name]);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Project '{}' is not configured", name)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
