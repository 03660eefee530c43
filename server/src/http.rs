use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use mediadir_browse::BrowseError;
use mediadir_browse::BrowseRequest;
use mediadir_browse::BrowseResult;
use mediadir_browse::ContentDirectory;
use mediadir_browse::LocalFolderResolver;
use mediadir_browse::SharedConfig;
use mediadir_config::ConfigError;
use mediadir_config::ConfigurationEvent;
use mediadir_config::ConfigurationNode;
use mediadir_config::MediaConfig;
use mediadir_config::RootCategory;
use mediadir_index::IndexElement;
use mediadir_index::MediaIndex;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// Shared handles behind every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    directory: ContentDirectory<LocalFolderResolver>,
    config: SharedConfig,
    config_path: PathBuf,
    events: mpsc::UnboundedSender<ConfigurationEvent>,
}

impl AppState {
    pub fn new(
        index: MediaIndex,
        config: SharedConfig,
        config_path: PathBuf,
        http_base: impl Into<String>,
        events: mpsc::UnboundedSender<ConfigurationEvent>,
    ) -> Self {
        let resolver = LocalFolderResolver::new(config.clone());
        Self {
            inner: Arc::new(StateInner {
                directory: ContentDirectory::new(index, resolver, http_base),
                config,
                config_path,
                events,
            }),
        }
    }

    pub fn index(&self) -> &MediaIndex {
        self.inner.directory.index()
    }

    /// Applies `edit` to a copy of the configuration, persists it, publishes
    /// it and forwards the resulting event to the index.
    ///
    /// The event is queued before the write lock is released, so the bridge
    /// sees edits in commit order.
    fn edit_config<F>(&self, edit: F) -> Result<ConfigurationEvent, AppError>
    where
        F: FnOnce(&mut MediaConfig) -> mediadir_config::Result<ConfigurationEvent>,
    {
        let mut config = self.inner.config.write();
        let mut next = config.clone();
        let event = edit(&mut next)?;
        next.save(&self.inner.config_path)?;
        *config = next;
        self.inner
            .events
            .send(event.clone())
            .map_err(|_| AppError::internal("configuration bridge is not running"))?;
        drop(config);
        Ok(event)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/browse", post(browse_handler))
        .route("/v1/nodes/{id}", get(node_handler))
        .route(
            "/v1/folders/{category}",
            get(list_folders_handler).post(add_folder_handler),
        )
        .route(
            "/v1/folders/{category}/{id}",
            put(update_folder_handler).delete(delete_folder_handler),
        )
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub entries: usize,
}

#[derive(Debug, Serialize)]
pub struct NodeResponse {
    pub id: String,
    pub element: IndexElement,
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FolderRequest {
    pub label: String,
    pub path: String,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        entries: state.index().len(),
    })
}

async fn browse_handler(
    State(state): State<AppState>,
    Json(request): Json<BrowseRequest>,
) -> Result<Json<BrowseResult>, AppError> {
    let result = tokio::task::spawn_blocking(move || state.inner.directory.browse(&request))
        .await
        .map_err(AppError::internal)??;
    Ok(Json(result))
}

async fn node_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeResponse>, AppError> {
    let element = state.index().lookup(&id).map_err(BrowseError::from)?;
    let location = state.inner.directory.backing_location(&id)?;
    Ok(Json(NodeResponse {
        id,
        element,
        location,
    }))
}

async fn list_folders_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ConfigurationNode>>, AppError> {
    let category = parse_category(&category)?;
    let folders = state.inner.config.read().folders(category).to_vec();
    Ok(Json(folders))
}

async fn add_folder_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(request): Json<FolderRequest>,
) -> Result<(StatusCode, Json<ConfigurationEvent>), AppError> {
    let category = parse_category(&category)?;
    let event = tokio::task::spawn_blocking(move || {
        state.edit_config(|config| config.add_folder(category, &request.label, &request.path))
    })
    .await
    .map_err(AppError::internal)??;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_folder_handler(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
    Json(request): Json<FolderRequest>,
) -> Result<Json<ConfigurationEvent>, AppError> {
    let category = parse_category(&category)?;
    let event = tokio::task::spawn_blocking(move || {
        state.edit_config(|config| {
            config.update_folder(category, &id, &request.label, &request.path)
        })
    })
    .await
    .map_err(AppError::internal)??;
    Ok(Json(event))
}

async fn delete_folder_handler(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<ConfigurationEvent>, AppError> {
    let category = parse_category(&category)?;
    let event = tokio::task::spawn_blocking(move || {
        state.edit_config(|config| config.delete_folder(category, &id))
    })
    .await
    .map_err(AppError::internal)??;
    Ok(Json(event))
}

fn parse_category(slug: &str) -> Result<RootCategory, AppError> {
    RootCategory::from_slug(slug).ok_or_else(|| AppError {
        status: StatusCode::NOT_FOUND,
        code: None,
        message: format!("unknown category {slug}"),
    })
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    /// ContentDirectory error code, for browse failures.
    code: Option<u16>,
    message: String,
}

impl AppError {
    fn internal(err: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: None,
            message: err.to_string(),
        }
    }
}

impl From<BrowseError> for AppError {
    fn from(err: BrowseError) -> Self {
        let status = match err {
            BrowseError::UnknownNode(_) => StatusCode::NOT_FOUND,
            BrowseError::CannotProcess(_) | BrowseError::Io { .. } => {
                warn!("browse failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            code: Some(err.upnp_code()),
            message: err.to_string(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        let status = match err {
            ConfigError::UnknownNode { .. } => StatusCode::NOT_FOUND,
            ConfigError::DuplicateFolder { .. } | ConfigError::InvalidFolder(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => {
                warn!("configuration update failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            code: None,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self.code {
            Some(code) => serde_json::json!({ "error": self.message, "code": code }),
            None => serde_json::json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
