use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::CatalogError;
use crate::models::{
    ChartKind, PersonRecord, Review, SearchResults, SearchScope, TitleRecord, TitleSummary,
};
use crate::preferences::{JsonFileBackend, Preferences};
use crate::store::Store;
use crate::tmdb::{TmdbApi, TmdbClient};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(tmdb: Arc<dyn TmdbApi>, store: Arc<Store>) -> Self {
        Self {
            catalog: Catalog::new(tmdb),
            store,
        }
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::from_config(&config)?);
    let backend = Arc::new(JsonFileBackend::new(config.prefs_path.clone()));
    let store = Arc::new(Store::new(backend));
    let state = AppState::new(tmdb, store);

    let app = build_router(state);

    info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/titles/:id", get(get_title))
        .route("/titles/:id/reviews", get(get_reviews))
        .route("/names/:id", get(get_person))
        .route("/charts/:kind", get(get_chart))
        .route("/home", get(get_home))
        .route("/search", get(search))
        .route("/favorites", get(list_favorites))
        .route("/favorites/:id", put(add_favorite).delete(remove_favorite))
        .route("/preferences", get(get_preferences))
        .route("/preferences/theme/toggle", post(toggle_theme))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

enum ApiError {
    Catalog(CatalogError),
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Catalog(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Catalog(e) => {
                let status = match &e {
                    CatalogError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                    CatalogError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(e) => {
                error!("Request failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e))
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

async fn get_title(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<TitleRecord> {
    Ok(Json(state.store.load_title(&state.catalog, &id).await?))
}

async fn get_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Review>> {
    Ok(Json(state.catalog.reviews(&id).await?))
}

async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PersonRecord> {
    Ok(Json(state.catalog.resolve_person(&id).await?))
}

async fn get_chart(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Vec<TitleSummary>> {
    let chart: ChartKind = kind.parse().map_err(ApiError::BadRequest)?;
    Ok(Json(state.store.load_chart(&state.catalog, chart).await?))
}

async fn get_home(State(state): State<AppState>) -> Response {
    let slots = state.store.load_home(&state.catalog).await;
    Json(slots).into_response()
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    scope: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<SearchResults> {
    let scope: SearchScope = match params.scope.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => SearchScope::All,
    };
    Ok(Json(
        state
            .store
            .load_search(&state.catalog, &params.q, scope)
            .await?,
    ))
}

#[derive(Debug, Serialize)]
struct FavoriteChange {
    id: String,
    changed: bool,
    favorite: bool,
}

async fn list_favorites(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.favorites().iter().map(str::to_string).collect())
}

async fn add_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FavoriteChange> {
    let changed = state.store.add_favorite(&id)?;
    Ok(Json(FavoriteChange {
        favorite: state.store.is_favorite(&id),
        id,
        changed,
    }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FavoriteChange> {
    let changed = state.store.remove_favorite(&id)?;
    Ok(Json(FavoriteChange {
        favorite: state.store.is_favorite(&id),
        id,
        changed,
    }))
}

async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.store.preferences())
}

async fn toggle_theme(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    let dark_mode = state.store.toggle_dark_mode()?;
    Ok(Json(json!({ "darkMode": dark_mode })))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
