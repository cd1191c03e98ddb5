use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::catalog::StockBin;
use crate::category::{category_list, Category, CategoryInfo};
use crate::charts::ChartKind;
use crate::dashboard::{Dashboard, PanelSnapshot, Selection};
use crate::error::DashboardError;

pub struct AppState {
    pub dashboard: Dashboard,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::UnknownStock(_) => ApiError::NotFound(err.to_string()),
            DashboardError::UnknownCategory(_) => ApiError::BadRequest(err.to_string()),
            DashboardError::Serialize(e) => {
                error!("❌ [API] Failed to serialize panel: {}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(get_catalog))
        .route("/categories", get(get_categories))
        .route("/selection", get(get_selection))
        .route("/selection/stock", post(select_stock))
        .route("/selection/category", post(select_category))
        .route("/panel", get(get_panel))
        .route("/charts/{kind}/loaded", post(chart_loaded))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>, bind_addr: &str) -> std::io::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("🌐 [API] Server listening on {}", bind_addr);
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<Vec<StockBin>> {
    Json(state.dashboard.catalog().bins().to_vec())
}

async fn get_categories() -> Json<Vec<CategoryInfo>> {
    Json(category_list())
}

pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<Selection> {
    Json(state.dashboard.selection())
}

#[derive(Debug, Deserialize)]
pub struct SelectStock {
    pub stock_id: u32,
}

pub async fn select_stock(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectStock>,
) -> Result<Json<PanelSnapshot>, ApiError> {
    let activation = state.dashboard.select_stock(body.stock_id)?;
    Ok(Json(activation.snapshot))
}

#[derive(Debug, Deserialize)]
pub struct SelectCategory {
    pub category: String,
}

pub async fn select_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectCategory>,
) -> Result<Json<PanelSnapshot>, ApiError> {
    let category = Category::parse(&body.category)
        .ok_or_else(|| DashboardError::UnknownCategory(body.category.clone()))?;
    let activation = state.dashboard.select_category(category)?;
    Ok(Json(activation.snapshot))
}

pub async fn get_panel(State(state): State<Arc<AppState>>) -> Result<Json<PanelSnapshot>, ApiError> {
    let activation = state.dashboard.current_panel()?;
    Ok(Json(activation.snapshot))
}

#[derive(Debug, Deserialize)]
pub struct ChartLoaded {
    pub stock_id: u32,
}

pub async fn chart_loaded(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(body): Json<ChartLoaded>,
) -> Result<Json<PanelSnapshot>, ApiError> {
    let kind = ChartKind::parse(&kind)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown chart {}", kind)))?;
    Ok(Json(state.dashboard.mark_chart_loaded(kind, body.stock_id)?))
}
