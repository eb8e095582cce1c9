//! Axum API Server Module
//!
//! JSON API over the tourism analytics: month overviews, place panels,
//! budgets, trip-summary download, and the event-driven session model.
//! Month overviews are cached per month; everything else is recomputed per
//! request from the immutable dataset.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::analytics::{place_profiles, top_places};
use crate::budget::{estimate_budget, validate_trip, TripSummary, TRIP_PLAN_FILE_NAME};
use crate::config::AppConfig;
use crate::dashboard::{Dashboard, MonthPanel};
use crate::data::TourismData;
use crate::error::TourismError;
use crate::recommend::{best_season_for_place, suggest_alternatives, weather_tip};
use crate::session::{apply_event, place_options, reconcile, Selection, SelectionEvent};
use crate::utils::calendar::{Month, MONTH_ORDER};

/// Upper bound on requested alternatives
const MAX_ALTERNATIVES: usize = 20;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<TourismData>,
    pub config: Arc<AppConfig>,
    pub month_cache: Cache<Month, MonthPanel>,
}

impl AppState {
    /// Load the dataset named by the configuration
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading dataset from {}", config.data_path.display());
        let data = TourismData::load(&config.data_path)?;
        Ok(Self::from_data(data, config))
    }

    pub fn from_data(data: TourismData, config: AppConfig) -> Self {
        // One entry per month at most
        let month_cache = Cache::builder()
            .max_capacity(MONTH_ORDER.len() as u64)
            .time_to_live(Duration::from_secs(3600))
            .build();

        Self {
            data: Arc::new(data),
            config: Arc::new(config),
            month_cache,
        }
    }

    async fn month_panel(&self, month: Month) -> MonthPanel {
        let data = Arc::clone(&self.data);
        let top_k = self.config.top_states;
        self.month_cache
            .get_with(month, async move { MonthPanel::compute(&data, month, top_k) })
            .await
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Month overview
        .route("/api/months", get(list_months))
        .route("/api/months/:month/overview", get(month_overview))

        // Place panels
        .route("/api/places", get(list_places))
        .route("/api/places/:place/season", get(place_season))
        .route("/api/alternatives", get(alternatives))
        .route("/api/distribution", get(distribution))

        // Budget and export
        .route("/api/budget", get(budget))
        .route("/api/trip-summary", post(trip_summary))

        // Event-driven session
        .route("/api/session", post(session))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ScopeParams {
    pub month: String,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct AlternativesParams {
    pub month: String,
    pub state: String,
    pub place: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetParams {
    pub month: String,
    pub state: String,
    pub place: String,
    pub travelers: Option<u32>,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TripSummaryRequest {
    pub user: String,
    pub email: String,
    pub month: String,
    pub state: String,
    pub place: String,
    pub travelers: u32,
    pub days: u32,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub selection: Option<Selection>,
    #[serde(default)]
    pub event: Option<SelectionEvent>,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "rows": state.data.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_months(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "months": MONTH_ORDER,
        "with_data": state.data.months_with_data(),
    }))
}

async fn month_overview(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<MonthPanel>, AppError> {
    let month = parse_month(&month)?;
    Ok(Json(state.month_panel(month).await))
}

async fn list_places(
    State(state): State<AppState>,
    Query(params): Query<ScopeParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let month = parse_month(&params.month)?;
    let places = place_options(&state.data, month, &params.state);

    Ok(Json(serde_json::json!({
        "month": month,
        "state": params.state,
        "places": places,
    })))
}

async fn place_season(
    State(state): State<AppState>,
    Path(place): Path<String>,
) -> Json<serde_json::Value> {
    let outlook = best_season_for_place(state.data.records(), &place);

    Json(serde_json::json!({
        "place": place,
        "season": outlook.season,
        "top_months": outlook.top_months,
        "weather_tip": weather_tip(outlook.season),
    }))
}

async fn alternatives(
    State(state): State<AppState>,
    Query(params): Query<AlternativesParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let month = parse_month(&params.month)?;
    let top_n = params
        .top_n
        .unwrap_or(state.config.alternatives)
        .min(MAX_ALTERNATIVES);

    let scope = state.data.scope(month, &params.state);
    let suggestions = suggest_alternatives(scope.iter().copied(), &params.place, top_n);

    Ok(Json(serde_json::json!({
        "place": params.place,
        "alternatives": suggestions,
    })))
}

async fn distribution(
    State(state): State<AppState>,
    Query(params): Query<ScopeParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let month = parse_month(&params.month)?;
    let scope = state.data.scope(month, &params.state);

    Ok(Json(serde_json::json!({
        "top_places": top_places(scope.iter().copied(), state.config.top_places),
        "profiles": place_profiles(scope.iter().copied()),
    })))
}

async fn budget(
    State(state): State<AppState>,
    Query(params): Query<BudgetParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let month = parse_month(&params.month)?;
    let defaults = Selection::default();
    let scope = state.data.scope(month, &params.state);

    let estimate = estimate_budget(
        scope.iter().copied(),
        &params.place,
        params.travelers.unwrap_or(defaults.travelers),
        params.days.unwrap_or(defaults.days),
    )?
    .ok_or_else(|| AppError::NotFound(format!("No data for {} in {} ({})", params.place, params.state, month)))?;

    Ok(Json(serde_json::json!({
        "estimate": estimate,
        "breakdown": estimate.breakdown(),
    })))
}

async fn trip_summary(
    State(state): State<AppState>,
    Json(request): Json<TripSummaryRequest>,
) -> Result<Response, AppError> {
    let (user, email) = (request.user.trim(), request.email.trim());
    if user.is_empty() || email.is_empty() {
        return Err(TourismError::InvalidSignIn.into());
    }

    let month = parse_month(&request.month)?;
    let scope = state.data.scope(month, &request.state);
    let estimate = estimate_budget(scope.iter().copied(), &request.place, request.travelers, request.days)?
        .ok_or_else(|| AppError::NotFound(format!("No data for {} in {} ({})", request.place, request.state, month)))?;

    let summary = TripSummary::new(user, email, month, &request.state, &estimate);
    let csv = summary.to_csv()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TRIP_PLAN_FILE_NAME),
            ),
        ],
        csv,
    )
        .into_response())
}

async fn session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let top_k = state.config.top_states;
    let supplied = request.selection.unwrap_or_default();
    validate_trip(supplied.travelers, supplied.days)?;
    let current = reconcile(&state.data, supplied, top_k);

    let selection = match request.event {
        Some(event) => apply_event(&state.data, &current, event, top_k)?,
        None => current,
    };

    let dashboard = Dashboard::build(&state.data, &selection, &state.config);

    Ok(Json(serde_json::json!({
        "selection": selection,
        "dashboard": dashboard,
    })))
}

fn parse_month(raw: &str) -> Result<Month, AppError> {
    raw.parse::<Month>().map_err(AppError::from)
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<TourismError> for AppError {
    fn from(err: TourismError) -> Self {
        match err {
            TourismError::InvalidMonth(_)
            | TourismError::InvalidTripParameters(_)
            | TourismError::InvalidSignIn => AppError::BadRequest(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
