use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AddModulesOutcome, ClassDates, HolidayCalendarConfig, ModuleInput, ScheduleRegistry};

#[derive(Clone)]
pub struct AppState {
    registry: Arc<RwLock<ScheduleRegistry>>,
}

impl AppState {
    pub fn new(registry: ScheduleRegistry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    fn registry(&self) -> Arc<RwLock<ScheduleRegistry>> {
        self.registry.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct AddModulesPayload {
    class_name: String,
    #[serde(default)]
    modules: Vec<ModuleInput>,
}

#[derive(Debug, Serialize)]
struct AddModulesResponse {
    #[serde(flatten)]
    outcome: AddModulesOutcome,
    notice: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/modules", post(add_modules))
        .route("/schedules", get(list_schedules))
        .route("/schedules/:class_name", get(get_class_schedule))
        .route("/holidays", get(get_holidays))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, registry: ScheduleRegistry) -> std::io::Result<()> {
    let state = AppState::new(registry);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn add_modules(
    State(state): State<AppState>,
    Json(payload): Json<AddModulesPayload>,
) -> Result<(StatusCode, Json<AddModulesResponse>), ApiError> {
    let class_name = payload.class_name.trim();
    if class_name.is_empty() {
        return Err(ApiError::invalid("class_name must not be empty"));
    }
    if let Some(idx) = payload
        .modules
        .iter()
        .position(|module| module.module_name.trim().is_empty())
    {
        return Err(ApiError::invalid(format!(
            "modules[{idx}].module_name must not be empty"
        )));
    }
    let registry = state.registry();
    let outcome = {
        let mut guard = registry.write();
        guard.add_modules_to_class(class_name, payload.modules)
    };
    let notice = outcome.notice();
    Ok((StatusCode::CREATED, Json(AddModulesResponse { outcome, notice })))
}

async fn list_schedules(State(state): State<AppState>) -> Json<BTreeMap<String, ClassDates>> {
    let registry = state.registry();
    let schedules = {
        let guard = registry.read();
        guard.all_schedules()
    };
    Json(schedules)
}

async fn get_class_schedule(
    State(state): State<AppState>,
    Path(class_name): Path<String>,
) -> Result<Json<ClassDates>, ApiError> {
    let registry = state.registry();
    let result = {
        let guard = registry.read();
        guard.class_schedule(&class_name)
    };
    match result {
        Some(dates) => Ok(Json(dates)),
        None => Err(ApiError::not_found(format!("class {class_name} not found"))),
    }
}

async fn get_holidays(State(state): State<AppState>) -> Json<HolidayCalendarConfig> {
    let registry = state.registry();
    let config = {
        let guard = registry.read();
        guard.calendar().to_config()
    };
    Json(config)
}
