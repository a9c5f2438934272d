//! Export wizard routes.
//!
//! The two wizard steps surface as REST endpoints: `GET /exports/new` is the
//! selection step (form defaults), `POST /exports` is the submit transition
//! that generates the CSV payload. `GET /reports` backs the report selection
//! field.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use tessera_core::export::{ExportError, ExportForm, ReportMeta, WizardError};
use tessera_shared::AppError;
use tessera_shared::types::{ExportRunId, PartyId};

/// Creates the export routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(list_reports))
        .route("/exports/new", get(new_export))
        .route("/exports", post(run_export))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for the selection-defaults endpoint.
#[derive(Debug, Deserialize)]
pub struct NewExportQuery {
    /// Report key to pre-select.
    pub report: String,
}

/// Request body for running an export.
#[derive(Debug, Deserialize)]
pub struct RunExportRequest {
    /// Report key (required).
    pub report: String,
    /// Start date; defaults to the first day of the current month.
    pub from_date: Option<NaiveDate>,
    /// End date; defaults to today.
    pub to_date: Option<NaiveDate>,
    /// Party filter.
    pub party: Option<PartyId>,
}

/// Response for a finished export.
#[derive(Debug, Serialize)]
pub struct RunExportResponse {
    /// Download filename.
    pub filename: String,
    /// Base64-encoded CSV content.
    pub file: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Lists all registered reports for the selection field.
async fn list_reports(State(state): State<AppState>) -> Json<Vec<ReportMeta>> {
    Json(state.registry.list())
}

/// Returns the selection form pre-filled with default dates.
async fn new_export(
    State(state): State<AppState>,
    Query(query): Query<NewExportQuery>,
) -> Json<ExportForm> {
    Json(state.wizard().default_form(query.report))
}

/// Submits the selection form and returns the generated CSV payload.
async fn run_export(
    State(state): State<AppState>,
    Json(body): Json<RunExportRequest>,
) -> Response {
    let mut wizard = state.wizard();

    let mut form = wizard.default_form(body.report);
    if let Some(from_date) = body.from_date {
        form.from_date = from_date;
    }
    if let Some(to_date) = body.to_date {
        form.to_date = to_date;
    }
    form.party = body.party;

    let run_id = ExportRunId::new();
    match wizard.submit(&form) {
        Ok(payload) => {
            info!(run_id = %run_id, report = %form.report, "export generated");
            (
                StatusCode::OK,
                Json(RunExportResponse {
                    filename: payload.filename,
                    file: payload.file,
                }),
            )
                .into_response()
        }
        Err(err) => error_response(run_id, &err),
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps a wizard failure onto the application error taxonomy and renders it.
fn error_response(run_id: ExportRunId, err: &WizardError) -> Response {
    let app_err = match err {
        WizardError::Export(ExportError::UnknownReport(key)) => {
            AppError::NotFound(format!("no report registered under '{key}'"))
        }
        WizardError::Export(ExportError::DuplicateReport(key)) => {
            AppError::Conflict(format!("report already registered under '{key}'"))
        }
        WizardError::InvalidTransition { .. } => AppError::Validation(err.to_string()),
        WizardError::Export(_) => {
            error!(run_id = %run_id, error = %err, "export run failed");
            AppError::Internal("An error occurred".to_string())
        }
    };

    let status = StatusCode::from_u16(app_err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match &app_err {
        AppError::NotFound(msg)
        | AppError::Validation(msg)
        | AppError::Conflict(msg)
        | AppError::Internal(msg) => msg.clone(),
    };

    (
        status,
        Json(json!({
            "error": app_err.error_code().to_ascii_lowercase(),
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::{AppState, create_router};
    use tessera_core::export::{ExportError, ReportRegistry};
    use tessera_shared::clock::FixedClock;

    fn test_app() -> Router {
        let mut registry = ReportRegistry::new();
        registry
            .register_fn("daily", "Daily Summary Report", |_, out| {
                out.write_all(b"a,b\n1,2\n").map_err(ExportError::Spool)
            })
            .unwrap();

        let state = AppState {
            registry: Arc::new(registry),
            clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 8, 19).unwrap())),
            spool_dir: None,
        };
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_reports() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reports")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!([
                { "key": "daily", "description": "Daily Summary Report" }
            ])
        );
    }

    #[tokio::test]
    async fn test_new_export_returns_default_dates() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/exports/new?report=daily")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["from_date"], "2026-08-01");
        assert_eq!(json["to_date"], "2026-08-19");
        assert_eq!(json["report"], "daily");
    }

    #[tokio::test]
    async fn test_run_export_returns_payload() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/exports")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"report":"daily"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["filename"], "daily.csv");
        assert_eq!(json["file"], BASE64.encode(b"a,b\n1,2\n"));
    }

    #[tokio::test]
    async fn test_run_export_unknown_report_is_404() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/exports")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"report":"missing"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "not_found");
    }
}
