//! Report endpoints: the administrative "generate report for range"
//! action plus read access for the admin UI.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{EntityTrait, ModelTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::validated_json::ValidatedJson,
    app::App,
    database::models::{job_snapshot, order_snapshot, report, user_snapshot},
    stats::{
        self,
        quarter::{Quarter, ReportRange},
        StatsError,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error("report not found")]
    NotFound,
    #[error("database error")]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Stats(StatsError::InvalidQuarter(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            Self::Stats(StatsError::Database(_)) | Self::Database(_) => {
                tracing::error!("report request failed: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateReportRequest {
    pub quarter_from: String,
    #[validate(range(min = 1970, max = 9999))]
    pub year_from: i32,
    pub quarter_to: String,
    #[validate(range(min = 1970, max = 9999))]
    pub year_to: i32,
}

impl GenerateReportRequest {
    fn range(&self) -> Result<ReportRange, StatsError> {
        Ok(ReportRange::new(
            Quarter::parse(&self.quarter_from)?,
            self.year_from,
            Quarter::parse(&self.quarter_to)?,
            self.year_to,
        ))
    }
}

/// `POST /api/reports` — runs all three aggregators for the requested
/// range and returns the resolved report with its snapshots.
pub async fn create(
    State(app): State<App>,
    ValidatedJson(request): ValidatedJson<GenerateReportRequest>,
) -> Result<(StatusCode, Json<stats::GeneratedReport>), ApiError> {
    let range = request.range()?;
    let generated = stats::generate_report(&app.db, &range).await?;
    Ok((StatusCode::CREATED, Json(generated)))
}

/// `GET /api/reports` — all reports, newest first.
pub async fn index(State(app): State<App>) -> Result<Json<Vec<report::Model>>, ApiError> {
    let reports = report::Entity::find()
        .order_by_desc(report::Column::CreatedAt)
        .all(&app.db)
        .await?;
    Ok(Json(reports))
}

#[derive(Debug, Serialize)]
pub struct ReportWithSnapshots {
    #[serde(flatten)]
    pub report: report::Model,
    pub jobs: Option<job_snapshot::Model>,
    pub orders: Option<order_snapshot::Model>,
    pub users: Option<user_snapshot::Model>,
}

/// `GET /api/reports/{id}` — one report with whatever snapshots exist
/// for it.
pub async fn show(
    State(app): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<ReportWithSnapshots>, ApiError> {
    let report = report::Entity::find_by_id(id)
        .one(&app.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let jobs = report.find_related(job_snapshot::Entity).one(&app.db).await?;
    let orders = report
        .find_related(order_snapshot::Entity)
        .one(&app.db)
        .await?;
    let users = report.find_related(user_snapshot::Entity).one(&app.db).await?;

    Ok(Json(ReportWithSnapshots {
        report,
        jobs,
        orders,
        users,
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::tests::setup_test::test_server;

    #[tokio::test]
    async fn create_generates_a_report_with_snapshots() {
        let (server, _db) = test_server().await;

        let response = server
            .post("/api/reports")
            .json(&json!({
                "quarter_from": "Q1",
                "year_from": 2024,
                "quarter_to": "Q1",
                "year_to": 2024,
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["report"]["title"], "Report 2024Q1 - 2024Q1");
        assert_eq!(body["jobs"]["total_jobs"], 0);
        assert_eq!(body["users"]["new_users"], 0);
    }

    #[tokio::test]
    async fn create_rejects_an_invalid_quarter_label() {
        let (server, _db) = test_server().await;

        let response = server
            .post("/api/reports")
            .json(&json!({
                "quarter_from": "Q5",
                "year_from": 2024,
                "quarter_to": "Q1",
                "year_to": 2024,
            }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Q5"));
    }

    #[tokio::test]
    async fn create_rejects_an_out_of_bounds_year() {
        let (server, _db) = test_server().await;

        let response = server
            .post("/api/reports")
            .json(&json!({
                "quarter_from": "Q1",
                "year_from": 123,
                "quarter_to": "Q1",
                "year_to": 2024,
            }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn index_lists_generated_reports() {
        let (server, _db) = test_server().await;

        for quarter in ["Q1", "Q2"] {
            server
                .post("/api/reports")
                .json(&json!({
                    "quarter_from": quarter,
                    "year_from": 2024,
                    "quarter_to": quarter,
                    "year_to": 2024,
                }))
                .await
                .assert_status(axum::http::StatusCode::CREATED);
        }

        let response = server.get("/api/reports").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn show_returns_the_report_with_snapshots() {
        let (server, _db) = test_server().await;

        let created = server
            .post("/api/reports")
            .json(&json!({
                "quarter_from": "Q3",
                "year_from": 2023,
                "quarter_to": "Q4",
                "year_to": 2023,
            }))
            .await;
        let id = created.json::<serde_json::Value>()["report"]["id"]
            .as_i64()
            .unwrap();

        let response = server.get(&format!("/api/reports/{id}")).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["title"], "Report 2023Q3 - 2023Q4");
        assert_eq!(body["jobs"]["total_jobs"], 0);
    }

    #[tokio::test]
    async fn show_returns_not_found_for_a_missing_report() {
        let (server, _db) = test_server().await;

        let response = server.get("/api/reports/999").await;
        response.assert_status_not_found();
    }
}
