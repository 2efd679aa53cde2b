use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "OK", body = HealthData),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
    })
}
