// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::agence::AgenceScope,
    models::dashboard::{ResumeDashboard, RevenuMensuel},
};

// GET /api/dashboard/resume
#[utoipa::path(
    get,
    path = "/api/dashboard/resume",
    tag = "Dashboard",
    responses((status = 200, description = "Compteurs et totaux mensuels", body = ResumeDashboard)),
    security(("api_jwt" = []))
)]
pub async fn resume(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
) -> Result<Json<ResumeDashboard>, AppError> {
    let resume = app_state.dashboard_service.resume(agence).await?;
    Ok(Json(resume))
}

// GET /api/dashboard/revenus-mensuels
#[utoipa::path(
    get,
    path = "/api/dashboard/revenus-mensuels",
    tag = "Dashboard",
    responses((status = 200, description = "Douze mois glissants, du plus ancien au plus récent", body = Vec<RevenuMensuel>)),
    security(("api_jwt" = []))
)]
pub async fn revenus_mensuels(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
) -> Result<Json<Vec<RevenuMensuel>>, AppError> {
    let revenus = app_state.dashboard_service.revenus_mensuels(agence).await?;
    Ok(Json(revenus))
}
