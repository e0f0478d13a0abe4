use crate::errors::AppError;
use crate::jwt;
use crate::models::{Credentials, Gerbang, GerbangPatch, NewGerbang, Page, Pagination, PaymentMethod, User};
use crate::service::{ReportPage, ReportQuery};
use crate::state::AppState;
use crate::stats::DashboardData;
use crate::ui;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: bool,
    pub message: String,
    pub user: Option<User>,
    pub session_remaining: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: bool,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub tanggal: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub tanggal: Option<String>,
    pub search: Option<String>,
    pub method: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ReportParams {
    fn into_query(self, fallback_date: Option<String>) -> Result<ReportQuery, AppError> {
        let method = match self.method.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.parse::<PaymentMethod>()?,
            _ => PaymentMethod::default(),
        };
        Ok(ReportQuery {
            tanggal: self.tanggal.or(fallback_date),
            search: self.search,
            method,
            pagination: Pagination::new(
                self.page.unwrap_or(1),
                self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            ),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GerbangListParams {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id_cabang: Option<i64>,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let Ok(user) = state.auth.require_user().await else {
        return Ok(Html(ui::render_login()));
    };
    let date = state.config.default_date_string();
    let data = state.dashboard.get_dashboard(&date, None).await?;
    Ok(Html(ui::render_dashboard(&user, &date, &data)))
}

pub async fn printable_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Response, AppError> {
    if state.auth.require_user().await.is_err() {
        return Ok(Redirect::to("/").into_response());
    }
    let query = params.into_query(Some(state.config.default_date_string()))?;
    let page = state.report.get_report(query).await?;
    let printed_at = Local::now().format("%d/%m/%Y %H:%M").to_string();
    Ok(Html(ui::render_report(&page, &printed_at)).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.auth.login(credentials).await?;
    Ok(Json(auth_response("Login berhasil", user)))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    state.auth.logout().await?;
    Ok(Json(MessageResponse {
        status: true,
        message: "Logout berhasil".to_string(),
    }))
}

pub async fn me(State(state): State<AppState>) -> Result<Json<AuthResponse>, AppError> {
    let user = state.auth.require_user().await?;
    Ok(Json(auth_response("OK", user)))
}

fn auth_response(message: &str, user: User) -> AuthResponse {
    let session_remaining = jwt::minutes_until_expiration(&user.token).map(jwt::format_remaining);
    AuthResponse {
        status: true,
        message: message.to_string(),
        user: Some(user),
        session_remaining,
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardData>, AppError> {
    state.auth.require_user().await?;
    let date = params
        .tanggal
        .unwrap_or_else(|| state.config.default_date_string());
    let data = state.dashboard.get_dashboard(&date, params.limit).await?;
    Ok(Json(data))
}

pub async fn report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<ReportPage>, AppError> {
    state.auth.require_user().await?;
    let page = state.report.get_report(params.into_query(None)?).await?;
    Ok(Json(page))
}

pub async fn export_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Response, AppError> {
    state.auth.require_user().await?;
    let file = state.report.export_csv(params.into_query(None)?).await?;
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response())
}

pub async fn list_gerbangs(
    State(state): State<AppState>,
    Query(params): Query<GerbangListParams>,
) -> Result<Json<Page<Gerbang>>, AppError> {
    state.auth.require_user().await?;
    let pagination = Pagination::new(
        params.page.unwrap_or(1),
        params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    let page = state
        .gerbang
        .list(params.search.as_deref(), pagination)
        .await?;
    Ok(Json(page))
}

pub async fn get_gerbang(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Gerbang>, AppError> {
    state.auth.require_user().await?;
    Ok(Json(state.gerbang.get(id).await?))
}

pub async fn create_gerbang(
    State(state): State<AppState>,
    Json(input): Json<NewGerbang>,
) -> Result<(StatusCode, Json<Gerbang>), AppError> {
    state.auth.require_user().await?;
    let created = state.gerbang.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_gerbang(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<GerbangPatch>,
) -> Result<Json<Gerbang>, AppError> {
    state.auth.require_user().await?;
    Ok(Json(state.gerbang.update(id, patch).await?))
}

pub async fn delete_gerbang(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth.require_user().await?;
    state
        .gerbang
        .delete(id, params.id_cabang.unwrap_or_default())
        .await?;
    Ok(Json(MessageResponse {
        status: true,
        message: "Gerbang berhasil dihapus".to_string(),
    }))
}
