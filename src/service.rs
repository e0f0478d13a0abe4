//! Use cases: input validation, repository calls and result shaping.

use crate::api::ApiError;
use crate::errors::AppError;
use crate::export::{self, ExportFile};
use crate::jwt;
use crate::models::{
    Credentials, Gerbang, GerbangPatch, LalinFilter, NewGerbang, Page, Pagination, PaymentMethod,
    User,
};
use crate::report::{self, GateDirectory, ReportRow, ReportTable};
use crate::repository::{ALL_GATES_LIMIT, GerbangRepository, LalinRepository, UserRepository};
use crate::session::{Session, SessionStore};
use crate::stats::{self, DashboardData};
use crate::validation::{check_date, sanitize_string, validate_min_len, validate_required};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Default number of traffic records pulled for the dashboard charts.
pub const DASHBOARD_LIMIT: u32 = 2000;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, session: Arc<dyn SessionStore>) -> Self {
        Self { users, session }
    }

    pub async fn login(&self, credentials: Credentials) -> Result<User, AppError> {
        let errors = validate_credentials(&credentials);
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let credentials = Credentials {
            username: sanitize_string(&credentials.username),
            password: credentials.password,
        };

        let response = self
            .users
            .login(&credentials)
            .await
            .map_err(|err| match err {
                ApiError::Status { status, message } if status.as_u16() == 401 => {
                    AppError::login_failed(message)
                }
                other => AppError::from(other),
            })?;

        if !response.status || response.is_logged_in != 1 || response.token.is_empty() {
            let message = if response.message.is_empty() {
                "Login failed".to_string()
            } else {
                response.message
            };
            warn!(username = %credentials.username, "login rejected: {message}");
            return Err(AppError::login_failed(message));
        }

        let session = Session::new(credentials.username, response.token);
        self.session.save(session.clone()).await?;
        info!(username = %session.username, "user logged in");
        Ok(user_from_session(&session))
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.clear().await?;
        info!("user logged out");
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, AppError> {
        self.session
            .load()
            .await
            .filter(Session::is_active)
            .map(|session| user_from_session(&session))
            .ok_or_else(|| AppError::auth("User not found"))
    }

    pub async fn is_authenticated(&self) -> bool {
        self.require_user().await.is_ok()
    }

    /// The logged-in user; an expired token ends the session.
    pub async fn require_user(&self) -> Result<User, AppError> {
        let user = self.current_user().await?;
        if jwt::is_expired(&user.token) {
            warn!(username = %user.username, "session token expired");
            self.session.clear().await?;
            return Err(AppError::auth("Token expired"));
        }
        Ok(user)
    }

    /// Startup check of a persisted session.
    pub async fn restore(&self) -> Option<User> {
        match self.session.load().await {
            Some(session) if session.is_active() && !jwt::is_expired(&session.token) => {
                info!(username = %session.username, "session restored");
                Some(user_from_session(&session))
            }
            Some(_) => {
                warn!("discarding stored session");
                if let Err(err) = self.session.clear().await {
                    err.log();
                }
                None
            }
            None => None,
        }
    }
}

fn user_from_session(session: &Session) -> User {
    let id = jwt::decode_claims(&session.token)
        .and_then(|claims| claims.id)
        .unwrap_or(1);
    User {
        id,
        username: session.username.clone(),
        token: session.token.clone(),
        is_logged_in: session.is_logged_in,
    }
}

pub fn validate_credentials(credentials: &Credentials) -> Vec<String> {
    [
        validate_required(&credentials.username, "Username"),
        validate_required(&credentials.password, "Password"),
        validate_min_len(&credentials.password, "Password", 6),
        validate_min_len(&credentials.username, "Username", 3),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub struct GerbangService {
    gerbangs: Arc<dyn GerbangRepository>,
}

impl GerbangService {
    pub fn new(gerbangs: Arc<dyn GerbangRepository>) -> Self {
        Self { gerbangs }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Page<Gerbang>, AppError> {
        let search = search.map(sanitize_string).filter(|value| !value.is_empty());
        let page = match search {
            Some(query) => self.gerbangs.search(&query, pagination).await?,
            None => self.gerbangs.list(pagination).await?,
        };
        Ok(page)
    }

    pub async fn get(&self, id: i64) -> Result<Gerbang, AppError> {
        if id <= 0 {
            return Err(AppError::bad_request("ID Gerbang tidak valid"));
        }
        self.gerbangs
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Gerbang tidak ditemukan"))
    }

    pub async fn create(&self, input: NewGerbang) -> Result<Gerbang, AppError> {
        let errors = validate_new_gerbang(&input);
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let input = NewGerbang {
            id: input.id,
            branch_id: input.branch_id,
            gate_name: sanitize_string(&input.gate_name),
            branch_name: sanitize_string(&input.branch_name),
        };
        let created = self.gerbangs.create(&input).await?;
        info!(id = created.id, branch = created.branch_id, "gerbang created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, patch: GerbangPatch) -> Result<Gerbang, AppError> {
        let mut errors = Vec::new();
        if id <= 0 {
            errors.push("ID Gerbang tidak valid".to_string());
        }
        errors.extend(validate_gerbang_patch(&patch));
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let patch = GerbangPatch {
            branch_id: patch.branch_id,
            gate_name: patch.gate_name.as_deref().map(sanitize_string),
            branch_name: patch.branch_name.as_deref().map(sanitize_string),
        };
        let updated = self.gerbangs.update(id, &patch).await?;
        info!(id, "gerbang updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, branch_id: i64) -> Result<(), AppError> {
        if id <= 0 {
            return Err(AppError::bad_request("ID Gerbang tidak valid"));
        }
        if branch_id <= 0 {
            return Err(AppError::bad_request("ID Cabang tidak valid"));
        }
        self.gerbangs.delete(id, branch_id).await?;
        info!(id, branch = branch_id, "gerbang deleted");
        Ok(())
    }
}

fn gate_name_rules(name: &str, field: &str, errors: &mut Vec<String>) {
    errors.extend(validate_required(name, field));
    errors.extend(validate_min_len(name.trim(), field, 3));
}

pub fn validate_new_gerbang(input: &NewGerbang) -> Vec<String> {
    let mut errors = Vec::new();
    if input.id.is_some_and(|id| id <= 0) {
        errors.push("ID Gerbang tidak valid".to_string());
    }
    gate_name_rules(&input.gate_name, "Nama Gerbang", &mut errors);
    gate_name_rules(&input.branch_name, "Nama Cabang", &mut errors);
    if input.branch_id <= 0 {
        errors.push("ID Cabang harus lebih dari 0".to_string());
    }
    errors
}

pub fn validate_gerbang_patch(patch: &GerbangPatch) -> Vec<String> {
    let mut errors = Vec::new();
    if let Some(name) = &patch.gate_name {
        gate_name_rules(name, "Nama Gerbang", &mut errors);
    }
    if let Some(name) = &patch.branch_name {
        gate_name_rules(name, "Nama Cabang", &mut errors);
    }
    if patch.branch_id.is_some_and(|branch_id| branch_id <= 0) {
        errors.push("ID Cabang harus lebih dari 0".to_string());
    }
    errors
}

#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub tanggal: Option<String>,
    pub search: Option<String>,
    pub method: PaymentMethod,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportPage {
    #[serde(skip)]
    pub date: Option<NaiveDate>,
    /// Normalized `YYYY-MM-DD`.
    pub tanggal: Option<String>,
    pub search: Option<String>,
    pub rows: Vec<ReportRow>,
    pub table: ReportTable,
    pub total_pages: u32,
    pub current_page: u32,
    pub total_records: u64,
}

pub struct ReportService {
    lalins: Arc<dyn LalinRepository>,
    gerbangs: Arc<dyn GerbangRepository>,
}

impl ReportService {
    pub fn new(lalins: Arc<dyn LalinRepository>, gerbangs: Arc<dyn GerbangRepository>) -> Self {
        Self { lalins, gerbangs }
    }

    pub async fn get_report(&self, query: ReportQuery) -> Result<ReportPage, AppError> {
        let search = query
            .search
            .as_deref()
            .map(sanitize_string)
            .filter(|value| !value.is_empty());
        let date = match query.tanggal.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                Some(check_date(value).map_err(AppError::validation)?)
            }
            _ => None,
        };
        let tanggal = date.map(|date| date.format("%Y-%m-%d").to_string());

        // The lalin API does not filter by name; search is applied to the grouped rows.
        let filter = LalinFilter {
            tanggal: tanggal.clone(),
            search: None,
        };
        let (lalins, gates) = tokio::try_join!(
            self.lalins.list(&filter, query.pagination),
            self.gerbangs.list(Pagination::new(1, ALL_GATES_LIMIT)),
        )?;

        let directory = GateDirectory::new(&gates.data);
        let mut rows = report::aggregate(&lalins.data, &directory);
        if let Some(search) = &search {
            rows.retain(|row| row.matches(search));
        }
        let table = report::build_table(&rows, query.method);

        Ok(ReportPage {
            date,
            tanggal,
            search,
            rows,
            table,
            total_pages: lalins.total_pages,
            current_page: lalins.current_page,
            total_records: lalins.total_records,
        })
    }

    pub async fn export_csv(&self, query: ReportQuery) -> Result<ExportFile, AppError> {
        let page = self.get_report(query).await?;
        if page.rows.is_empty() {
            return Err(AppError::bad_request("Tidak ada data untuk di-export"));
        }

        let date = page
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let file = ExportFile {
            file_name: export::file_name(date),
            content_type: export::CSV_CONTENT_TYPE,
            body: export::render_csv(&page.table),
        };
        info!(file = %file.file_name, rows = page.rows.len(), "report exported");
        Ok(file)
    }
}

pub struct DashboardService {
    lalins: Arc<dyn LalinRepository>,
    gerbangs: Arc<dyn GerbangRepository>,
}

impl DashboardService {
    pub fn new(lalins: Arc<dyn LalinRepository>, gerbangs: Arc<dyn GerbangRepository>) -> Self {
        Self { lalins, gerbangs }
    }

    pub async fn get_dashboard(
        &self,
        tanggal: &str,
        limit: Option<u32>,
    ) -> Result<DashboardData, AppError> {
        let date = check_date(tanggal).map_err(AppError::validation)?;

        let filter = LalinFilter {
            tanggal: Some(date.format("%Y-%m-%d").to_string()),
            search: None,
        };
        let (lalins, gates) = tokio::try_join!(
            self.lalins
                .list(&filter, Pagination::new(1, limit.unwrap_or(DASHBOARD_LIMIT))),
            self.gerbangs.list(Pagination::new(1, ALL_GATES_LIMIT)),
        )?;

        let directory = GateDirectory::new(&gates.data);
        Ok(stats::build_dashboard(&lalins.data, &directory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lalin, LoginResponse};
    use crate::session::MemorySessionStore;
    use async_trait::async_trait;
    use base64::Engine as _;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeGerbangs {
        gates: Vec<Gerbang>,
        calls: AtomicUsize,
        deleted: Mutex<Vec<(i64, i64)>>,
    }

    #[async_trait]
    impl GerbangRepository for FakeGerbangs {
        async fn list(&self, pagination: Pagination) -> Result<Page<Gerbang>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(pagination.slice(&self.gates))
        }

        async fn get(&self, id: i64) -> Result<Option<Gerbang>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.gates.iter().find(|gate| gate.id == id).cloned())
        }

        async fn create(&self, gerbang: &NewGerbang) -> Result<Gerbang, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Gerbang {
                id: gerbang.id.unwrap_or(99),
                branch_id: gerbang.branch_id,
                gate_name: gerbang.gate_name.clone(),
                branch_name: gerbang.branch_name.clone(),
            })
        }

        async fn update(&self, id: i64, patch: &GerbangPatch) -> Result<Gerbang, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut gate = self
                .gates
                .iter()
                .find(|gate| gate.id == id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: reqwest::StatusCode::NOT_FOUND,
                    message: "not found".into(),
                })?;
            if let Some(name) = &patch.gate_name {
                gate.gate_name = name.clone();
            }
            Ok(gate)
        }

        async fn delete(&self, id: i64, branch_id: i64) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.deleted.lock().unwrap().push((id, branch_id));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeLalins {
        records: Vec<Lalin>,
        dates: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl LalinRepository for FakeLalins {
        async fn list(&self, filter: &LalinFilter, pagination: Pagination) -> Result<Page<Lalin>, ApiError> {
            self.dates.lock().unwrap().push(filter.tanggal.clone());
            Ok(pagination.slice(&self.records))
        }
    }

    struct FakeUsers {
        response: LoginResponse,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl UserRepository for FakeUsers {
        async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn gates() -> Vec<Gerbang> {
        vec![
            Gerbang {
                id: 1,
                branch_id: 16,
                gate_name: "Cikunir 1".into(),
                branch_name: "Jakarta Outer Ring Road".into(),
            },
            Gerbang {
                id: 2,
                branch_id: 12,
                gate_name: "Padalarang".into(),
                branch_name: "Cipularang".into(),
            },
        ]
    }

    fn jwt(exp: i64) -> String {
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(serde_json::json!({ "id": 4, "exp": exp }).to_string());
        format!("header.{payload}.sig")
    }

    fn auth_service(response: LoginResponse) -> (AuthService, Arc<FakeUsers>, Arc<MemorySessionStore>) {
        let users = Arc::new(FakeUsers {
            response,
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(MemorySessionStore::new());
        (AuthService::new(users.clone(), store.clone()), users, store)
    }

    #[tokio::test]
    async fn login_validation_skips_repository() {
        let (auth, users, _) = auth_service(LoginResponse::default());
        let err = auth
            .login(Credentials {
                username: "ab".into(),
                password: "123".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.errors,
            vec!["Password minimal 6 karakter", "Username minimal 3 karakter"]
        );
        assert_eq!(users.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn login_stores_session_and_logout_clears_it() {
        let token = jwt(chrono::Utc::now().timestamp() + 3600);
        let (auth, _, store) = auth_service(LoginResponse {
            status: true,
            message: "ok".into(),
            code: 200,
            is_logged_in: 1,
            token: token.clone(),
        });

        let user = auth
            .login(Credentials {
                username: " <admin> ".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(user.id, 4);
        assert_eq!(store.token().await, Some(token));
        assert!(auth.is_authenticated().await);

        auth.logout().await.unwrap();
        assert!(!auth.is_authenticated().await);
        assert!(auth.current_user().await.is_err());
    }

    #[tokio::test]
    async fn rejected_login_reports_api_message() {
        let (auth, _, store) = auth_service(LoginResponse {
            status: false,
            message: "Username atau password salah".into(),
            ..Default::default()
        });
        let err = auth
            .login(Credentials {
                username: "admin".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Username atau password salah");
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn expired_session_is_dropped() {
        let (auth, _, store) = auth_service(LoginResponse::default());
        store
            .save(Session::new("admin", jwt(chrono::Utc::now().timestamp() - 10)))
            .await
            .unwrap();
        assert!(auth.require_user().await.is_err());
        assert_eq!(store.load().await, None);

        store
            .save(Session::new("admin", "opaque-token"))
            .await
            .unwrap();
        assert_eq!(auth.restore().await, None);
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn gerbang_validation_collects_every_rule() {
        let repo = Arc::new(FakeGerbangs::default());
        let service = GerbangService::new(repo.clone());

        let err = service
            .create(NewGerbang {
                id: None,
                branch_id: 0,
                gate_name: " ".into(),
                branch_name: "Ci".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                "Nama Gerbang tidak boleh kosong",
                "Nama Cabang minimal 3 karakter",
                "ID Cabang harus lebih dari 0",
            ]
        );

        let err = service.delete(3, 0).await.unwrap_err();
        assert_eq!(err.errors, vec!["ID Cabang tidak valid"]);
        let err = service.get(0).await.unwrap_err();
        assert_eq!(err.errors, vec!["ID Gerbang tidak valid"]);
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn gerbang_crud_delegates_sanitized_input() {
        let repo = Arc::new(FakeGerbangs {
            gates: gates(),
            ..Default::default()
        });
        let service = GerbangService::new(repo.clone());

        let created = service
            .create(NewGerbang {
                id: None,
                branch_id: 16,
                gate_name: " Cikunir <3> ".into(),
                branch_name: "Jakarta Outer Ring Road".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.gate_name, "Cikunir 3");

        let updated = service
            .update(
                1,
                GerbangPatch {
                    gate_name: Some("Cikunir Utama".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.gate_name, "Cikunir Utama");

        service.delete(2, 12).await.unwrap();
        assert_eq!(*repo.deleted.lock().unwrap(), vec![(2, 12)]);

        let missing = service.get(42).await.unwrap_err();
        assert_eq!(missing.user_message(), "Gerbang tidak ditemukan");
    }

    #[tokio::test]
    async fn gerbang_search_filters_by_either_name() {
        let service = GerbangService::new(Arc::new(FakeGerbangs {
            gates: gates(),
            ..Default::default()
        }));
        let page = service
            .list(Some("cipu"), Pagination::new(1, 5))
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].gate_name, "Padalarang");
        assert_eq!(page.total_records, 1);

        let all = service.list(Some("  "), Pagination::new(1, 5)).await.unwrap();
        assert_eq!(all.data.len(), 2);
    }

    fn lalin(branch_id: i64, gate_id: i64, class: i64, cash: u64) -> Lalin {
        Lalin {
            date: "2023-11-01".into(),
            branch_id,
            gate_id,
            lane_id: 1,
            class,
            cash,
            ..Default::default()
        }
    }

    fn report_service(records: Vec<Lalin>) -> ReportService {
        let gerbangs = Arc::new(FakeGerbangs {
            gates: gates(),
            ..Default::default()
        });
        ReportService::new(Arc::new(FakeLalins {
            records,
            ..Default::default()
        }), gerbangs)
    }

    fn report_query(search: Option<&str>) -> ReportQuery {
        ReportQuery {
            tanggal: Some("2023-11-01".into()),
            search: search.map(str::to_string),
            method: PaymentMethod::Tunai,
            pagination: Pagination::new(1, 50),
        }
    }

    #[tokio::test]
    async fn report_groups_and_filters_rows() {
        let service = report_service(vec![
            lalin(16, 1, 1, 3),
            lalin(16, 1, 2, 4),
            lalin(12, 2, 1, 5),
        ]);

        let page = service.get_report(report_query(None)).await.unwrap();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.table.grand_total().map(|values| values.total), Some(12));

        let filtered = service.get_report(report_query(Some("padalarang"))).await.unwrap();
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].ruas, "Cipularang");
    }

    #[tokio::test]
    async fn report_rejects_future_dates() {
        let service = report_service(Vec::new());
        let mut query = report_query(None);
        query.tanggal = Some("2999-01-01".into());
        let err = service.get_report(query).await.unwrap_err();
        assert_eq!(err.errors, vec!["Tanggal tidak boleh lebih dari hari ini"]);
    }

    #[tokio::test]
    async fn report_forwards_only_normalized_dates() {
        let lalins = Arc::new(FakeLalins {
            records: vec![lalin(16, 1, 1, 3)],
            ..Default::default()
        });
        let service = ReportService::new(
            lalins.clone(),
            Arc::new(FakeGerbangs {
                gates: gates(),
                ..Default::default()
            }),
        );

        let mut query = report_query(None);
        query.tanggal = Some("2023-11-01\"; evil".into());
        let err = service.get_report(query).await.unwrap_err();
        assert_eq!(err.errors, vec!["Format tanggal tidak valid"]);
        assert!(lalins.dates.lock().unwrap().is_empty());

        let mut query = report_query(None);
        query.tanggal = Some("2023-11-01T08:00:00Z".into());
        let page = service.get_report(query.clone()).await.unwrap();
        assert_eq!(page.tanggal.as_deref(), Some("2023-11-01"));
        assert_eq!(
            *lalins.dates.lock().unwrap(),
            vec![Some("2023-11-01".to_string())]
        );

        let file = service.export_csv(query).await.unwrap();
        assert_eq!(file.file_name, "Laporan_Lalin_2023_11_01.csv");
    }

    #[tokio::test]
    async fn export_requires_rows() {
        let empty = report_service(Vec::new());
        let err = empty.export_csv(report_query(None)).await.unwrap_err();
        assert_eq!(err.user_message(), "Tidak ada data untuk di-export");

        let service = report_service(vec![lalin(16, 1, 1, 3)]);
        let file = service.export_csv(report_query(None)).await.unwrap();
        assert_eq!(file.file_name, "Laporan_Lalin_2023_11_01.csv");
        assert!(file.body.contains("Total Lalin Keseluruhan"));
    }

    #[tokio::test]
    async fn dashboard_aggregates_with_gate_names() {
        let service = DashboardService::new(
            Arc::new(FakeLalins {
                records: vec![lalin(16, 1, 1, 3), lalin(12, 9, 1, 5)],
                ..Default::default()
            }),
            Arc::new(FakeGerbangs {
                gates: gates(),
                ..Default::default()
            }),
        );
        let data = service.get_dashboard("2023-11-01", None).await.unwrap();
        assert_eq!(data.by_gerbang["Cikunir 1"], 3);
        assert_eq!(data.by_gerbang["Gerbang 9"], 5);
        assert_eq!(data.by_ruas["Cipularang"], 5);

        let err = service.get_dashboard("", None).await.unwrap_err();
        assert_eq!(err.errors, vec!["Tanggal tidak boleh kosong"]);
    }
}
