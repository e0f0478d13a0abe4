use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::repository::{HttpGerbangRepository, HttpLalinRepository, HttpUserRepository};
use crate::service::{AuthService, DashboardService, GerbangService, ReportService};
use crate::session::SessionStore;
use crate::storage::FileSessionStore;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub gerbang: Arc<GerbangService>,
    pub report: Arc<ReportService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    /// Wires the file-backed session, the API client and the HTTP repositories.
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let store = FileSessionStore::open(config.session_path.clone()).await?;
        info!(path = %store.path().display(), "session store opened");
        let session: Arc<dyn SessionStore> = Arc::new(store);
        let client = ApiClient::new(&config, session.clone())?;
        info!(api = %client.base_url(), "api client ready");
        Ok(Self::with_client(config, session, client))
    }

    pub fn with_client(config: Config, session: Arc<dyn SessionStore>, client: ApiClient) -> Self {
        let gerbangs = Arc::new(HttpGerbangRepository::new(client.clone()));
        let lalins = Arc::new(HttpLalinRepository::new(client.clone()));
        let users = Arc::new(HttpUserRepository::new(client));

        Self {
            config: Arc::new(config),
            auth: Arc::new(AuthService::new(users, session)),
            gerbang: Arc::new(GerbangService::new(gerbangs.clone())),
            report: Arc::new(ReportService::new(lalins.clone(), gerbangs.clone())),
            dashboard: Arc::new(DashboardService::new(lalins, gerbangs)),
        }
    }
}
