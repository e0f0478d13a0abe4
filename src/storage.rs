use crate::errors::AppError;
use crate::session::{Session, SessionStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Session store persisted as a JSON file, the local-storage counterpart.
pub struct FileSessionStore {
    path: PathBuf,
    cached: Mutex<Option<Session>>,
}

impl FileSessionStore {
    pub async fn open(path: PathBuf) -> Result<Self, AppError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let cached = load_session(&path).await;
        Ok(Self {
            path,
            cached: Mutex::new(cached),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Option<Session> {
        self.cached.lock().await.clone()
    }

    async fn save(&self, session: Session) -> Result<(), AppError> {
        let mut cached = self.cached.lock().await;
        persist_session(&self.path, &session).await?;
        *cached = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let mut cached = self.cached.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(AppError::internal(err)),
        }
        *cached = None;
        Ok(())
    }
}

async fn load_session(path: &Path) -> Option<Session> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(session) => {
                info!("restored session from {}", path.display());
                Some(session)
            }
            Err(err) => {
                error!("failed to parse session file: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read session file: {err}");
            None
        }
    }
}

async fn persist_session(path: &Path, session: &Session) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(session).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
