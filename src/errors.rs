use crate::api::ApiError;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "API_ERROR")]
    Api,
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "AUTH_ERROR")]
    Auth,
    #[serde(rename = "UNKNOWN_ERROR")]
    Unknown,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Api => "API_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Auth => "AUTH_ERROR",
            ErrorKind::Unknown => "UNKNOWN_ERROR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub message: String,
    pub errors: Vec<String>,
}

impl AppError {
    fn new(kind: ErrorKind, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            errors,
            ..Self::new(ErrorKind::Validation, StatusCode::BAD_REQUEST, "Validation failed")
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::validation(vec![message])
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, StatusCode::UNAUTHORIZED, message)
    }

    /// Rejected credentials; the upstream message is shown as is.
    pub fn login_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            errors: vec![message.clone()],
            ..Self::auth(message)
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, StatusCode::NOT_FOUND, message)
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self::new(
            ErrorKind::Unknown,
            StatusCode::INTERNAL_SERVER_ERROR,
            err.to_string(),
        )
    }

    /// Localized message shown to the dashboard user.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Api if self.status == StatusCode::NOT_FOUND => self.message.clone(),
            ErrorKind::Api => "Terjadi kesalahan pada server. Silakan coba lagi.".to_string(),
            ErrorKind::Network => "Koneksi internet bermasalah. Periksa koneksi Anda.".to_string(),
            ErrorKind::Validation if self.errors.is_empty() => {
                "Data yang dimasukkan tidak valid.".to_string()
            }
            ErrorKind::Validation => self.errors.join(", "),
            ErrorKind::Auth if !self.errors.is_empty() => self.errors.join(", "),
            ErrorKind::Auth => "Sesi Anda telah berakhir. Silakan login kembali.".to_string(),
            ErrorKind::Unknown => {
                "Terjadi kesalahan yang tidak diketahui. Silakan coba lagi.".to_string()
            }
        }
    }

    pub fn log(&self) {
        error!(
            code = self.kind.code(),
            status = self.status.as_u16(),
            errors = ?self.errors,
            "application error: {}",
            self.message
        );
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match &err {
            ApiError::Timeout | ApiError::Network(_) => {
                Self::new(ErrorKind::Network, StatusCode::SERVICE_UNAVAILABLE, message)
            }
            ApiError::Status { status, .. } => match status.as_u16() {
                401 | 403 => Self::new(ErrorKind::Auth, StatusCode::UNAUTHORIZED, message),
                404 => Self::new(ErrorKind::Api, StatusCode::NOT_FOUND, message),
                _ => Self::new(ErrorKind::Api, StatusCode::BAD_GATEWAY, message),
            },
            ApiError::Rejected(_) => Self::new(ErrorKind::Api, StatusCode::BAD_GATEWAY, message),
            ApiError::Decode(_) | ApiError::Client(_) => Self::new(
                ErrorKind::Unknown,
                StatusCode::INTERNAL_SERVER_ERROR,
                message,
            ),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        let body = ErrorBody {
            code: self.kind,
            message: self.user_message(),
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}
