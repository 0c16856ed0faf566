use crate::config::ConfigError;
use crate::directory::loader::LoadError;
use crate::directory::session::SessionError;
use crate::directory::visibility::VisibilityError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Load(Arc<LoadError>),
    Visibility(VisibilityError),
    Session(SessionError),
    NotFound(String),
    BadRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Load(err) => write!(f, "{}: {}", err.title(), err),
            AppError::Visibility(err) => write!(f, "render error: {}", err),
            AppError::Session(err) => write!(f, "{}", err),
            AppError::NotFound(what) => write!(f, "{} not found", what),
            AppError::BadRequest(reason) => write!(f, "bad request: {}", reason),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Load(err) => Some(&**err),
            AppError::Visibility(err) => Some(err),
            AppError::Session(err) => Some(err),
            AppError::NotFound(_) | AppError::BadRequest(_) => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::Session(SessionError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            AppError::Session(SessionError::Conflict) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Load(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Visibility(_)
            | AppError::Session(SessionError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<Arc<LoadError>> for AppError {
    fn from(value: Arc<LoadError>) -> Self {
        Self::Load(value)
    }
}

impl From<LoadError> for AppError {
    fn from(value: LoadError) -> Self {
        Self::Load(Arc::new(value))
    }
}

impl From<VisibilityError> for AppError {
    fn from(value: VisibilityError) -> Self {
        Self::Visibility(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_failure_kind() {
        assert_eq!(
            AppError::NotFound("legislator X000001".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Session(SessionError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("unknown sort field".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        let parse = serde_json::from_str::<serde_json::Value>("[").expect_err("invalid json");
        let load = AppError::from(LoadError::ParseRecords(parse));
        assert_eq!(load.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(load.to_string().starts_with("Failed to load senators"));
    }
}
