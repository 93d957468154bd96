use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("group not found")]
    GroupNotFound,
    #[error("permission not found")]
    PermissionNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("group already exists")]
    GroupAlreadyExists,
    #[error("permission already exists")]
    PermissionAlreadyExists,
    #[error("invalid username")]
    InvalidUsername,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::PermissionNotFound => "PERMISSION_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::GroupAlreadyExists => "GROUP_ALREADY_EXISTS",
            Self::PermissionAlreadyExists => "PERMISSION_ALREADY_EXISTS",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::GroupNotFound | Self::PermissionNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserAlreadyExists
            | Self::GroupAlreadyExists
            | Self::PermissionAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidUsername | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
