use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod authenticate;
pub mod create_user;
pub mod health;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest {
        message: String,
        errors: Vec<FieldError>,
    },
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// Map a domain failure to a response.
    ///
    /// Internal failures are logged and replaced by `internal_message`; their
    /// detail never reaches the client.
    pub fn from_user_error(err: UserError, internal_message: &str) -> Self {
        if err.is_internal() {
            tracing::error!(error = %err, "{}", internal_message);
            return ApiError::InternalServerError(internal_message.to_string());
        }

        match err {
            UserError::AlreadyExists => ApiError::Conflict(err.to_string()),
            _ => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
            errors: Vec::new(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest {
            message: "Validation error".to_string(),
            errors: errors.0,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorBody::new(message))
            }
            ApiError::BadRequest { message, errors } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody { message, errors },
            ),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, ApiErrorBody::new(message)),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ApiErrorBody::new(message))
            }
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ApiErrorBody {
    pub fn new(message: String) -> Self {
        Self {
            message,
            errors: Vec::new(),
        }
    }
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulates field errors so a request reports every problem at once.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl ToString) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Unwrap a field that must be present, recording "Required" otherwise.
    pub fn require(&mut self, field: &str, value: Option<String>) -> Option<String> {
        if value.is_none() {
            self.add(field, "Required");
        }
        value
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}
