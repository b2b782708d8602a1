use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ValidationErrors;
use crate::domain::user::models::AuthenticateCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate<US: UserServicePort>(
    State(state): State<AppState<US>>,
    payload: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = payload?;

    let token = state
        .user_service
        .authenticate(body.try_into_command()?)
        .await
        .map_err(|e| ApiError::from_user_error(e, "Error authenticating user"))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            message: "Login successful".to_string(),
            token: token.token,
        },
    ))
}

#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AuthenticateRequestBody {
    email: Option<String>,
    password: Option<String>,
}

impl AuthenticateRequestBody {
    fn try_into_command(self) -> Result<AuthenticateCommand, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let email = errors.require("email", self.email).and_then(|email| {
            EmailAddress::new(email)
                .map_err(|e| errors.add("email", e))
                .ok()
        });

        let password = errors
            .require("password", self.password)
            .filter(|password| {
                let present = !password.is_empty();
                if !present {
                    errors.add("password", "Password is required");
                }
                present
            });

        match (email, password) {
            (Some(email), Some(password)) => Ok(AuthenticateCommand::new(email, password)),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub message: String,
    pub token: String,
}
