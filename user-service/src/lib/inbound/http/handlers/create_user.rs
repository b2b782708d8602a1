use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ValidationErrors;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PlainPassword;
use crate::domain::user::models::UserName;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(|e| ApiError::from_user_error(e, "Error creating user"))
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreateUserResponseData {
                    message: "User created successfully".to_string(),
                    user: user.into(),
                },
            )
        })
}

/// HTTP request body for signup (raw JSON)
///
/// Fields are optional so that a missing one is reported as a validation
/// error rather than a deserialization failure.
#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CreateUserRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = errors
            .require("name", self.name)
            .and_then(|name| UserName::new(name).map_err(|e| errors.add("name", e)).ok());

        let email = errors.require("email", self.email).and_then(|email| {
            EmailAddress::new(email)
                .map_err(|e| errors.add("email", e))
                .ok()
        });

        let password = errors.require("password", self.password).and_then(|password| {
            PlainPassword::new(password)
                .map_err(|violations| {
                    for violation in violations {
                        errors.add("password", violation);
                    }
                })
                .ok()
        });

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(CreateUserCommand::new(name, email, password))
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserResponseData {
    pub message: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserProfile> for UserData {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>, password: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    fn messages(errors: &ValidationErrors) -> Vec<(&str, &str)> {
        errors
            .fields()
            .iter()
            .map(|e| (e.field.as_str(), e.message.as_str()))
            .collect()
    }

    #[test]
    fn test_valid_request() {
        let command = request(Some("John Doe"), Some("john@example.com"), Some("Password123!"))
            .try_into_command()
            .expect("request should be valid");

        assert_eq!(command.name.as_str(), "John Doe");
        assert_eq!(command.email.as_str(), "john@example.com");
        assert_eq!(command.password.as_str(), "Password123!");
    }

    #[test]
    fn test_missing_fields() {
        let errors = CreateUserRequest::default().try_into_command().unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                ("name", "Required"),
                ("email", "Required"),
                ("password", "Required"),
            ]
        );
    }

    #[test]
    fn test_every_invalid_field_is_reported() {
        let errors = request(Some("Jo"), Some("not-an-email"), Some("password"))
            .try_into_command()
            .unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                ("name", "Name should be at least 3 characters"),
                ("email", "Invalid email format"),
                ("password", "Password must contain at least 1 number"),
                ("password", "Password must contain at least 1 special character"),
                ("password", "Password must contain at least 1 uppercase letter"),
            ]
        );
    }

    #[test]
    fn test_user_data_has_no_password() {
        let now = Utc::now();
        let profile = UserProfile {
            id: crate::domain::user::models::UserId::new(),
            name: UserName::new("John Doe".to_string()).unwrap(),
            email: EmailAddress::new("john@example.com".to_string()).unwrap(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(UserData::from(&profile)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert!(json.get("password").is_none());
        for key in ["id", "name", "email", "createdAt", "updatedAt"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }
}
