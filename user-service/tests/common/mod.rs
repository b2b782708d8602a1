#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::NewUser;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::user::errors::UserError;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User store backed by a map keyed on email, enforcing the same uniqueness
/// rule as the database constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn get(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(email.as_str()).cloned())
    }

    fn create(&self, fields: NewUser) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            name: fields.name,
            email: fields.email,
            password_hash: fields.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    async fn save(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.get(user.email.as_str()) {
            if existing.id != user.id {
                return Err(UserError::AlreadyExists);
            }
        }
        users.insert(user.email.as_str().to_string(), user.clone());
        Ok(user)
    }
}

/// User store whose every call fails like an unreachable database.
pub struct UnavailableUserRepository;

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<User>, UserError> {
        Err(UserError::DatabaseError(
            "pool timed out while waiting for an open connection".to_string(),
        ))
    }

    fn create(&self, fields: NewUser) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            name: fields.name,
            email: fields.email,
            password_hash: fields.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    async fn save(&self, _user: User) -> Result<User, UserError> {
        Err(UserError::DatabaseError(
            "pool timed out while waiting for an open connection".to_string(),
        ))
    }
}

/// Test application driving the router in-process
pub struct TestApp<UR: UserRepository> {
    pub router: Router,
    pub repository: Arc<UR>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp<InMemoryUserRepository> {
    pub fn spawn() -> Self {
        Self::with_repository(InMemoryUserRepository::default())
    }
}

impl<UR: UserRepository> TestApp<UR> {
    pub fn with_repository(repository: UR) -> Self {
        let repository = Arc::new(repository);

        // Minimum cost keeps hashing fast in tests
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            PasswordHasher::new(PasswordHasher::MIN_COST).expect("valid cost"),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        Self {
            router: create_router(user_service),
            repository,
            authenticator,
        }
    }

    /// Send a request and return the status with the JSON body (Null if not JSON)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(path, &body.to_string()).await
    }

    pub async fn post_raw(&self, path: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }
}
