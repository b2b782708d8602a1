use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::AuthenticateCommand;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PlainPassword;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Holds no mutable state: the repository arbitrates email uniqueness and the
/// authenticator carries the read-only signing key and hash cost.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    // bcrypt is CPU bound; keep it off the async workers
    async fn hash_password(&self, password: PlainPassword) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    #[tracing::instrument(skip(self, command), fields(email = %command.email))]
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserProfile, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!("Signup rejected, email already registered");
            return Err(UserError::AlreadyExists);
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = self.repository.create(NewUser {
            name: command.name,
            email: command.email,
            password_hash,
        });

        let created_user = self.repository.save(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user.into())
    }

    #[tracing::instrument(skip(self, command), fields(email = %command.email))]
    async fn authenticate(&self, command: AuthenticateCommand) -> Result<AuthToken, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::info!("Login rejected, unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let claims = authenticator.claims_for(user.id, user.email.as_str());
        let password_hash = user.password_hash;
        let password = command.password;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, &claims)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match result {
            Ok(result) => {
                tracing::info!(user_id = %user.id, "User authenticated");
                Ok(AuthToken {
                    token: result.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(user_id = %user.id, "Login rejected, wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }
}
