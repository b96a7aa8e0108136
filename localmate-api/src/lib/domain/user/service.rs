use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// bcrypt work runs on tokio's blocking pool.
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
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password)).await??;
        Ok(hash)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Session, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                language: command.language,
                created_at: Utc::now(),
            })
            .await?;

        let token = self.authenticator.issue_token(user.username.as_str())?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(Session {
            user,
            token: token.into(),
        })
    }

    async fn login(&self, username: String, password: String) -> Result<Session, UserError> {
        let username = Username::new(username).map_err(|_| UserError::InvalidCredentials)?;

        let user = match self.repository.find_by_username(&username).await? {
            Some(user) => user,
            None => {
                tracing::info!(username = %username, "Login for unknown user");
                return Err(UserError::InvalidCredentials);
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let subject = user.username.as_str().to_string();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject)
        })
        .await?;

        match result {
            Ok(token) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
                Ok(Session { user, token })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(username = %user.username, "Login with wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e)),
        }
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }
}
