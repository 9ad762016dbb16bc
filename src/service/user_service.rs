use std::sync::Arc;

use crate::{
    db::{is_unique_violation, userdb::UserExt},
    dtos::userdtos::{LoginUserDto, RegisterUserDto, UpdateProfileDto},
    error::ErrorMessage,
    models::usermodel::User,
    service::error::ServiceError,
    utils::password,
};

#[derive(Debug)]
pub struct UserService<S> {
    db_client: Arc<S>,
}

impl<S> UserService<S>
where
    S: UserExt + Send + Sync,
{
    pub fn new(db_client: Arc<S>) -> Self {
        Self { db_client }
    }

    pub async fn register(&self, body: RegisterUserDto) -> Result<User, ServiceError> {
        let existing_user = self.db_client.get_user(None, Some(&body.email)).await?;

        if existing_user.is_some() {
            return Err(ServiceError::Conflict(ErrorMessage::EmailExist.to_string()));
        }

        let hashed_password = password::hash(&body.password)?;
        let role = body.role.unwrap_or_default();

        let user = self
            .db_client
            .save_user(body.email, hashed_password, body.name, role)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::Conflict(ErrorMessage::EmailExist.to_string())
                } else {
                    ServiceError::Database(e)
                }
            })?;

        tracing::info!("registered user {} as {}", user.id, user.role.to_str());
        Ok(user)
    }

    /// Resolves the user behind an email/password pair.
    pub async fn authenticate(&self, body: LoginUserDto) -> Result<User, ServiceError> {
        let user = self
            .db_client
            .get_user(None, Some(&body.email))
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        let password_matched = password::compare(&body.password, &user.password)
            .map_err(|_| ServiceError::InvalidCredentials)?;

        if !password_matched {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn update_profile(
        &self,
        caller: &User,
        body: UpdateProfileDto,
    ) -> Result<User, ServiceError> {
        let user = self
            .db_client
            .update_user_profile(caller.id, body.into())
            .await?;

        if user.role != caller.role {
            tracing::info!(
                "user {} switched role {} -> {}",
                user.id,
                caller.role.to_str(),
                user.role.to_str()
            );
        }

        Ok(user)
    }
}
