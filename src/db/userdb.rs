use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::usermodel::{ProfileUpdate, User, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        email: T,
        password: T,
        name: T,
        role: UserRole,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, password, name, avatar, bio, skills, role,
                       rating, completed_projects, profession, experience, portfolio,
                       hourly_rate, available, city, website, linkedin, github,
                       created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, password, name, avatar, bio, skills, role,
                       rating, completed_projects, profession, experience, portfolio,
                       hourly_rate, available, city, website, linkedin, github,
                       created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        email: T,
        password: T,
        name: T,
        role: UserRole,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password, name, avatar, bio, skills, role,
                      rating, completed_projects, profession, experience, portfolio,
                      hourly_rate, available, city, website, linkedin, github,
                      created_at, updated_at
            "#,
        )
        .bind(email.into())
        .bind(password.into())
        .bind(name.into())
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                avatar = COALESCE($3, avatar),
                bio = COALESCE($4, bio),
                skills = COALESCE($5, skills),
                role = COALESCE($6, role),
                profession = COALESCE($7, profession),
                experience = COALESCE($8, experience),
                portfolio = COALESCE($9, portfolio),
                hourly_rate = COALESCE($10, hourly_rate),
                available = COALESCE($11, available),
                city = COALESCE($12, city),
                website = COALESCE($13, website),
                linkedin = COALESCE($14, linkedin),
                github = COALESCE($15, github),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password, name, avatar, bio, skills, role,
                      rating, completed_projects, profession, experience, portfolio,
                      hourly_rate, available, city, website, linkedin, github,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(update.name)
        .bind(update.avatar)
        .bind(update.bio)
        .bind(update.skills)
        .bind(update.role)
        .bind(update.profession)
        .bind(update.experience)
        .bind(update.portfolio)
        .bind(update.hourly_rate)
        .bind(update.available)
        .bind(update.city)
        .bind(update.website)
        .bind(update.linkedin)
        .bind(update.github)
        .fetch_one(&self.pool)
        .await
    }
}
