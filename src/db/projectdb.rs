use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::DBClient;
use crate::models::projectmodel::*;

#[async_trait]
pub trait ProjectExt {
    async fn get_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>, Error>;

    async fn get_project_by_id(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Project>, Error>;

    async fn save_project(
        &self,
        client_id: Uuid,
        draft: ProjectDraft,
    ) -> Result<Project, Error>;

    async fn update_project(
        &self,
        project_id: Uuid,
        draft: ProjectDraft,
    ) -> Result<Project, Error>;

    async fn update_project_status(
        &self,
        project_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Project, Error>;

    /// Posts `notice` as a system message from `owner_id` into every chat of
    /// the project and marks the project deleted, in one transaction.
    /// Returns the updated project and the number of notices posted.
    async fn archive_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
        notice: &str,
    ) -> Result<(Project, u64), Error>;
}

#[async_trait]
pub trait BidExt {
    async fn get_bid(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Option<Bid>, Error>;

    async fn save_bid(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
        amount: i32,
        proposal: String,
        timeline: String,
    ) -> Result<Bid, Error>;

    async fn get_project_bids(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Bid>, Error>;

    async fn get_bid_count(
        &self,
        project_id: Uuid,
    ) -> Result<i64, Error>;
}

#[async_trait]
impl ProjectExt for DBClient {
    async fn get_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>, Error> {
        let search = filter
            .search
            .as_ref()
            .map(|s| format!("%{}%", s.to_lowercase()));

        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, budget_min, budget_max, currency,
                   category, location, skills, requirements, urgency, status,
                   client_id, freelancer_id, deadline, created_at, updated_at
            FROM projects
            WHERE (CASE WHEN $1 THEN status <> 'deleted'::project_status
                        ELSE status = 'open'::project_status END)
              AND ($2::uuid IS NULL OR client_id = $2)
              AND ($3::text IS NULL OR category = $3)
              AND ($4::text IS NULL OR location = $4)
              AND ($5::text IS NULL OR urgency = $5)
              AND ($6::int IS NULL OR budget_max >= $6)
              AND ($7::int IS NULL OR budget_min <= $7)
              AND ($8::text IS NULL
                   OR LOWER(title) LIKE $8
                   OR LOWER(COALESCE(description, '')) LIKE $8
                   OR LOWER(COALESCE(skills, '')) LIKE $8)
            ORDER BY created_at DESC
            LIMIT $9 OFFSET $10
            "#,
        )
        .bind(filter.my_projects)
        .bind(filter.client_id)
        .bind(&filter.category)
        .bind(&filter.location)
        .bind(&filter.urgency)
        .bind(filter.min_budget)
        .bind(filter.max_budget)
        .bind(search)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_project_by_id(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Project>, Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, budget_min, budget_max, currency,
                   category, location, skills, requirements, urgency, status,
                   client_id, freelancer_id, deadline, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_project(
        &self,
        client_id: Uuid,
        draft: ProjectDraft,
    ) -> Result<Project, Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects
            (title, description, budget_min, budget_max, currency, category,
             location, skills, requirements, urgency, status, client_id, deadline)
            VALUES ($1, $2, $3, $4, 'TWD', $5, $6, $7, $8, $9,
                    'open'::project_status, $10, $11)
            RETURNING id, title, description, budget_min, budget_max, currency,
                      category, location, skills, requirements, urgency, status,
                      client_id, freelancer_id, deadline, created_at, updated_at
            "#,
        )
        .bind(draft.title)
        .bind(draft.description)
        .bind(draft.budget_min)
        .bind(draft.budget_max)
        .bind(draft.category)
        .bind(draft.location)
        .bind(draft.skills)
        .bind(draft.requirements)
        .bind(draft.urgency)
        .bind(client_id)
        .bind(draft.deadline)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_project(
        &self,
        project_id: Uuid,
        draft: ProjectDraft,
    ) -> Result<Project, Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = $2, description = $3, budget_min = $4, budget_max = $5,
                currency = 'TWD', category = $6, location = $7, skills = $8,
                requirements = $9, urgency = $10, deadline = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, budget_min, budget_max, currency,
                      category, location, skills, requirements, urgency, status,
                      client_id, freelancer_id, deadline, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(draft.title)
        .bind(draft.description)
        .bind(draft.budget_min)
        .bind(draft.budget_max)
        .bind(draft.category)
        .bind(draft.location)
        .bind(draft.skills)
        .bind(draft.requirements)
        .bind(draft.urgency)
        .bind(draft.deadline)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_project_status(
        &self,
        project_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Project, Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, budget_min, budget_max, currency,
                      category, location, skills, requirements, urgency, status,
                      client_id, freelancer_id, deadline, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn archive_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
        notice: &str,
    ) -> Result<(Project, u64), Error> {
        let mut tx = self.pool.begin().await?;

        let notices = sqlx::query(
            r#"
            INSERT INTO messages (chat_id, sender_id, content, message_type)
            SELECT id, $2, $3, 'system'::message_type
            FROM chats
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .bind(owner_id)
        .bind(notice)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET status = 'deleted'::project_status, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, budget_min, budget_max, currency,
                      category, location, skills, requirements, urgency, status,
                      client_id, freelancer_id, deadline, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((project, notices))
    }
}

#[async_trait]
impl BidExt for DBClient {
    async fn get_bid(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Option<Bid>, Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, project_id, freelancer_id, amount, proposal, timeline,
                   status, created_at, updated_at
            FROM bids
            WHERE project_id = $1 AND freelancer_id = $2
            "#,
        )
        .bind(project_id)
        .bind(freelancer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_bid(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
        amount: i32,
        proposal: String,
        timeline: String,
    ) -> Result<Bid, Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            INSERT INTO bids (project_id, freelancer_id, amount, proposal, timeline)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, project_id, freelancer_id, amount, proposal, timeline,
                      status, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(freelancer_id)
        .bind(amount)
        .bind(proposal)
        .bind(timeline)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_project_bids(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Bid>, Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, project_id, freelancer_id, amount, proposal, timeline,
                   status, created_at, updated_at
            FROM bids
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bid_count(
        &self,
        project_id: Uuid,
    ) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM bids
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
    }
}
