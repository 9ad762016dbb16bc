use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        is_unique_violation,
        projectdb::{BidExt, ProjectExt},
        userdb::UserExt,
    },
    dtos::{
        projectdtos::*,
        userdtos::UserSummary,
    },
    models::{
        projectmodel::{Bid, Project, ProjectFilter, ProjectStatus},
        usermodel::{User, UserRole},
    },
    service::error::ServiceError,
};

/// Posted into every chat of a project when its owner deletes it.
pub const PROJECT_DELETED_NOTICE: &str = "This project has been deleted by the client.";

#[derive(Debug)]
pub struct ProjectService<S> {
    db_client: Arc<S>,
}

impl<S> ProjectService<S>
where
    S: UserExt + ProjectExt + BidExt + Send + Sync,
{
    pub fn new(db_client: Arc<S>) -> Self {
        Self { db_client }
    }

    async fn user_summary(&self, user_id: Uuid) -> Result<UserSummary, ServiceError> {
        let user = self
            .db_client
            .get_user(Some(user_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;
        Ok(UserSummary::from(&user))
    }

    async fn find_project(&self, project_id: Uuid) -> Result<Project, ServiceError> {
        self.db_client
            .get_project_by_id(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))
    }

    /// Loads a live project the caller owns.
    async fn owned_live_project(
        &self,
        caller: &User,
        project_id: Uuid,
        denied: &str,
    ) -> Result<Project, ServiceError> {
        let project = self.find_project(project_id).await?;

        if project.is_deleted() {
            return Err(ServiceError::ProjectDeleted(project_id));
        }
        if project.client_id != caller.id {
            return Err(ServiceError::forbidden(denied));
        }

        Ok(project)
    }

    async fn with_freelancers(&self, bids: Vec<Bid>) -> Result<Vec<BidWithFreelancer>, ServiceError> {
        let mut result = Vec::with_capacity(bids.len());
        for bid in bids {
            let freelancer = self.user_summary(bid.freelancer_id).await?;
            result.push(BidWithFreelancer { bid, freelancer });
        }
        Ok(result)
    }

    pub async fn list_projects(
        &self,
        filter: ProjectFilter,
    ) -> Result<Vec<ProjectListItem>, ServiceError> {
        let projects = self.db_client.get_projects(&filter).await?;

        let mut items = Vec::with_capacity(projects.len());
        for project in projects {
            let client = self.user_summary(project.client_id).await?;
            let bid_count = self.db_client.get_bid_count(project.id).await?;
            items.push(ProjectListItem {
                project,
                client,
                bid_count,
            });
        }

        Ok(items)
    }

    pub async fn get_project(&self, project_id: Uuid) -> Result<ProjectDetail, ServiceError> {
        let project = self.find_project(project_id).await?;

        if project.is_deleted() {
            return Err(ServiceError::ProjectDeleted(project_id));
        }

        let client = self.user_summary(project.client_id).await?;
        let freelancer = match project.freelancer_id {
            Some(freelancer_id) => Some(self.user_summary(freelancer_id).await?),
            None => None,
        };
        let bids = self.db_client.get_project_bids(project_id).await?;
        let bids = self.with_freelancers(bids).await?;

        Ok(ProjectDetail {
            project,
            client,
            freelancer,
            bids,
        })
    }

    pub async fn create_project(
        &self,
        caller: &User,
        body: ProjectDto,
    ) -> Result<Project, ServiceError> {
        match caller.role {
            UserRole::Client => {}
            UserRole::Freelancer => {
                return Err(ServiceError::forbidden("Only clients can post projects"));
            }
        }

        if !body.has_valid_budget() {
            return Err(ServiceError::validation("Budget minimum must be less than maximum"));
        }

        let project = self
            .db_client
            .save_project(caller.id, body.into_draft(DEFAULT_URGENCY))
            .await?;

        tracing::info!("project {} created by {}", project.id, caller.id);
        Ok(project)
    }

    pub async fn update_project(
        &self,
        caller: &User,
        project_id: Uuid,
        body: ProjectDto,
    ) -> Result<Project, ServiceError> {
        let project = self
            .owned_live_project(caller, project_id, "You can only update your own projects")
            .await?;

        if !body.has_valid_budget() {
            return Err(ServiceError::validation("Budget minimum must be less than maximum"));
        }

        let draft = body.into_draft(&project.urgency);
        Ok(self.db_client.update_project(project_id, draft).await?)
    }

    pub async fn update_project_status(
        &self,
        caller: &User,
        project_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Project, ServiceError> {
        self.owned_live_project(caller, project_id, "You can only update your own projects")
            .await?;

        if !status.is_assignable() {
            return Err(ServiceError::validation(
                "Invalid status. Valid statuses are: open, in_progress, completed, cancelled",
            ));
        }

        Ok(self.db_client.update_project_status(project_id, status).await?)
    }

    /// Soft-deletes a project and announces it in every chat tied to it.
    /// Returns the number of chats notified.
    pub async fn archive_project(
        &self,
        caller: &User,
        project_id: Uuid,
    ) -> Result<u64, ServiceError> {
        let project = self.find_project(project_id).await?;

        if project.client_id != caller.id {
            return Err(ServiceError::forbidden("You can only delete your own projects"));
        }
        if project.is_deleted() {
            return Err(ServiceError::validation("Project is already deleted"));
        }

        let (_, notified) = self
            .db_client
            .archive_project(project_id, caller.id, PROJECT_DELETED_NOTICE)
            .await?;

        tracing::info!("project {} archived, {} chats notified", project_id, notified);
        Ok(notified)
    }

    pub async fn list_bids(
        &self,
        caller: &User,
        project_id: Uuid,
    ) -> Result<Vec<BidWithFreelancer>, ServiceError> {
        let project = self.find_project(project_id).await?;

        if project.client_id != caller.id {
            return Err(ServiceError::forbidden("You can only view bids for your own projects"));
        }

        let bids = self.db_client.get_project_bids(project_id).await?;
        self.with_freelancers(bids).await
    }

    pub async fn create_bid(
        &self,
        caller: &User,
        body: CreateBidDto,
    ) -> Result<Bid, ServiceError> {
        match caller.role {
            UserRole::Freelancer => {}
            UserRole::Client => {
                return Err(ServiceError::forbidden("Only freelancers can place bids"));
            }
        }

        let project = self.find_project(body.project_id).await?;

        if project.status != ProjectStatus::Open {
            return Err(ServiceError::validation("Project is not open for bidding"));
        }
        if project.client_id == caller.id {
            return Err(ServiceError::forbidden("You cannot bid on your own project"));
        }

        let already_bid = self.db_client.get_bid(project.id, caller.id).await?;
        if already_bid.is_some() {
            return Err(ServiceError::Conflict(
                "You have already placed a bid on this project".to_string(),
            ));
        }

        if !project.accepts_amount(body.amount) {
            return Err(ServiceError::validation(format!(
                "Bid amount must be within project budget range ({} - {})",
                project.budget_min, project.budget_max
            )));
        }
        if body.proposal.trim().is_empty() || body.timeline.trim().is_empty() {
            return Err(ServiceError::validation("Proposal and timeline are required"));
        }

        let bid = self
            .db_client
            .save_bid(project.id, caller.id, body.amount, body.proposal, body.timeline)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::Conflict("You have already placed a bid on this project".to_string())
                } else {
                    ServiceError::Database(e)
                }
            })?;

        tracing::info!("bid {} placed on project {} by {}", bid.id, project.id, caller.id);
        Ok(bid)
    }
}
