use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
    Deleted,
}

impl ProjectStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Deleted => "deleted",
        }
    }

    /// Statuses an owner may set directly. `Deleted` is only reachable
    /// through archiving.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, ProjectStatus::Deleted)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "bid_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub budget_min: i32,
    pub budget_max: i32,
    pub currency: String,
    pub category: String,
    pub location: String,
    pub skills: Option<String>,
    pub requirements: Option<String>,
    pub urgency: String,
    pub status: ProjectStatus,
    pub client_id: Uuid,
    pub freelancer_id: Option<Uuid>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn is_deleted(&self) -> bool {
        self.status == ProjectStatus::Deleted
    }

    pub fn accepts_amount(&self, amount: i32) -> bool {
        amount >= self.budget_min && amount <= self.budget_max
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Bid {
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    pub amount: i32,
    pub proposal: String,
    pub timeline: String,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written on project create and update.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub budget_min: i32,
    pub budget_max: i32,
    pub category: String,
    pub location: String,
    pub skills: Option<String>,
    pub requirements: Option<String>,
    pub urgency: String,
    pub deadline: Option<DateTime<Utc>>,
}

/// Listing filter for `GET /projects`.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub my_projects: bool,
    pub client_id: Option<Uuid>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub min_budget: Option<i32>,
    pub max_budget: Option<i32>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ProjectFilter {
    /// In-process form of the SQL predicate in `ProjectExt::get_projects`.
    pub fn matches(&self, project: &Project) -> bool {
        if self.my_projects {
            if project.is_deleted() {
                return false;
            }
        } else if project.status != ProjectStatus::Open {
            return false;
        }

        if let Some(client_id) = self.client_id {
            if project.client_id != client_id {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &project.category != category {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if &project.location != location {
                return false;
            }
        }
        if let Some(urgency) = &self.urgency {
            if &project.urgency != urgency {
                return false;
            }
        }
        if let Some(min) = self.min_budget {
            if project.budget_max < min {
                return false;
            }
        }
        if let Some(max) = self.max_budget {
            if project.budget_min > max {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = |field: Option<&str>| {
                field.map_or(false, |f| f.to_lowercase().contains(&needle))
            };
            if !hit(Some(&project.title))
                && !hit(project.description.as_deref())
                && !hit(project.skills.as_deref())
            {
                return false;
            }
        }

        true
    }
}
