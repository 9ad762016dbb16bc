use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::userdtos::UserSummary,
    models::projectmodel::{Bid, Project, ProjectDraft, ProjectFilter, ProjectStatus},
};

pub const DEFAULT_URGENCY: &str = "normal";

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProjectDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Minimum budget must be greater than 0"))]
    pub budget_min: i32,
    #[validate(range(min = 1, message = "Maximum budget must be greater than 0"))]
    pub budget_max: i32,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub skills: Option<String>,
    pub requirements: Option<String>,
    pub urgency: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl ProjectDto {
    pub fn has_valid_budget(&self) -> bool {
        self.budget_min > 0 && self.budget_max > 0 && self.budget_min < self.budget_max
    }

    /// `fallback_urgency` is used when the request leaves urgency blank.
    pub fn into_draft(self, fallback_urgency: &str) -> ProjectDraft {
        let urgency = self
            .urgency
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| fallback_urgency.to_string());

        ProjectDraft {
            title: self.title,
            description: self.description,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            category: self.category,
            location: self.location,
            skills: self.skills,
            requirements: self.requirements,
            urgency,
            deadline: self.deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProjectStatusDto {
    pub status: ProjectStatus,
}

/// Listing query. Every value arrives as text so that blank or malformed
/// numbers are dropped instead of failing the request.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProjectQueryDto {
    pub my_projects: Option<String>,
    pub client_id: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub min_budget: Option<String>,
    pub max_budget: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("all")
    })
}

fn parse_lenient<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse::<T>().ok())
}

impl From<ProjectQueryDto> for ProjectFilter {
    fn from(query: ProjectQueryDto) -> Self {
        let page = parse_lenient::<i64>(query.page).filter(|p| *p >= 1).unwrap_or(1);
        let limit = parse_lenient::<i64>(query.limit)
            .filter(|l| *l >= 1)
            .unwrap_or(20)
            .min(100);

        ProjectFilter {
            my_projects: parse_lenient::<bool>(query.my_projects).unwrap_or(false),
            client_id: parse_lenient::<Uuid>(query.client_id),
            category: non_blank(query.category),
            location: non_blank(query.location),
            urgency: non_blank(query.urgency),
            min_budget: parse_lenient::<i32>(query.min_budget),
            max_budget: parse_lenient::<i32>(query.max_budget),
            search: query.search.filter(|s| !s.trim().is_empty()),
            limit,
            offset: (page - 1) * limit,
        }
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateBidDto {
    pub project_id: Uuid,
    #[validate(range(min = 1, message = "Amount must be greater than 0"))]
    pub amount: i32,
    #[validate(length(min = 1, message = "Proposal is required"))]
    pub proposal: String,
    #[validate(length(min = 1, message = "Timeline is required"))]
    pub timeline: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub project: Project,
    pub client: UserSummary,
    pub bid_count: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct BidWithFreelancer {
    #[serde(flatten)]
    pub bid: Bid,
    pub freelancer: UserSummary,
}

#[derive(Debug, Serialize, Clone)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub client: UserSummary,
    pub freelancer: Option<UserSummary>,
    pub bids: Vec<BidWithFreelancer>,
}
