use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usermodel::{ProfileUpdate, User, UserRole};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Defaults to freelancer.
    pub role: Option<UserRole>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "Email is required"), email(message = "Email is invalid"))]
    pub email: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub role: Option<UserRole>,
    pub profession: Option<String>,
    pub experience: Option<String>,
    pub portfolio: Option<String>,
    #[validate(range(min = 0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate: Option<i32>,
    pub available: Option<bool>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl From<UpdateProfileDto> for ProfileUpdate {
    fn from(dto: UpdateProfileDto) -> Self {
        ProfileUpdate {
            name: dto.name,
            avatar: dto.avatar,
            bio: dto.bio,
            skills: dto.skills,
            role: dto.role,
            profession: dto.profession,
            experience: dto.experience,
            portfolio: dto.portfolio,
            hourly_rate: dto.hourly_rate,
            available: dto.available,
            city: dto.city,
            website: dto.website,
            linkedin: dto.linkedin,
            github: dto.github,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub rating: f64,
    pub completed_projects: i32,
    pub profession: Option<String>,
    pub experience: Option<String>,
    pub portfolio: Option<String>,
    pub hourly_rate: Option<i32>,
    pub available: bool,
    pub city: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            email: user.email.to_owned(),
            name: user.name.to_owned(),
            role: user.role.to_str().to_string(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            skills: user.skills.clone(),
            rating: user.rating,
            completed_projects: user.completed_projects,
            profession: user.profession.clone(),
            experience: user.experience.clone(),
            portfolio: user.portfolio.clone(),
            hourly_rate: user.hourly_rate,
            available: user.available,
            city: user.city.clone(),
            website: user.website.clone(),
            linkedin: user.linkedin.clone(),
            github: user.github.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Public identity attached to chats, messages, projects and bids.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub data: UserData,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}
