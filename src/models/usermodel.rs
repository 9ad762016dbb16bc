use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Client,
    Freelancer,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Client => "client",
            UserRole::Freelancer => "freelancer",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Freelancer
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    /// JSON array of skills, stored as text.
    pub skills: Option<String>,
    pub role: UserRole,
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

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub role: Option<UserRole>,
    pub profession: Option<String>,
    pub experience: Option<String>,
    pub portfolio: Option<String>,
    pub hourly_rate: Option<i32>,
    pub available: Option<bool>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl ProfileUpdate {
    pub fn apply_to(&self, user: &mut User) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        set(&mut user.name, &self.name);
        set_opt(&mut user.avatar, &self.avatar);
        set_opt(&mut user.bio, &self.bio);
        set_opt(&mut user.skills, &self.skills);
        set(&mut user.role, &self.role);
        set_opt(&mut user.profession, &self.profession);
        set_opt(&mut user.experience, &self.experience);
        set_opt(&mut user.portfolio, &self.portfolio);
        set_opt(&mut user.hourly_rate, &self.hourly_rate);
        set(&mut user.available, &self.available);
        set_opt(&mut user.city, &self.city);
        set_opt(&mut user.website, &self.website);
        set_opt(&mut user.linkedin, &self.linkedin);
        set_opt(&mut user.github, &self.github);
    }
}
