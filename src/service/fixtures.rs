//! Seed helpers for service tests.

use crate::{
    db::{memory::MemoryStore, projectdb::ProjectExt, userdb::UserExt},
    models::{
        projectmodel::{Project, ProjectDraft},
        usermodel::{User, UserRole},
    },
};

pub async fn user(store: &MemoryStore, name: &str, role: UserRole) -> User {
    store
        .save_user(
            format!("{}@example.com", name.to_lowercase()),
            "not-a-real-hash".to_string(),
            name.to_string(),
            role,
        )
        .await
        .unwrap()
}

pub fn draft(title: &str, budget_min: i32, budget_max: i32) -> ProjectDraft {
    ProjectDraft {
        title: title.to_string(),
        description: Some(format!("{} description", title)),
        budget_min,
        budget_max,
        category: "design".to_string(),
        location: "remote".to_string(),
        skills: None,
        requirements: None,
        urgency: "normal".to_string(),
        deadline: None,
    }
}

pub async fn project(store: &MemoryStore, owner: &User, budget_min: i32, budget_max: i32) -> Project {
    store
        .save_project(owner.id, draft("Landing page", budget_min, budget_max))
        .await
        .unwrap()
}
