//! Route handlers organized by resource

use serde::Serialize;

pub mod auth;
pub mod configuration;
pub mod costs;
pub mod health;
pub mod journal;
pub mod operations;

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{"success": true, "id": n}` for created rows
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(id: i32) -> Self {
        Self { success: true, id }
    }
}
