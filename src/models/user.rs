// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique email address, the login-free identity of a student.
    pub email: String,

    pub full_name: Option<String>,

    pub avatar_url: Option<String>,

    /// School class the student belongs to (e.g., "12A1").
    pub class_name: Option<String>,

    pub school: Option<String>,
}

/// DTO for creating a user. Also used by PUT as a full replacement:
/// absent optional fields clear the stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertUserRequest {
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,

    #[validate(length(max = 100))]
    pub full_name: Option<String>,

    #[validate(custom(function = validate_url_string))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 50))]
    pub class_name: Option<String>,

    #[validate(length(max = 200))]
    pub school: Option<String>,
}

/// Validates that a string is a correctly formatted URL.
pub fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}
