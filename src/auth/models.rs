use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::db::models::User;
use crate::error::{AppError, FieldError};

// Fields are reported in declared order so clients see a stable error list.
const VALIDATED_FIELDS: &[&str] = &["email", "password"];

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl SignupRequest {
    pub fn validated(self) -> Result<Self, AppError> {
        self.validate()
            .map_err(|e| AppError::Validation(ordered_field_errors(&e)))?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn validated(self) -> Result<Self, AppError> {
        self.validate()
            .map_err(|e| AppError::Validation(ordered_field_errors(&e)))?;
        Ok(self)
    }
}

/// Flatten `ValidationErrors` into one entry per violated rule, in declared
/// field order.
fn ordered_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();
    for &field in VALIDATED_FIELDS {
        if let Some(violations) = by_field.get(field) {
            for violation in violations.iter() {
                out.push(FieldError {
                    field: field.to_string(),
                    message: violation
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| violation.code.to_string()),
                });
            }
        }
    }
    out
}

/// User view returned to clients. Carries no hash and no internal fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tier: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            tier: user.tier,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}
