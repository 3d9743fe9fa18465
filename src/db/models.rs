use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tier assigned to every account at creation.
pub const DEFAULT_TIER: &str = "free";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    // Never serialized, even if the entity leaks into a response.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: String,
    pub tier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        password_hash: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        let display_name = first_name
            .clone()
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: Some(password_hash),
            first_name,
            last_name,
            display_name,
            tier: DEFAULT_TIER.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One issued refresh token, durably recorded for a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: Uuid, refresh_token: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            refresh_token,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "maya@example.com".to_string(),
            "$2b$10$hash".to_string(),
            Some("Maya".to_string()),
            Some("Lindqvist".to_string()),
        );

        assert_eq!(user.tier, DEFAULT_TIER);
        assert_eq!(user.display_name, "Maya");
        assert!(user.password_hash.is_some());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        let user = User::new(
            "maya@example.com".to_string(),
            "$2b$10$hash".to_string(),
            None,
            None,
        );

        assert_eq!(user.display_name, "maya");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new(
            "maya@example.com".to_string(),
            "$2b$10$hash".to_string(),
            None,
            None,
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "maya@example.com");
    }

    #[test]
    fn test_session_expiry_is_creation_plus_ttl() {
        let ttl = Duration::days(7);
        let session = Session::new(Uuid::new_v4(), "token".to_string(), ttl);

        assert_eq!(session.expires_at - session.created_at, ttl);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_session_expired_in_the_past() {
        let session = Session::new(Uuid::new_v4(), "token".to_string(), Duration::days(-1));
        assert!(session.is_expired());
    }
}
