use serde::{Deserialize, Serialize};

use super::repo_types::UserProfile;
use crate::{auth::repo_types::User, dto::validate_name, error::ApiError};

#[derive(Debug, Serialize)]
pub struct LoginInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profile of the caller; body measurements are null until first saved.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub login: LoginInfo,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

impl ProfileResponse {
    pub fn new(user: User, profile: Option<UserProfile>) -> Self {
        Self {
            login: LoginInfo {
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
            },
            age: profile.as_ref().map(|p| p.age),
            weight: profile.as_ref().map(|p| p.weight),
            height: profile.as_ref().map(|p| p.height),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NamesRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub login: NamesRequest,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
}

impl UpdateProfileRequest {
    /// Returns the trimmed (first, last) names once every field checks out.
    pub fn validate(&self) -> Result<(String, String), ApiError> {
        if !(0..=150).contains(&self.age) {
            return Err(ApiError::BadRequest("age must be between 0 and 150".into()));
        }
        if !(self.weight.is_finite() && self.weight > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(ApiError::BadRequest("weight and height must be positive".into()));
        }
        Ok((
            validate_name("first_name", &self.login.first_name, 150)?,
            validate_name("last_name", &self.login.last_name, 150)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "ana@example.com".into(),
            password_hash: "x".into(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            is_admin: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn missing_profile_serializes_nulls() {
        let json = serde_json::to_value(ProfileResponse::new(user(), None)).unwrap();
        assert_eq!(json["login"]["email"], "ana@example.com");
        assert!(json["age"].is_null());
        assert!(json["weight"].is_null());
    }

    #[test]
    fn existing_profile_is_embedded() {
        let u = user();
        let profile = UserProfile {
            id: 1,
            user_id: u.id,
            age: 31,
            weight: 70.5,
            height: 1.72,
            active: true,
            modified_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(ProfileResponse::new(u, Some(profile))).unwrap();
        assert_eq!(json["age"], 31);
        assert_eq!(json["weight"], 70.5);
        assert_eq!(json["login"]["first_name"], "Ana");
    }

    #[test]
    fn update_request_validation() {
        let parse = |s: &str| serde_json::from_str::<UpdateProfileRequest>(s).unwrap();
        let ok = parse(
            r#"{"login":{"first_name":" Ana ","last_name":"Silva"},"age":30,"weight":60,"height":165}"#,
        );
        assert_eq!(ok.validate().unwrap(), ("Ana".to_string(), "Silva".to_string()));

        let bad_age = parse(
            r#"{"login":{"first_name":"Ana","last_name":"Silva"},"age":-1,"weight":60,"height":165}"#,
        );
        assert!(bad_age.validate().is_err());

        let bad_weight = parse(
            r#"{"login":{"first_name":"Ana","last_name":"Silva"},"age":30,"weight":0,"height":165}"#,
        );
        assert!(bad_weight.validate().is_err());
    }
}
