use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::enums::Role,
    error::{AppError, AppResult},
    models::User,
};

/// Registration payload. Every field is optional at the serde level so that
/// missing and empty required fields can be reported together in one
/// structured validation error instead of a deserializer rejection.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
}

/// Registration input after validation.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
}

impl RegisterRequest {
    pub fn validate(self) -> AppResult<NewUser> {
        let required = [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        // The filter above guarantees these are present and non-empty.
        let username = self.username.unwrap_or_default();
        let email = self.email.unwrap_or_default();
        let password = self.password.unwrap_or_default();
        let first_name = self.first_name.unwrap_or_default();
        let last_name = self.last_name.unwrap_or_default();

        if password.len() < 6 {
            return Err(AppError::Validation(
                "Password must be at least 6 characters long".into(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::Validation("Invalid email format".into()));
        }

        Ok(NewUser {
            username,
            email,
            password,
            first_name,
            last_name,
            role: self.role.unwrap_or(Role::Buyer),
            phone: self.phone.filter(|s| !s.is_empty()),
            address: self.address.filter(|s| !s.is_empty()),
            avatar: self.avatar.filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> RegisterRequest {
        RegisterRequest {
            username: Some("ferris".into()),
            email: Some("ferris@example.com".into()),
            password: Some("secret123".into()),
            first_name: Some("Ferris".into()),
            last_name: Some("Crab".into()),
            role: None,
            phone: None,
            address: None,
            avatar: None,
        }
    }

    #[test]
    fn reports_all_missing_fields_at_once() {
        let req = RegisterRequest {
            username: None,
            email: Some("".into()),
            ..full_request()
        };
        let err = req.validate().unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("username"));
                assert!(msg.contains("email"));
                assert!(!msg.contains("password"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn defaults_role_to_buyer() {
        let user = full_request().validate().unwrap();
        assert_eq!(user.role, Role::Buyer);
    }

    #[test]
    fn rejects_short_password_and_bad_email() {
        let req = RegisterRequest {
            password: Some("short".into()),
            ..full_request()
        };
        assert!(req.validate().is_err());

        let req = RegisterRequest {
            email: Some("not-an-email".into()),
            ..full_request()
        };
        assert!(req.validate().is_err());
    }
}
