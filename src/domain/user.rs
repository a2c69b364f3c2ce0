//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, immutable once issued
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: i32, name: String, email: String) -> Self {
        Self { id, name, email }
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address (unique)
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "john@example.com")]
    pub email: String,
}

/// User update data transfer object.
///
/// Absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New email address
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
}

impl UpdateUser {
    /// True when the update carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// User response (the shape returned to clients)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[schema(example = "john@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_omits_identifier() {
        let user = User::new(42, "Ada".to_string(), "ada@example.com".to_string());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "name": "Ada", "email": "ada@example.com" })
        );
    }

    #[test]
    fn test_create_requires_both_fields() {
        let missing: Result<CreateUser, _> =
            serde_json::from_str(r#"{ "name": "Ada" }"#);
        assert!(missing.is_err());

        let empty = CreateUser {
            name: String::new(),
            email: "ada@example.com".to_string(),
        };
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_update_fields_are_optional() {
        let update: UpdateUser = serde_json::from_str(r#"{ "email": "new@example.com" }"#).unwrap();
        assert_eq!(update.name, None);
        assert_eq!(update.email.as_deref(), Some("new@example.com"));
        assert!(!update.is_empty());
        assert!(update.validate().is_ok());

        let nothing: UpdateUser = serde_json::from_str("{}").unwrap();
        assert!(nothing.is_empty());
        assert!(nothing.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_empty_present_field() {
        let update = UpdateUser {
            name: Some(String::new()),
            email: None,
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
