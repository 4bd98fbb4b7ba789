//! Identity Records
//!
//! Users and organizations are entered on a client-side form and never
//! verified. The organization id is the persistence partition key.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Owner,
    Manager,
    Staff,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Manager => "Manager",
            Role::Staff => "Staff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

impl Organization {
    /// Derive the partition id from a display name: lower-cased, every
    /// whitespace run collapsed into `_`.
    pub fn from_name(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        let id = lowered.split_whitespace().collect::<Vec<_>>().join("_");
        Self { id, name: name.trim().to_string() }
    }
}

impl User {
    /// Registered users own their organization.
    pub fn from_registration(name: &str, email: &str) -> Self {
        let id = email
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '@' || c == '.' { '_' } else { c })
            .collect();
        Self {
            id,
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role: Role::Owner,
        }
    }
}

/// Current user plus the organization whose inventory is open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub organization: Organization,
}

impl Session {
    /// Build a session from the login form. All three fields are required.
    pub fn register(name: &str, email: &str, org_name: &str) -> AppResult<Self> {
        if name.trim().is_empty() || email.trim().is_empty() || org_name.trim().is_empty() {
            return Err(AppError::InvalidInput("name, email and organization are required".into()));
        }
        Ok(Self {
            user: User::from_registration(name, email),
            organization: Organization::from_name(org_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_id_from_name() {
        let org = Organization::from_name("Sterling   Logistics Ltd");
        assert_eq!(org.id, "sterling_logistics_ltd");
        assert_eq!(org.name, "Sterling   Logistics Ltd");
    }

    #[test]
    fn test_user_id_from_email() {
        let user = User::from_registration("James", "James.Sterling@Example.com");
        assert_eq!(user.id, "james_sterling_example_com");
        assert_eq!(user.role, Role::Owner);
    }

    #[test]
    fn test_register_requires_all_fields() {
        assert!(Session::register("A", "", "Org").is_err());
        let session = Session::register("A", "a@b.c", "Org").unwrap();
        assert_eq!(session.organization.id, "org");
    }
}
