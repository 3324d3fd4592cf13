//! Marketplace accounts and their roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{repositories::Record, types::UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Role describing what a user may do on the marketplace.
pub enum UserRole {
    /// Enters contests and submits work.
    #[default]
    Participant,
    /// Runs contests.
    Creator,
    Admin,
}

impl UserRole {
    pub const VALUES: [&'static str; 3] = ["participant", "creator", "admin"];

    /// Returns the canonical lowercase representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Participant => "participant",
            UserRole::Creator => "creator",
            UserRole::Admin => "admin",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "participant" => Ok(UserRole::Participant),
            "creator" => Ok(UserRole::Creator),
            "admin" => Ok(UserRole::Admin),
            other => Err(serde::de::Error::unknown_variant(other, &UserRole::VALUES)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(payload: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: payload.name,
            email: payload.email.trim().to_string(),
            role: payload.role.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl Record for User {
    type Id = UserId;
    const KIND: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }
}

#[derive(Debug, Deserialize)]
/// Payload for creating a new user account.
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Omitted or `null` means [`UserRole::Participant`].
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Default, Deserialize)]
/// Payload for updating portions of an existing user.
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRole {
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
}

impl UserListQuery {
    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none() || self.role == Some(user.role)
    }
}
