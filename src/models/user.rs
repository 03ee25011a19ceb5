use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// External identity referenced by candidates (recruiter) and job orders
/// (client). Token issuance lives outside this service; rows here only give
/// ownership and the role claim something to resolve against.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Recruiter,
    Admin,
    SuperAdmin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "RECRUITER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Client => "CLIENT",
        }
    }

    /// Role claims arrive as free-form strings from the token issuer; match
    /// case-insensitively, reject anything outside the known set.
    pub fn parse(raw: &str) -> Option<Role> {
        let normalized = raw.trim();
        [Role::Recruiter, Role::Admin, Role::SuperAdmin, Role::Client]
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(normalized))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!(Role::parse("RECRUITER"), Some(Role::Recruiter));
        assert_eq!(Role::parse("super_admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse(" client "), Some(Role::Client));
    }

    #[test]
    fn rejects_unknown_roles() {
        assert_eq!(Role::parse("MANAGER"), None);
        assert_eq!(Role::parse(""), None);
    }
}
