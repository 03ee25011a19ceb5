//! Static permission table mapping (resource, action) to the roles allowed
//! to invoke it, consulted by every handler through [`authorize`].

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Candidates,
    JobOrders,
    Submittals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

const MUTATORS: &[Role] = &[Role::Recruiter, Role::Admin, Role::SuperAdmin];
const DESTROYERS: &[Role] = &[Role::Admin, Role::SuperAdmin];

/// The policy is uniform across the three resources today: recruiters and
/// above may create, read, and update; only admins may delete. Kept as a
/// per-resource match so a future divergence is a one-arm change.
pub fn allowed_roles(resource: Resource, action: Action) -> &'static [Role] {
    match (resource, action) {
        (_, Action::Create) | (_, Action::Read) | (_, Action::Update) => MUTATORS,
        (_, Action::Delete) => DESTROYERS,
    }
}

/// Single authorization check shared by all handlers. Authorization is
/// all-or-nothing per operation, never per-record: a recruiter may act on
/// any candidate, not only their own.
pub fn authorize(claims: &Claims, resource: Resource, action: Action) -> Result<Role> {
    let raw = claims.role.as_deref().unwrap_or_default();
    let role = Role::parse(raw)
        .ok_or_else(|| Error::Forbidden(format!("Unknown role: {}", raw)))?;

    if allowed_roles(resource, action).contains(&role) {
        Ok(role)
    } else {
        Err(Error::Forbidden(format!(
            "Role {} may not perform this operation",
            role
        )))
    }
}
