use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;

use crate::error::AppError;

/// Roles known to the system. Roles gate UI affordances and which lists an
/// actor sees; they are not enforced as data invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Reviewer,
    Author,
    Attendees,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Reviewer => "Reviewer",
            Role::Author => "Author",
            Role::Attendees => "Attendees",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "Reviewer" => Some(Role::Reviewer),
            "Author" => Some(Role::Author),
            "Attendees" => Some(Role::Attendees),
            _ => None,
        }
    }
}

/// Capability set resolved once per request from the actor's role and
/// embedded in page payloads as `can`. The presentation layer consumes
/// these flags; handlers do not re-check them per field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Capabilities {
    pub manage_conferences: bool,
    pub assign_reviewers: bool,
    pub record_decisions: bool,
    pub submit_reviews: bool,
    pub submit_papers: bool,
    pub view_dashboard: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Capabilities {
                manage_conferences: true,
                assign_reviewers: true,
                record_decisions: true,
                submit_reviews: false,
                submit_papers: false,
                view_dashboard: true,
            },
            Role::Reviewer => Capabilities {
                manage_conferences: false,
                assign_reviewers: false,
                record_decisions: false,
                submit_reviews: true,
                submit_papers: false,
                view_dashboard: false,
            },
            Role::Author => Capabilities {
                manage_conferences: false,
                assign_reviewers: false,
                record_decisions: false,
                submit_reviews: false,
                submit_papers: true,
                view_dashboard: false,
            },
            Role::Attendees => Capabilities {
                manage_conferences: false,
                assign_reviewers: false,
                record_decisions: false,
                submit_reviews: false,
                submit_papers: false,
                view_dashboard: false,
            },
        }
    }
}

/// The current actor, as asserted by the fronting auth service via the
/// `x-actor-id` / `x-actor-role` headers. Trusted without re-validation.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(self.role)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| {
                AppError::validation(vec![(
                    "actor".to_string(),
                    "missing or invalid x-actor-id header".to_string(),
                )])
            })?;

        let role = parts
            .headers
            .get("x-actor-role")
            .and_then(|v| v.to_str().ok())
            .and_then(Role::parse)
            .unwrap_or(Role::Attendees);

        Ok(Actor { id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_editorial_capabilities() {
        let can = Capabilities::for_role(Role::Admin);
        assert!(can.manage_conferences);
        assert!(can.assign_reviewers);
        assert!(can.record_decisions);
        assert!(!can.submit_reviews);
    }

    #[test]
    fn reviewer_can_only_review() {
        let can = Capabilities::for_role(Role::Reviewer);
        assert!(can.submit_reviews);
        assert!(!can.assign_reviewers);
        assert!(!can.record_decisions);
        assert!(!can.manage_conferences);
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        assert_eq!(Role::parse("Organizer"), None);
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
    }
}
