//! Request-scoped actor context.
//!
//! Inbound adapters rebuild a [`RequestContext`] from their session store on
//! every request and hand it to the use-case ports. Services never read
//! ambient state to find out who is calling.

use super::error::Portal;
use super::{AdminIdentity, Error, StudentIdentity};

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Actor {
    #[default]
    Anonymous,
    Student(StudentIdentity),
    Admin(AdminIdentity),
}

/// Authenticated identity for a single request.
///
/// # Examples
/// ```
/// use artsday::domain::{ErrorCode, RequestContext, StudentId, StudentIdentity};
///
/// let ctx = RequestContext::student(StudentIdentity { id: StudentId::new(1), name: "Asha".into() });
/// assert!(ctx.require_student().is_ok());
/// let err = ctx.require_admin().expect_err("students are not admins");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    actor: Actor,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn student(identity: StudentIdentity) -> Self {
        Self {
            actor: Actor::Student(identity),
        }
    }

    pub fn admin(identity: AdminIdentity) -> Self {
        Self {
            actor: Actor::Admin(identity),
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// The calling student, if a student is logged in.
    pub fn current_student(&self) -> Option<&StudentIdentity> {
        match &self.actor {
            Actor::Student(identity) => Some(identity),
            _ => None,
        }
    }

    /// The calling administrator, if an administrator is logged in.
    pub fn current_admin(&self) -> Option<&AdminIdentity> {
        match &self.actor {
            Actor::Admin(identity) => Some(identity),
            _ => None,
        }
    }

    /// The calling student, or a login-required error pointing at the student portal.
    pub fn require_student(&self) -> Result<&StudentIdentity, Error> {
        self.current_student()
            .ok_or_else(|| Error::login_required(Portal::Student))
    }

    /// The calling administrator, or a login-required error pointing at the admin portal.
    pub fn require_admin(&self) -> Result<&AdminIdentity, Error> {
        self.current_admin()
            .ok_or_else(|| Error::login_required(Portal::Admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AdminId, StudentId};
    use rstest::rstest;

    fn student() -> StudentIdentity {
        StudentIdentity {
            id: StudentId::new(5),
            name: "Meera".to_owned(),
        }
    }

    fn admin() -> AdminIdentity {
        AdminIdentity {
            id: AdminId::new(1),
            username: "admin".to_owned(),
        }
    }

    #[rstest]
    fn anonymous_context_is_sent_to_student_login() {
        let err = RequestContext::anonymous()
            .require_student()
            .expect_err("anonymous is not a student");
        assert_eq!(err.login_path(), Some("/student/login"));
    }

    #[rstest]
    fn student_context_is_sent_to_admin_login() {
        let err = RequestContext::student(student())
            .require_admin()
            .expect_err("student is not an admin");
        assert_eq!(err.login_path(), Some("/admin/login"));
    }

    #[rstest]
    fn admin_context_is_not_a_student() {
        let ctx = RequestContext::admin(admin());
        assert!(ctx.current_student().is_none());
        assert_eq!(ctx.current_admin(), Some(&admin()));
    }

    #[rstest]
    fn student_context_exposes_identity() {
        let ctx = RequestContext::student(student());
        assert_eq!(ctx.require_student().ok(), Some(&student()));
        assert_eq!(ctx.actor(), &Actor::Student(student()));
    }
}
