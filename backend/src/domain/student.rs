//! Student accounts created through self-registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StudentId;

/// Identity an authenticated student carries through a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub id: StudentId,
    #[schema(example = "Asha Menon")]
    pub name: String,
}

/// Stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Identity to place in the request context.
    pub fn identity(&self) -> StudentIdentity {
        StudentIdentity {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Registration form for a new student.
///
/// Values are stored as given; uniqueness of `email` is left to the store.
/// A phone number made only of whitespace is treated as absent.
///
/// # Examples
/// ```
/// use artsday::domain::NewStudent;
///
/// let draft = NewStudent::new("Asha", "asha@example.edu", "Music", Some("  ".to_owned()));
/// assert!(draft.phone().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    name: String,
    email: String,
    department: String,
    phone: Option<String>,
}

impl NewStudent {
    /// Build a registration form from raw field values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
            phone: phone.filter(|value| !value.trim().is_empty()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some("98765 43210"), Some("98765 43210"))]
    fn blank_phone_is_absent(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let draft = NewStudent::new("Asha", "asha@example.edu", "Music", raw.map(str::to_owned));
        assert_eq!(draft.phone(), expected);
    }

    #[rstest]
    fn identity_copies_id_and_name() {
        let student = Student {
            id: StudentId::new(3),
            name: "Ravi".to_owned(),
            email: "ravi@example.edu".to_owned(),
            department: "Dance".to_owned(),
            phone: None,
            created_at: Utc::now(),
        };
        let identity = student.identity();
        assert_eq!(identity.id, StudentId::new(3));
        assert_eq!(identity.name, "Ravi");
    }
}
