//! Administrator accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AdminId;

/// Identity an authenticated administrator carries through a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub id: AdminId,
    #[schema(example = "admin")]
    pub username: String,
}

/// Stored administrator record, including the password hash.
///
/// The hash is a PHC string; it never leaves the domain through a
/// serialised response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub id: AdminId,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    /// Identity to place in the request context after a successful login.
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Administrator row to insert during bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub username: String,
    pub password_hash: String,
}
