//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope. Recoverable business
//! failures carry a stable reason under `details.code` so clients can react
//! without parsing the human-readable message.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request clashes with existing state.
    Conflict,
    /// A backing store is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Which login entry point an anonymous actor is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    /// Student self-service pages.
    Student,
    /// Administrator pages.
    Admin,
}

impl Portal {
    /// Path of the login entry point for this portal.
    pub fn login_path(self) -> &'static str {
        match self {
            Self::Student => "/student/login",
            Self::Admin => "/admin/login",
        }
    }
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use artsday::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.reason().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "conflict")]
    code: ErrorCode,
    #[schema(example = "You are already registered for this event!")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, when one was in scope or attached explicitly.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Stable reason string stored under `details.code`, if any.
    ///
    /// # Examples
    /// ```
    /// use artsday::domain::Error;
    ///
    /// assert_eq!(Error::duplicate_email().reason(), Some("duplicate_email"));
    /// ```
    pub fn reason(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("code"))
            .and_then(Value::as_str)
    }

    /// Login entry point the caller should be sent to, if any.
    pub fn login_path(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("loginPath"))
            .and_then(Value::as_str)
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use artsday::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// A student with this email address already exists.
    pub fn duplicate_email() -> Self {
        Self::conflict("Email already registered!").with_details(json!({
            "code": "duplicate_email",
            "field": "email",
        }))
    }

    /// The student already holds a registration for this event.
    pub fn already_registered() -> Self {
        Self::conflict("You are already registered for this event!")
            .with_details(json!({ "code": "already_registered" }))
    }

    /// Unknown administrator or wrong password; both look the same.
    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid credentials!")
            .with_details(json!({ "code": "invalid_credentials" }))
    }

    /// No student has the supplied email address.
    pub fn student_not_found() -> Self {
        Self::not_found("Student not found!").with_details(json!({ "code": "student_not_found" }))
    }

    /// The referenced event does not exist.
    pub fn event_not_found() -> Self {
        Self::not_found("Event not found!").with_details(json!({ "code": "event_not_found" }))
    }

    /// A protected operation was attempted without the matching identity.
    pub fn login_required(portal: Portal) -> Self {
        Self::unauthorized("Please log in to continue.").with_details(json!({
            "code": "login_required",
            "loginPath": portal.login_path(),
        }))
    }

    /// The event category is neither `onstage` nor `offstage`.
    pub fn invalid_category(value: &str) -> Self {
        Self::invalid_request("category must be onstage or offstage").with_details(json!({
            "code": "invalid_category",
            "field": "category",
            "value": value,
        }))
    }

    /// Registration was attempted after the deadline while the deadline is enforced.
    pub fn registration_closed() -> Self {
        Self::conflict("Registration for this event has closed!")
            .with_details(json!({ "code": "registration_closed" }))
    }

    /// Registration was attempted on a full event while capacity is enforced.
    pub fn event_full() -> Self {
        Self::conflict("This event is already full!").with_details(json!({ "code": "event_full" }))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
