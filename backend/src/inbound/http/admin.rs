//! Administrator handlers.
//!
//! ```text
//! POST /api/v1/admin/login {"username":"admin","password":"admin123"}
//! POST /api/v1/admin/events {"name":"Solo Singing","category":"onstage",...}
//! GET /api/v1/admin/onstage
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    AdminCredentials, AdminIdentity, CredentialsValidationError, DEFAULT_MAX_PARTICIPANTS, Error,
    EventId, EventSummary, NewEvent, OnstageParticipant,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_category, positive_or_default, require_text, require_timestamp,
};

const CREATED_MESSAGE: &str = "Event created successfully!";

/// Body of `POST /api/v1/admin/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<AdminLoginRequest> for AdminCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: AdminLoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Blank fields fail like any other bad login so the response reveals nothing.
fn map_login_validation_error(err: CredentialsValidationError) -> Error {
    debug!(reason = %err, "admin login rejected before lookup");
    Error::invalid_credentials()
}

/// Body of `POST /api/v1/admin/events`.
///
/// Timestamps accept RFC 3339 or the `YYYY-MM-DDTHH:MM` form produced by
/// `datetime-local` inputs, read as UTC.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = "onstage")]
    pub category: Option<String>,
    pub max_participants: Option<i32>,
    #[schema(example = "2026-11-01T17:00")]
    pub registration_deadline: Option<String>,
    #[schema(example = "2026-11-05T10:00:00Z")]
    pub event_date: Option<String>,
    pub venue: Option<String>,
}

impl TryFrom<CreateEventRequest> for NewEvent {
    type Error = Error;

    fn try_from(value: CreateEventRequest) -> Result<Self, Self::Error> {
        Ok(NewEvent {
            name: require_text(value.name, FieldName::new("name"))?,
            description: value
                .description
                .map(|text| text.trim().to_owned())
                .unwrap_or_default(),
            category: parse_category(value.category)?,
            max_participants: positive_or_default(
                value.max_participants,
                DEFAULT_MAX_PARTICIPANTS,
                FieldName::new("maxParticipants"),
            )?,
            registration_deadline: require_timestamp(
                value.registration_deadline,
                FieldName::new("registrationDeadline"),
            )?,
            event_date: require_timestamp(value.event_date, FieldName::new("eventDate"))?,
            venue: require_text(value.venue, FieldName::new("venue"))?,
        })
    }
}

/// Response to a successful event creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCreatedResponse {
    pub event_id: EventId,
    pub message: String,
}

/// Administrator dashboard payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub admin: AdminIdentity,
}

/// Authenticate an administrator and establish a session.
///
/// Unknown usernames and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login success", body = AdminIdentity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed body", body = Error),
        (status = 401, description = "Invalid or blank credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "loginAdmin",
    security([])
)]
#[post("/admin/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<web::Json<AdminIdentity>> {
    let credentials =
        AdminCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let admin = state.admins.login_admin(&credentials).await?;
    session.persist_admin(&admin)?;
    Ok(web::Json(admin))
}

/// Identity of the logged-in administrator.
#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = AdminDashboard),
        (status = 401, description = "Login required", body = Error,
            headers(("Location" = String, description = "Admin login entry point")))
    ),
    tags = ["admin"],
    operation_id = "adminDashboard"
)]
#[get("/admin/dashboard")]
pub async fn dashboard(session: SessionContext) -> ApiResult<web::Json<AdminDashboard>> {
    let ctx = session.request_context();
    let admin = ctx.require_admin()?.clone();
    Ok(web::Json(AdminDashboard { admin }))
}

/// Create an event owned by the calling administrator.
#[utoipa::path(
    post,
    path = "/api/v1/admin/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventCreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createEvent"
)]
#[post("/admin/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateEventRequest>,
) -> ApiResult<HttpResponse> {
    let ctx = session.request_context();
    ctx.require_admin()?;
    let draft = NewEvent::try_from(payload.into_inner())?;
    let event_id = state.catalogue.create_event(&ctx, draft).await?;
    Ok(HttpResponse::Created().json(EventCreatedResponse {
        event_id,
        message: CREATED_MESSAGE.to_owned(),
    }))
}

/// Every event with its registration count, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/events",
    responses(
        (status = 200, description = "All events", body = [EventSummary]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAllEvents"
)]
#[get("/admin/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<EventSummary>>> {
    let ctx = session.request_context();
    let events = state.catalogue.list_all_events(&ctx).await?;
    Ok(web::Json(events))
}

/// Roster of students registered for onstage events.
#[utoipa::path(
    get,
    path = "/api/v1/admin/onstage",
    responses(
        (status = 200, description = "Onstage roster", body = [OnstageParticipant]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listOnstageParticipants"
)]
#[get("/admin/onstage")]
pub async fn onstage_participants(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OnstageParticipant>>> {
    let ctx = session.request_context();
    let roster = state.catalogue.list_onstage_participants(&ctx).await?;
    Ok(web::Json(roster))
}
