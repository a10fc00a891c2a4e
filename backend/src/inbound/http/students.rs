//! Student self-service handlers.
//!
//! ```text
//! POST /api/v1/students {"name":"Asha","email":"asha@example.edu","department":"Music"}
//! POST /api/v1/students/login {"email":"asha@example.edu"}
//! GET /api/v1/students/me/dashboard
//! POST /api/v1/events/7/registrations
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, EventId, EventSummary, NewStudent, Registration, StudentIdentity, StudentRegistration,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_text};

const REGISTERED_MESSAGE: &str = "Registration successful! You can now register for events.";
const ENROLLED_MESSAGE: &str = "Successfully registered for the event!";

/// Body of `POST /api/v1/students`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}

impl TryFrom<RegisterStudentRequest> for NewStudent {
    type Error = Error;

    fn try_from(value: RegisterStudentRequest) -> Result<Self, Self::Error> {
        let name = require_text(value.name, FieldName::new("name"))?;
        let email = require_text(value.email, FieldName::new("email"))?;
        let department = require_text(value.department, FieldName::new("department"))?;
        let phone = value.phone.map(|phone| phone.trim().to_owned());
        Ok(NewStudent::new(name, email, department, phone))
    }
}

/// Body of `POST /api/v1/students/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentLoginRequest {
    pub email: Option<String>,
}

/// Response to a successful student registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegisteredResponse {
    pub student: StudentIdentity,
    pub message: String,
}

/// Everything the student dashboard shows in one payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub student: StudentIdentity,
    pub events: Vec<EventSummary>,
    pub registrations: Vec<StudentRegistration>,
}

/// Response to a successful event registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub registration: Registration,
    pub message: String,
}

/// Create a student account and log it in.
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentRegisteredResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["students"],
    operation_id = "registerStudent",
    security([])
)]
#[post("/students")]
pub async fn register_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterStudentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewStudent::try_from(payload.into_inner())?;
    let student = state.students.register_student(draft).await?;
    session.persist_student(&student)?;
    Ok(HttpResponse::Created().json(StudentRegisteredResponse {
        student,
        message: REGISTERED_MESSAGE.to_owned(),
    }))
}

/// Log a student in by email address.
#[utoipa::path(
    post,
    path = "/api/v1/students/login",
    request_body = StudentLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = StudentIdentity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Student not found", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["students"],
    operation_id = "loginStudent",
    security([])
)]
#[post("/students/login")]
pub async fn login_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StudentLoginRequest>,
) -> ApiResult<web::Json<StudentIdentity>> {
    let email = require_text(payload.into_inner().email, FieldName::new("email"))?;
    let student = state.students.login_student(&email).await?;
    session.persist_student(&student)?;
    Ok(web::Json(student))
}

/// Open events and the caller's registrations.
#[utoipa::path(
    get,
    path = "/api/v1/students/me/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = StudentDashboard),
        (status = 401, description = "Login required", body = Error,
            headers(("Location" = String, description = "Student login entry point"))),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["students"],
    operation_id = "studentDashboard"
)]
#[get("/students/me/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StudentDashboard>> {
    let ctx = session.request_context();
    let student = ctx.require_student()?.clone();
    let events = state
        .catalogue
        .list_eligible_events(&ctx, state.clock.utc())
        .await?;
    let registrations = state.registrations.list_my_registrations(&ctx).await?;
    Ok(web::Json(StudentDashboard {
        student,
        events,
        registrations,
    }))
}

/// Events whose registration deadline has not passed.
#[utoipa::path(
    get,
    path = "/api/v1/students/me/events",
    responses(
        (status = 200, description = "Open events", body = [EventSummary]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["students"],
    operation_id = "listEligibleEvents"
)]
#[get("/students/me/events")]
pub async fn list_eligible_events(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<EventSummary>>> {
    let ctx = session.request_context();
    let events = state
        .catalogue
        .list_eligible_events(&ctx, state.clock.utc())
        .await?;
    Ok(web::Json(events))
}

/// The caller's registrations, soonest event first.
#[utoipa::path(
    get,
    path = "/api/v1/students/me/registrations",
    responses(
        (status = 200, description = "Registrations", body = [StudentRegistration]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["students"],
    operation_id = "listMyRegistrations"
)]
#[get("/students/me/registrations")]
pub async fn list_my_registrations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<StudentRegistration>>> {
    let ctx = session.request_context();
    let registrations = state.registrations.list_my_registrations(&ctx).await?;
    Ok(web::Json(registrations))
}

/// Register the caller for an event.
#[utoipa::path(
    post,
    path = "/api/v1/events/{event_id}/registrations",
    params(("event_id" = i64, Path, description = "Event identifier")),
    responses(
        (status = 201, description = "Registered", body = RegistrationResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Event not found", body = Error),
        (status = 409, description = "Already registered, closed or full", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["students"],
    operation_id = "registerForEvent"
)]
#[post("/events/{event_id}/registrations")]
pub async fn register_for_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let ctx = session.request_context();
    let event_id = EventId::new(path.into_inner());
    let registration = state
        .registrations
        .register_for_event(&ctx, event_id)
        .await?;
    Ok(HttpResponse::Created().json(RegistrationResponse {
        registration,
        message: ENROLLED_MESSAGE.to_owned(),
    }))
}
