//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every `/api/v1` handler, the health probes and the
//! JSON bodies they exchange. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AdminIdentity, Error, ErrorCode, Event, EventCategory, EventSummary, OnstageParticipant,
    Registration, RegistrationStatus, StudentIdentity, StudentRegistration,
};
use crate::inbound::http::admin::{
    AdminDashboard, AdminLoginRequest, CreateEventRequest, EventCreatedResponse,
};
use crate::inbound::http::students::{
    RegisterStudentRequest, RegistrationResponse, StudentDashboard, StudentLoginRequest,
    StudentRegisteredResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the student or admin login endpoints.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Arts day registration API",
        description = "Student sign-up and event registration, plus the administrator portal."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::students::register_student,
        crate::inbound::http::students::login_student,
        crate::inbound::http::students::dashboard,
        crate::inbound::http::students::list_eligible_events,
        crate::inbound::http::students::list_my_registrations,
        crate::inbound::http::students::register_for_event,
        crate::inbound::http::admin::login,
        crate::inbound::http::admin::dashboard,
        crate::inbound::http::admin::create_event,
        crate::inbound::http::admin::list_events,
        crate::inbound::http::admin::onstage_participants,
        crate::inbound::http::logout::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        StudentIdentity,
        AdminIdentity,
        Event,
        EventCategory,
        EventSummary,
        Registration,
        RegistrationStatus,
        StudentRegistration,
        OnstageParticipant,
        RegisterStudentRequest,
        StudentLoginRequest,
        StudentRegisteredResponse,
        StudentDashboard,
        RegistrationResponse,
        AdminLoginRequest,
        AdminDashboard,
        CreateEventRequest,
        EventCreatedResponse,
    )),
    tags(
        (name = "students", description = "Student sign-up, login and event registration"),
        (name = "admin", description = "Event management and rosters"),
        (name = "session", description = "Session lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
