//! HTTP inbound adapter exposing the JSON API.

pub mod admin;
pub mod error;
pub mod health;
pub mod logout;
pub mod session;
pub mod session_config;
pub mod state;
pub mod students;
#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;
pub use state::HttpState;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller supplies the scope, the session middleware and the
/// [`HttpState`] app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use artsday::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(students::register_student)
        .service(students::login_student)
        .service(students::dashboard)
        .service(students::list_eligible_events)
        .service(students::list_my_registrations)
        .service(students::register_for_event)
        .service(admin::login)
        .service(admin::dashboard)
        .service(admin::create_event)
        .service(admin::list_events)
        .service(admin::onstage_participants)
        .service(logout::logout);
}
