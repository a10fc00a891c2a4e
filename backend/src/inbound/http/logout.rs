//! Session teardown shared by both portals.

use actix_web::{HttpResponse, post};

use crate::inbound::http::session::SessionContext;

/// Forget every identity held in the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::json;

    use crate::domain::RegistrationPolicy;
    use crate::inbound::http::test_utils::{api_app, seeded_state, session_cookie};

    #[actix_web::test]
    async fn logout_drops_the_student_identity() {
        let app = actix_test::init_service(api_app(seeded_state(RegistrationPolicy::default()).await))
            .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/students")
                .set_json(json!({
                    "name": "Asha",
                    "email": "asha@example.edu",
                    "department": "Music",
                }))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res).expect("session cookie");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let expired = session_cookie(&res).expect("removal cookie");
        assert_eq!(expired.value(), "");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/students/me/registrations")
                .cookie(expired)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
