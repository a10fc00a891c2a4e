//! Behaviour tests for student sign-up, event registration and the admin
//! roster, driven over HTTP against the in-memory store.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use artsday::Trace;
use artsday::domain::{DefaultAdmin, RegistrationPolicy};
use artsday::inbound::http::{HttpState, configure_api};
use artsday::outbound::{Argon2CredentialHasher, InMemoryStore};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

// The PostgreSQL constructor is unused here.
#[allow(dead_code)]
#[path = "../src/server/state_builders.rs"]
mod state_builders;

use state_builders::{Repositories, build_http_state};

type MemoryRepositories = Repositories<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore>;

struct Reply {
    status: u16,
    location: Option<String>,
    cookie: Option<Cookie<'static>>,
    body: Value,
}

struct RegistrationWorld {
    repos: MemoryRepositories,
    hasher: Arc<Argon2CredentialHasher>,
    key: Key,
    policy: Cell<RegistrationPolicy>,
    admin_cookie: RefCell<Option<Cookie<'static>>>,
    student_cookie: RefCell<Option<Cookie<'static>>>,
    signed_up: RefCell<Option<Value>>,
    logged_in: RefCell<Option<Value>>,
    events: RefCell<HashMap<String, i64>>,
    last: RefCell<Option<Reply>>,
}

fn run<T>(future: impl std::future::Future<Output = T>) -> T {
    actix_web::rt::System::new().block_on(future)
}

fn unquote(value: &str) -> String {
    value.trim_matches('"').to_owned()
}

impl RegistrationWorld {
    fn new() -> Self {
        let params = Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )
        .expect("minimal argon2 params");
        let world = Self {
            repos: Repositories::in_memory(Arc::new(InMemoryStore::default())),
            hasher: Arc::new(Argon2CredentialHasher::with_params(params)),
            key: Key::generate(),
            policy: Cell::new(RegistrationPolicy::default()),
            admin_cookie: RefCell::new(None),
            student_cookie: RefCell::new(None),
            signed_up: RefCell::new(None),
            logged_in: RefCell::new(None),
            events: RefCell::new(HashMap::new()),
            last: RefCell::new(None),
        };
        run(world.repos.seed_default_admin(
            world.hasher.as_ref(),
            &DefaultAdmin::new("admin", "admin123"),
        ))
        .expect("seed default admin");
        world
    }

    fn state(&self) -> web::Data<HttpState> {
        build_http_state(
            &self.repos,
            self.hasher.clone(),
            Arc::new(DefaultClock),
            self.policy.get(),
        )
    }

    fn send(&self, request: actix_test::TestRequest, cookie: Option<Cookie<'static>>) -> Reply {
        let state = self.state();
        let key = self.key.clone();
        let request = match cookie {
            Some(cookie) => request.cookie(cookie),
            None => request,
        };
        run(async move {
            let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
                .cookie_name("session".to_owned())
                .cookie_secure(false)
                .build();
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(Trace)
                    .service(web::scope("/api/v1").wrap(session).configure(configure_api)),
            )
            .await;
            let res = actix_test::call_service(&app, request.to_request()).await;
            let status = res.status().as_u16();
            let location = res
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let cookie = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .map(Cookie::into_owned);
            let bytes = actix_test::read_body(res).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            Reply {
                status,
                location,
                cookie,
                body,
            }
        })
    }

    fn remember(&self, reply: Reply) {
        *self.last.borrow_mut() = Some(reply);
    }

    fn admin_session(&self) -> Cookie<'static> {
        if let Some(cookie) = self.admin_cookie.borrow().clone() {
            return cookie;
        }
        let reply = self.send(
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/login")
                .set_json(json!({"username": "admin", "password": "admin123"})),
            None,
        );
        assert_eq!(reply.status, 200, "admin login failed: {}", reply.body);
        let cookie = reply.cookie.expect("admin session cookie");
        *self.admin_cookie.borrow_mut() = Some(cookie.clone());
        cookie
    }

    fn create_event(&self, category: &str, name: &str, deadline_days: i64, held_in_days: i64) {
        let now = Utc::now();
        let reply = self.send(
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/events")
                .set_json(json!({
                    "name": name,
                    "category": category,
                    "registrationDeadline": (now + Duration::days(deadline_days)).to_rfc3339(),
                    "eventDate": (now + Duration::days(held_in_days)).to_rfc3339(),
                    "venue": "Main Hall",
                })),
            Some(self.admin_session()),
        );
        assert_eq!(reply.status, 201, "event creation failed: {}", reply.body);
        let id = reply.body["eventId"].as_i64().expect("event id");
        self.events.borrow_mut().insert(name.to_owned(), id);
    }

    fn student_session(&self) -> Option<Cookie<'static>> {
        self.student_cookie.borrow().clone()
    }

    fn with_last<F>(&self, f: F)
    where
        F: FnOnce(&Reply),
    {
        let last = self.last.borrow();
        f(last.as_ref().expect("a request was made"));
    }
}

#[fixture]
fn world() -> RegistrationWorld {
    RegistrationWorld::new()
}

#[given("a fresh arts day service")]
fn a_fresh_arts_day_service(world: &RegistrationWorld) {
    world.policy.set(RegistrationPolicy::default());
}

#[given("a fresh arts day service with the deadline enforced")]
fn a_fresh_service_with_the_deadline_enforced(world: &RegistrationWorld) {
    world.policy.set(RegistrationPolicy {
        enforce_deadline: true,
        enforce_capacity: false,
    });
}

#[given("a fresh arts day service with capacity enforced")]
fn a_fresh_service_with_capacity_enforced(world: &RegistrationWorld) {
    world.policy.set(RegistrationPolicy {
        enforce_deadline: false,
        enforce_capacity: true,
    });
}

#[given("the admin has created {category} event {name} closing tomorrow and held in {days} days")]
fn the_admin_has_created_an_open_event(
    world: &RegistrationWorld,
    category: String,
    name: String,
    days: i64,
) {
    world.create_event(&category, &unquote(&name), 1, days);
}

#[given("the admin has created {category} event {name} that closed yesterday")]
fn the_admin_has_created_a_closed_event(world: &RegistrationWorld, category: String, name: String) {
    world.create_event(&category, &unquote(&name), -1, 2);
}

#[when("student {name} signs up with email {email}")]
fn student_signs_up(world: &RegistrationWorld, name: String, email: String) {
    let reply = world.send(
        actix_test::TestRequest::post()
            .uri("/api/v1/students")
            .set_json(json!({
                "name": unquote(&name),
                "email": unquote(&email),
                "department": "Fine Arts",
            })),
        None,
    );
    if reply.status == 201 {
        *world.student_cookie.borrow_mut() = reply.cookie.clone();
        *world.signed_up.borrow_mut() = Some(reply.body["student"].clone());
    }
    world.remember(reply);
}

#[when("the student logs in with email {email}")]
fn the_student_logs_in(world: &RegistrationWorld, email: String) {
    let reply = world.send(
        actix_test::TestRequest::post()
            .uri("/api/v1/students/login")
            .set_json(json!({ "email": unquote(&email) })),
        None,
    );
    assert_eq!(reply.status, 200, "student login failed: {}", reply.body);
    *world.student_cookie.borrow_mut() = reply.cookie.clone();
    *world.logged_in.borrow_mut() = Some(reply.body.clone());
    world.remember(reply);
}

#[when("the student registers for {name}")]
fn the_student_registers_for(world: &RegistrationWorld, name: String) {
    let event_id = *world
        .events
        .borrow()
        .get(&unquote(&name))
        .expect("event created earlier in the scenario");
    let reply = world.send(
        actix_test::TestRequest::post().uri(&format!("/api/v1/events/{event_id}/registrations")),
        world.student_session(),
    );
    world.remember(reply);
}

#[when("the student lists eligible events")]
fn the_student_lists_eligible_events(world: &RegistrationWorld) {
    let reply = world.send(
        actix_test::TestRequest::get().uri("/api/v1/students/me/events"),
        world.student_session(),
    );
    world.remember(reply);
}

#[when("administrator {username} logs in with password {password}")]
fn administrator_logs_in(world: &RegistrationWorld, username: String, password: String) {
    let reply = world.send(
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/login")
            .set_json(json!({
                "username": unquote(&username),
                "password": unquote(&password),
            })),
        None,
    );
    world.remember(reply);
}

#[when("an anonymous visitor opens the student dashboard")]
fn an_anonymous_visitor_opens_the_student_dashboard(world: &RegistrationWorld) {
    let reply = world.send(
        actix_test::TestRequest::get().uri("/api/v1/students/me/dashboard"),
        None,
    );
    world.remember(reply);
}

#[then("the login returns the identity created at sign-up")]
fn the_login_returns_the_identity_created_at_sign_up(world: &RegistrationWorld) {
    let signed_up = world.signed_up.borrow().clone().expect("sign-up identity");
    let logged_in = world.logged_in.borrow().clone().expect("login identity");
    assert_eq!(signed_up, logged_in);
}

#[then("the logged in student is {name}")]
fn the_logged_in_student_is(world: &RegistrationWorld, name: String) {
    let logged_in = world.logged_in.borrow().clone().expect("login identity");
    assert_eq!(logged_in["name"], unquote(&name));
}

#[then("the last request succeeds with status {status}")]
fn the_last_request_succeeds(world: &RegistrationWorld, status: u16) {
    world.with_last(|reply| {
        assert_eq!(reply.status, status, "unexpected body: {}", reply.body);
    });
}

#[then("the last request fails with status {status} and reason {reason}")]
fn the_last_request_fails(world: &RegistrationWorld, status: u16, reason: String) {
    world.with_last(|reply| {
        assert_eq!(reply.status, status, "unexpected body: {}", reply.body);
        assert_eq!(
            reply.body["details"]["code"].as_str(),
            Some(unquote(&reason).as_str())
        );
    });
}

#[then("the response points to {path}")]
fn the_response_points_to(world: &RegistrationWorld, path: String) {
    world.with_last(|reply| {
        assert_eq!(reply.location.as_deref(), Some(unquote(&path).as_str()));
    });
}

#[then("the eligible events are {names} in that order")]
fn the_eligible_events_are(world: &RegistrationWorld, names: String) {
    let expected: Vec<String> = unquote(&names)
        .split(',')
        .map(|name| name.trim().to_owned())
        .collect();
    world.with_last(|reply| {
        assert_eq!(reply.status, 200, "unexpected body: {}", reply.body);
        let listed: Vec<String> = reply
            .body
            .as_array()
            .expect("event array")
            .iter()
            .filter_map(|event| event["name"].as_str().map(str::to_owned))
            .collect();
        assert_eq!(listed, expected);
    });
}

#[then("the onstage roster lists {student} for {event} exactly once")]
fn the_onstage_roster_lists_once(world: &RegistrationWorld, student: String, event: String) {
    let reply = world.send(
        actix_test::TestRequest::get().uri("/api/v1/admin/onstage"),
        Some(world.admin_session()),
    );
    assert_eq!(reply.status, 200, "roster failed: {}", reply.body);
    let (student, event) = (unquote(&student), unquote(&event));
    let rows = reply
        .body
        .as_array()
        .expect("roster array")
        .iter()
        .filter(|row| row["studentName"] == student.as_str() && row["eventName"] == event.as_str())
        .count();
    assert_eq!(rows, 1);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "A student logs back in with the email used at sign-up"
)]
fn a_student_logs_back_in(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Signing up twice with one email keeps a single account"
)]
fn signing_up_twice_keeps_one_account(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Registering twice for one event leaves one roster row"
)]
fn registering_twice_leaves_one_row(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Closed events are hidden but still accept registrations"
)]
fn closed_events_still_accept_registrations(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Enforcing the deadline rejects late registrations"
)]
fn enforcing_the_deadline(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Enforcing capacity rejects registrations for a full event"
)]
fn enforcing_capacity(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Administrator login does not reveal which part was wrong"
)]
fn administrator_login(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Anonymous visitors are sent to the login page"
)]
fn anonymous_visitors_are_redirected(world: RegistrationWorld) {
    drop(world);
}
