//! Test helpers for inbound HTTP components.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

use super::{HttpState, configure_api};
use crate::Trace;
use crate::domain::{
    AuthenticationService, DefaultAdmin, EventCatalogService, RegistrationPolicy,
    RegistrationService, ensure_default_admin,
};
use crate::outbound::InMemoryStore;
use crate::outbound::credentials::fast_test_hasher;

pub(crate) const ADMIN_USERNAME: &str = "admin";
pub(crate) const ADMIN_PASSWORD: &str = "admin123";

/// Build a session middleware configured for tests.
///
/// A fresh key per invocation; the `Secure` flag is off for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory backend with the default administrator already seeded.
pub(crate) async fn seeded_state(policy: RegistrationPolicy) -> HttpState {
    let store = Arc::new(InMemoryStore::default());
    let hasher = Arc::new(fast_test_hasher());
    ensure_default_admin(
        store.as_ref(),
        hasher.as_ref(),
        &DefaultAdmin::new(ADMIN_USERNAME, ADMIN_PASSWORD),
    )
    .await
    .expect("seed default admin");

    let auth = Arc::new(AuthenticationService::new(
        store.clone(),
        store.clone(),
        hasher,
    ));
    HttpState {
        students: auth.clone(),
        admins: auth,
        catalogue: Arc::new(EventCatalogService::new(store.clone(), store.clone())),
        registrations: Arc::new(
            RegistrationService::new(store.clone(), store, Arc::new(DefaultClock))
                .with_policy(policy),
        ),
        clock: Arc::new(DefaultClock),
    }
}

/// The `/api/v1` surface over `state`, with tracing and test sessions.
pub(crate) fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(configure_api),
        )
}

/// The session cookie set by `res`, if any.
pub(crate) fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Counts events on the current thread whose message equals `message`.
pub(crate) struct MessageCount {
    hits: Arc<AtomicUsize>,
    _guard: DefaultGuard,
}

impl MessageCount {
    /// Install a thread-local subscriber counting `message` until dropped.
    pub(crate) fn install(message: &'static str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let layer = MessageCounter {
            message,
            hits: Arc::clone(&hits),
        };
        let guard = tracing::subscriber::set_default(Registry::default().with(layer));
        Self {
            hits,
            _guard: guard,
        }
    }

    pub(crate) fn get(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

struct MessageCounter {
    message: &'static str,
    hits: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> Layer<S> for MessageCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageField(None);
        event.record(&mut visitor);
        if visitor.0.as_deref() == Some(self.message) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct MessageField(Option<String>);

impl Visit for MessageField {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}
