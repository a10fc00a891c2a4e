//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie holds either a student identity or an administrator identity,
//! never both. Handlers turn it into a [`RequestContext`] and pass that to
//! the domain.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{
    AdminId, AdminIdentity, Error, RequestContext, StudentId, StudentIdentity,
};

pub(crate) const STUDENT_ID_KEY: &str = "student_id";
pub(crate) const STUDENT_NAME_KEY: &str = "student_name";
pub(crate) const ADMIN_ID_KEY: &str = "admin_id";
pub(crate) const ADMIN_USERNAME_KEY: &str = "admin_username";

fn persist_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Log a student in, replacing any administrator identity.
    pub fn persist_student(&self, student: &StudentIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0.remove(ADMIN_ID_KEY);
        self.0.remove(ADMIN_USERNAME_KEY);
        self.0
            .insert(STUDENT_ID_KEY, student.id.get())
            .map_err(persist_error)?;
        self.0
            .insert(STUDENT_NAME_KEY, &student.name)
            .map_err(persist_error)
    }

    /// Log an administrator in, replacing any student identity.
    pub fn persist_admin(&self, admin: &AdminIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0.remove(STUDENT_ID_KEY);
        self.0.remove(STUDENT_NAME_KEY);
        self.0
            .insert(ADMIN_ID_KEY, admin.id.get())
            .map_err(persist_error)?;
        self.0
            .insert(ADMIN_USERNAME_KEY, &admin.username)
            .map_err(persist_error)
    }

    /// Forget every identity and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    fn pair<T, U>(&self, id_key: &str, label_key: &str) -> Option<(T, U)>
    where
        T: serde::de::DeserializeOwned,
        U: serde::de::DeserializeOwned,
    {
        let read = || -> Result<Option<(T, U)>, actix_session::SessionGetError> {
            Ok(self.0.get::<T>(id_key)?.zip(self.0.get::<U>(label_key)?))
        };
        match read() {
            Ok(pair) => pair,
            Err(error) => {
                warn!(%error, key = id_key, "unreadable identity in session cookie");
                None
            }
        }
    }

    /// Who the cookie says is calling; anonymous when it says nothing usable.
    pub fn request_context(&self) -> RequestContext {
        if let Some((id, name)) = self.pair::<i64, String>(STUDENT_ID_KEY, STUDENT_NAME_KEY) {
            return RequestContext::student(StudentIdentity {
                id: StudentId::new(id),
                name,
            });
        }
        if let Some((id, username)) = self.pair::<i64, String>(ADMIN_ID_KEY, ADMIN_USERNAME_KEY) {
            return RequestContext::admin(AdminIdentity {
                id: AdminId::new(id),
                username,
            });
        }
        RequestContext::anonymous()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
