//! Role gate evaluated on every navigation. It is a pure function of the
//! session and the destination; nothing is cached between calls. This is a
//! UX guard only; the backend enforces authorization on every endpoint.

use super::{session::Session, types::Role};
use crate::routes::{Access, Route};

/// Outcome of a navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render,
    /// Not signed in.
    RedirectToLogin,
    /// Signed in as the other role; go to the actor's own home.
    RedirectToHome(Route),
}

/// Gate for a protected destination. `required` is `None` when any signed-in
/// actor may enter.
#[must_use]
pub fn guard(session: &Session, required: Option<Role>) -> Navigation {
    match (session, required) {
        (Session::Anonymous, _) => Navigation::RedirectToLogin,
        (Session::Admin(_), Some(Role::User)) => {
            Navigation::RedirectToHome(Route::home(Role::Admin))
        }
        (Session::User(_), Some(Role::Admin)) => {
            Navigation::RedirectToHome(Route::home(Role::User))
        }
        _ => Navigation::Render,
    }
}

/// Gate for a route from the navigation table; public routes always render.
#[must_use]
pub fn navigate(session: &Session, route: Route) -> Navigation {
    match route.access() {
        Access::Public => Navigation::Render,
        Access::Role(role) => guard(session, Some(role)),
    }
}
