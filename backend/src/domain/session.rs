//! Per-request session state and the routing guard.
//!
//! A [`SessionController`] starts in the loading state and is completed by a
//! single call to [`SessionController::observe`], which carries the identity
//! reported by the provider (or its absence). Every routing decision goes
//! through [`authorize`].

use std::fmt;

use serde::Serialize;

use super::Error;
use super::identity::{AdminRoster, Role, SessionIdentity};

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    Admin,
}

impl Route {
    /// Request path for the view.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Admin => "/admin",
        }
    }

    /// Landing view for a role.
    pub const fn home_of(role: Role) -> Self {
        match role {
            Role::Visitor => Self::Login,
            Role::User => Self::Dashboard,
            Role::Administrator => Self::Admin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
    /// Identity has not been resolved yet.
    Pending,
}

/// Decide whether `role` may view `route`.
///
/// Denied requests are redirected to the role's landing view.
///
/// # Examples
/// ```
/// use grievance_backend::domain::{Access, Role, Route, authorize};
///
/// assert_eq!(authorize(Role::Visitor, Route::Admin), Access::Redirect(Route::Login));
/// assert_eq!(authorize(Role::Administrator, Route::Admin), Access::Allow);
/// ```
pub fn authorize(role: Role, route: Route) -> Access {
    let allowed = match route {
        Route::Root => false,
        Route::Login | Route::Register => role == Role::Visitor,
        Route::Dashboard => role == Role::User,
        Route::Admin => role == Role::Administrator,
    };
    if allowed {
        Access::Allow
    } else {
        Access::Redirect(Route::home_of(role))
    }
}

/// Current-user state for one request.
#[derive(Debug, Clone)]
pub struct SessionController {
    roster: AdminRoster,
    identity: Option<SessionIdentity>,
    loading: bool,
}

impl SessionController {
    /// Controller awaiting its identity notification.
    pub fn pending(roster: AdminRoster) -> Self {
        Self {
            roster,
            identity: None,
            loading: true,
        }
    }

    /// Identity-change callback. Ends the loading state.
    pub fn observe(&mut self, identity: Option<SessionIdentity>) {
        self.identity = identity;
        self.loading = false;
    }

    /// Convenience for a controller whose identity is already known.
    pub fn resolved(roster: AdminRoster, identity: Option<SessionIdentity>) -> Self {
        let mut controller = Self::pending(roster);
        controller.observe(identity);
        controller
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Role {
        self.roster.role_of(self.identity.as_ref())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn authorize(&self, route: Route) -> Access {
        if self.loading {
            return Access::Pending;
        }
        authorize(self.role(), route)
    }

    /// Identity of a caller holding exactly `role`.
    ///
    /// Used by API operations: a missing identity is `Unauthorized`, a
    /// different role is `Forbidden`.
    pub fn require(&self, role: Role) -> Result<&SessionIdentity, Error> {
        if self.loading {
            return Err(Error::service_unavailable("session is still loading"));
        }
        let identity = self
            .identity
            .as_ref()
            .ok_or_else(|| Error::unauthorized("login required"))?;
        if self.role() != role {
            return Err(Error::forbidden(format!("{role} role required")));
        }
        Ok(identity)
    }
}
