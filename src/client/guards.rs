//! Route-guard policy, evaluated on every navigation.
//!
//! UX-only guard; real access control lives on the API.

/// Static route requirements, mirroring the client's route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_complete_registration: bool,
    /// The login route bounces already-authenticated users away.
    pub is_login: bool,
}

/// The registration flow: open to unauthenticated users.
pub const REGISTER_ROUTE: RouteMeta = RouteMeta {
    requires_auth: false,
    requires_complete_registration: false,
    is_login: false,
};

/// The login view.
pub const LOGIN_ROUTE: RouteMeta = RouteMeta {
    requires_auth: false,
    requires_complete_registration: false,
    is_login: true,
};

/// The dashboard: needs a session and a complete registration.
pub const DASHBOARD_ROUTE: RouteMeta = RouteMeta {
    requires_auth: true,
    requires_complete_registration: true,
    is_login: false,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Proceed,
    RedirectToLogin,
    RedirectToRegister,
    RedirectToDashboard,
}

/// Decide whether a navigation proceeds or redirects.
#[must_use]
pub fn evaluate(
    route: RouteMeta,
    is_authenticated: bool,
    is_registration_complete: bool,
) -> RouteDecision {
    if !route.requires_auth {
        if route.is_login && is_authenticated {
            return RouteDecision::RedirectToDashboard;
        }
        return RouteDecision::Proceed;
    }

    if !is_authenticated {
        return RouteDecision::RedirectToLogin;
    }

    if route.requires_complete_registration && !is_registration_complete {
        return RouteDecision::RedirectToRegister;
    }

    RouteDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::{
        evaluate, RouteDecision, DASHBOARD_ROUTE, LOGIN_ROUTE, REGISTER_ROUTE,
    };

    #[test]
    fn open_routes_proceed_for_anonymous_users() {
        assert_eq!(
            evaluate(LOGIN_ROUTE, false, false),
            RouteDecision::Proceed
        );
        assert_eq!(
            evaluate(REGISTER_ROUTE, false, false),
            RouteDecision::Proceed
        );
    }

    #[test]
    fn authenticated_user_is_bounced_off_login() {
        assert_eq!(
            evaluate(LOGIN_ROUTE, true, true),
            RouteDecision::RedirectToDashboard
        );
        // But not off other open routes.
        assert_eq!(evaluate(REGISTER_ROUTE, true, true), RouteDecision::Proceed);
    }

    #[test]
    fn protected_route_requires_session() {
        assert_eq!(
            evaluate(DASHBOARD_ROUTE, false, false),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn incomplete_registration_redirects_to_register() {
        assert_eq!(
            evaluate(DASHBOARD_ROUTE, true, false),
            RouteDecision::RedirectToRegister
        );
    }

    #[test]
    fn complete_session_proceeds() {
        assert_eq!(evaluate(DASHBOARD_ROUTE, true, true), RouteDecision::Proceed);
    }
}
