//! Login/logout flow over a session and an [`AuthGateway`].

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use empowrhr_auth::Role;

use crate::navigation::{self, Decision, LANDING_PATH, LOGIN_PATH, LOGOUT_PATH, MenuItem};
use crate::{AuthGateway, GatewayError, SessionContext};

/// Shown to the user after any failed sign-in.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("a login is already in progress")]
    LoginInFlight,

    #[error("Invalid email or password. Please try again.")]
    Failed(#[source] GatewayError),
}

impl LoginError {
    /// Text for the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoginError::LoginInFlight => "Signing in, please wait.",
            LoginError::Failed(_) => LOGIN_FAILED_MESSAGE,
        }
    }
}

pub struct Portal<G> {
    gateway: G,
    session: SessionContext,
    in_flight: AtomicBool,
}

impl<G: AuthGateway> Portal<G> {
    pub fn new(gateway: G, session: SessionContext) -> Self {
        Self {
            gateway,
            session,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Sign in and return where to go next.
    ///
    /// The session only changes on success. A second call while one is
    /// pending fails with [`LoginError::LoginInFlight`] without touching the
    /// gateway.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Decision, LoginError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(LoginError::LoginInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        match self.gateway.login(identifier, secret).await {
            Ok(assertion) => {
                tracing::info!(role = %assertion.role, "signed in");
                self.session.establish(assertion);
                Ok(Decision::Redirect(LANDING_PATH))
            }
            Err(e) => {
                tracing::info!(error = %e, "sign-in failed");
                Err(LoginError::Failed(e))
            }
        }
    }

    pub fn logout(&self) -> Decision {
        self.session.clear();
        Decision::Redirect(LOGIN_PATH)
    }

    /// Guard a navigation. Visiting `/logout` signs out.
    pub fn navigate(&self, path: &str) -> Decision {
        if navigation::normalize(path) == LOGOUT_PATH {
            return self.logout();
        }
        navigation::resolve(path, &self.session.current())
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        navigation::menu(self.role())
    }

    pub fn role(&self) -> Option<Role> {
        let current = self.session.current();
        current.role.filter(|_| current.is_authenticated)
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
