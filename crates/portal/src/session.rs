//! Per-client identity context.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use empowrhr_auth::{IdentityAssertion, Role};

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(IdentityAssertion),
}

/// What a view guard sees when it reads the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub role: Option<Role>,
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(role: Role) -> Self {
        Self {
            is_authenticated: true,
            role: Some(role),
        }
    }
}

/// Shared handle to one client's session.
///
/// Clones observe the same state. Independent clients (tabs, processes)
/// each create their own context.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with `assertion`. Last call wins.
    pub fn establish(&self, assertion: IdentityAssertion) {
        tracing::debug!(role = %assertion.role, "session established");
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *state = SessionState::Authenticated(assertion);
    }

    pub fn clear(&self) {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *state = SessionState::Unauthenticated;
    }

    pub fn current(&self) -> SessionSnapshot {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            SessionState::Unauthenticated => SessionSnapshot::anonymous(),
            SessionState::Authenticated(assertion) => SessionSnapshot::signed_in(assertion.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use empowrhr_auth::Identifier;

    use super::*;

    fn assertion(name: &str, role: Role) -> IdentityAssertion {
        IdentityAssertion {
            identifier: Identifier::parse(name).unwrap(),
            role,
        }
    }

    #[test]
    fn starts_anonymous() {
        let session = SessionContext::new();
        assert_eq!(session.current(), SessionSnapshot::anonymous());
    }

    #[test]
    fn establish_and_clear_are_visible_immediately() {
        let session = SessionContext::new();
        session.establish(assertion("alice", Role::Admin));
        assert_eq!(session.current(), SessionSnapshot::signed_in(Role::Admin));

        session.clear();
        assert_eq!(session.current(), SessionSnapshot::anonymous());
    }

    #[test]
    fn last_establish_wins() {
        let session = SessionContext::new();
        session.establish(assertion("alice", Role::Employee));
        session.establish(assertion("root", Role::SuperAdmin));
        assert_eq!(session.current(), SessionSnapshot::signed_in(Role::SuperAdmin));
    }

    #[test]
    fn clones_share_state_but_new_contexts_do_not() {
        let tab = SessionContext::new();
        let same_tab = tab.clone();
        let other_tab = SessionContext::new();

        same_tab.establish(assertion("alice", Role::Employee));
        assert!(tab.current().is_authenticated);
        assert!(!other_tab.current().is_authenticated);
    }
}
