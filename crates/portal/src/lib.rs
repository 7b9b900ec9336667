//! Client side of the EmpowrHR sign-in flow.
//!
//! Holds the per-client session, guards every view against the compiled-in
//! route table, builds the role-filtered menu and talks to the auth API.

pub mod gateway;
pub mod navigation;
pub mod portal;
pub mod session;

pub use gateway::{AuthGateway, GatewayConfig, GatewayError, HttpAuthGateway};
pub use navigation::{
    Decision, LANDING_PATH, LOGIN_PATH, LOGOUT_PATH, MenuItem, PageVariant, ROUTES, ViewRule,
    explain, menu, page_variant, resolve,
};
pub use portal::{LOGIN_FAILED_MESSAGE, LoginError, Portal};
pub use session::{SessionContext, SessionSnapshot};
