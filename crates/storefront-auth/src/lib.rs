//! Identity for the storefront.
//!
//! Sign-in is mocked: any non-empty credentials are accepted and no
//! backend is contacted. The rest of the application only asks whether a
//! user is identified.

mod error;
mod provider;
mod session;
mod user;

pub use error::AuthError;
pub use provider::{Identity, IdentityProvider, MockIdentityProvider, MockLatency};
pub use session::{AuthSession, SessionToken};
pub use user::User;
