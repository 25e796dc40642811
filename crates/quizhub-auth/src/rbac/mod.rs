//! Role-based access control: bearer extraction and the per-route role gate.

pub mod enforcer;
pub mod guard;

pub use enforcer::AllowedRoles;
pub use guard::{Authorizer, Principal, extract_bearer};
