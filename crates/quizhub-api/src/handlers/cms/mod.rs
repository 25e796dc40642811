//! Content management handlers. Every route here is admin-only.

pub mod categories;
pub mod roles;
pub mod users;
