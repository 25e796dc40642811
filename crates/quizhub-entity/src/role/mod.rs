//! Role domain entities.

pub mod builtin;
pub mod model;

pub use builtin::{ADMIN_ROLE, BuiltinRole};
pub use model::Role;
