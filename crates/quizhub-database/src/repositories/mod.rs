//! PostgreSQL implementations of the store traits.

pub mod category;
pub mod role;
pub mod user;

pub use category::CategoryRepository;
pub use role::RoleRepository;
pub use user::UserRepository;

/// Name of the constraint a database error violated, if any.
fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}
