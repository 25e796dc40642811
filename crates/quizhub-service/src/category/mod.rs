//! Quiz category administration.

pub mod service;

pub use service::CategoryService;
