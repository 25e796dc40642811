//! HTTP request handlers organized by route group.

pub mod auth;
pub mod cms;
pub mod health;
