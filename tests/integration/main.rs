//! HTTP-level integration tests against the in-memory store.

mod auth_test;
mod cms_test;
mod helpers;
