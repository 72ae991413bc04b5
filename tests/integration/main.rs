//! Integration test entry point.

mod helpers;

mod acl_test;
mod auth_test;
mod oauth_test;
