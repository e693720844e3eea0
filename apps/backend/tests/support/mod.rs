#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod envelope;
pub mod logging;
pub mod test_state;

pub use app_builder::create_test_app;
pub use auth::{bearer, seed_user, token_for};
pub use envelope::{assert_fail, assert_success, call_envelope};
pub use test_state::{build_test_state, TEST_SECRET};
