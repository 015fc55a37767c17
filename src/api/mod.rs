//! JSON API

pub mod onboard_routes;

pub use onboard_routes::{create_onboard_router, OnboardAck, SUCCESS_MESSAGE};
