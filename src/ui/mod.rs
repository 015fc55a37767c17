//! Server-rendered onboarding form

pub mod pages;
pub mod routes;

pub use pages::{escape_html, onboarding_page, FormView, Notice};
pub use routes::create_ui_router;
