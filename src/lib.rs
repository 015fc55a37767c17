//! Client onboarding form
//!
//! A server-rendered onboarding form backed by a declarative validation
//! schema, and the `POST /api/onboard` endpoint the form submits to.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod router;
pub mod state;
pub mod ui;

pub use client::OnboardClient;
pub use config::ServerConfig;
pub use error::{AppError, ClientError, ConfigError};
pub use form::{FormDraft, FormSchema, OnboardingSubmission, ServiceOption, ValidationErrors};
pub use router::build_router;
pub use state::AppState;
