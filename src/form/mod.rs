//! Onboarding form model
//!
//! Declarative schema, draft validation and the validated submission.

pub mod schema;
pub mod services;
pub mod validation;

pub use schema::{BudgetInput, FieldDefinition, FieldRule, FieldValue, FormSchema, InputKind};
pub use services::{preselected_services, selection_location, ServiceOption};
pub use validation::{FieldError, FormDraft, OnboardingSubmission, ValidationErrors};
