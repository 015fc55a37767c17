//! Drafts, validation errors and the validated submission

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::schema::{parse_date, BudgetInput, FieldValue, FormSchema};
use super::services::ServiceOption;

/// Untrusted form input, exactly as posted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDraft {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetInput>,
    pub project_start_date: String,
    pub accept_terms: bool,
}

impl FormDraft {
    /// Empty draft with the given services pre-selected
    pub fn with_services(services: &[ServiceOption]) -> Self {
        Self {
            services: services.iter().map(|s| s.as_str().to_string()).collect(),
            ..Default::default()
        }
    }

    /// Build a draft from `application/x-www-form-urlencoded` pairs.
    ///
    /// `services` may repeat; unknown keys are ignored.
    pub fn from_form_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut draft = FormDraft::default();
        for (key, value) in pairs {
            let value: String = value.into();
            match key.as_ref() {
                "fullName" => draft.full_name = value,
                "email" => draft.email = value,
                "companyName" => draft.company_name = value,
                "services" => draft.services.push(value),
                "budget" => draft.budget = Some(BudgetInput::Text(value)),
                "projectStartDate" => draft.project_start_date = value,
                "acceptTerms" => draft.accept_terms = matches!(value.as_str(), "on" | "true" | "1"),
                _ => {}
            }
        }
        draft
    }

    /// Raw value of a schema field
    pub fn value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "fullName" => Some(FieldValue::Text(&self.full_name)),
            "email" => Some(FieldValue::Text(&self.email)),
            "companyName" => Some(FieldValue::Text(&self.company_name)),
            "services" => Some(FieldValue::Selection(&self.services)),
            "budget" => Some(FieldValue::Integer(self.budget.as_ref())),
            "projectStartDate" => Some(FieldValue::Text(&self.project_start_date)),
            "acceptTerms" => Some(FieldValue::Flag(self.accept_terms)),
            _ => None,
        }
    }

    /// Budget as it should be shown back in the form input
    pub fn budget_text(&self) -> String {
        match &self.budget {
            None => String::new(),
            Some(BudgetInput::Text(s)) => s.clone(),
            Some(BudgetInput::Number(n)) if n.fract() == 0.0 => format!("{}", *n as i64),
            Some(BudgetInput::Number(n)) => n.to_string(),
        }
    }

    pub fn is_service_selected(&self, service: ServiceOption) -> bool {
        self.services.iter().any(|s| s == service.as_str())
    }

    /// Selected services that belong to the enumeration, in order
    pub fn known_services(&self) -> Vec<ServiceOption> {
        let mut known = Vec::new();
        for opt in self.services.iter().filter_map(|s| ServiceOption::parse(s)) {
            if !known.contains(&opt) {
                known.push(opt);
            }
        }
        known
    }
}

/// A failing field and the message shown beneath it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// First failing message per field, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A validated onboarding submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSubmission {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: Vec<ServiceOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u32>,
    pub project_start_date: NaiveDate,
    pub accept_terms: bool,
}

impl OnboardingSubmission {
    /// Text shown to the user once the API has acknowledged the submission
    pub fn success_summary(&self) -> String {
        let services = self
            .services
            .iter()
            .map(ServiceOption::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let budget = self
            .budget
            .map(|b| b.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "Form submitted successfully! 🎉\n\
             Full Name: {}\n\
             Email: {}\n\
             Company: {}\n\
             Services: {}\n\
             Budget: {}\n\
             Project Start Date: {}\n\
             Accepted Terms: {}",
            self.full_name,
            self.email,
            self.company_name,
            services,
            budget,
            self.project_start_date.format("%Y-%m-%d"),
            if self.accept_terms { "Yes" } else { "No" },
        )
    }
}

impl FormSchema {
    /// Validate a draft, producing the typed submission or every failing field.
    pub fn validate(
        &self,
        draft: &FormDraft,
        today: NaiveDate,
    ) -> Result<OnboardingSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let project_start_date = parse_date(&draft.project_start_date);

        for field in self.fields() {
            let Some(value) = draft.value(field.name) else {
                errors.push(field.name, "Unknown field");
                continue;
            };
            if let Err(message) = field.rule.check(value, today) {
                errors.push(field.name, message);
            }
        }

        // An unparsable date has already failed its FutureDate rule
        let (true, Some(project_start_date)) = (errors.is_empty(), project_start_date) else {
            return Err(errors);
        };

        let budget = match draft.budget.as_ref().map(BudgetInput::parse) {
            Some(Ok(Some(n))) => u32::try_from(n).ok(),
            _ => None,
        };

        Ok(OnboardingSubmission {
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            company_name: draft.company_name.clone(),
            services: draft.known_services(),
            budget,
            project_start_date,
            accept_terms: draft.accept_terms,
        })
    }
}
